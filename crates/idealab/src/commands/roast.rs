//! `idealab roast` -- candid review of a plain-text resume.

use anyhow::Result;
use idealab_ui::views::render_roast;

use crate::cli::RoastArgs;
use crate::commands::generator;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_text, read_source};

/// Execute the `idealab roast` command.
pub fn run(ctx: &RuntimeContext, args: &RoastArgs) -> Result<()> {
    let resume = read_source(Some(args.file.as_path()))?;
    let roast = generator(ctx)?.roast_resume(&resume)?;

    if ctx.json {
        output_json(&roast);
    } else {
        output_text(&render_roast(&roast));
    }
    Ok(())
}
