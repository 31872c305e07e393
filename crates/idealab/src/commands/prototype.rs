//! `idealab prototype` -- generate a prototype config for a user need.

use anyhow::{Context, Result};
use idealab_ai::PrototypeRequest;
use idealab_ui::views::{render_prototype, render_warnings};

use crate::cli::PrototypeArgs;
use crate::commands::generator;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_text};

/// Execute the `idealab prototype` command.
pub fn run(ctx: &RuntimeContext, args: &PrototypeArgs) -> Result<()> {
    let request = PrototypeRequest {
        user_need: args.need.clone(),
        title: args.title.clone(),
        upsell: args.upsell.clone(),
    };
    let prototype = generator(ctx)?.generate_prototype(&request)?;

    if let Some(path) = &args.save {
        let content = serde_json::to_string_pretty(&prototype.prototype_config)
            .context("failed to serialize prototype config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if !ctx.json && !ctx.quiet {
            println!("Saved prototype config to {}", path.display());
        }
    }

    if ctx.json {
        output_json(&prototype);
    } else {
        output_text(&render_prototype(&prototype));
        output_text(&render_warnings(&prototype.prototype_config.warnings()));
    }
    Ok(())
}
