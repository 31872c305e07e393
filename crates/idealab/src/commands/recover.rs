//! `idealab recover` -- pull a JSON object out of generated text.

use anyhow::{Context, Result};
use idealab_recovery::{RecoveryOptions, recover_with};
use idealab_ui::styles::render_muted;

use crate::cli::RecoverArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, read_source};

/// Execute the `idealab recover` command.
pub fn run(ctx: &RuntimeContext, args: &RecoverArgs) -> Result<()> {
    let raw = read_source(args.file.as_deref())?;
    let config = ctx.load_config()?;
    let options = RecoveryOptions {
        excerpt_len: config.recovery.excerpt_len,
    };

    let recovery = recover_with(&raw, &options).context("no JSON object could be recovered")?;

    if ctx.json {
        output_json(&serde_json::json!({
            "strategy": recovery.strategy.as_str(),
            "object": recovery.object,
        }));
        return Ok(());
    }

    output_json(&recovery.object);
    if !ctx.quiet {
        eprintln!(
            "{}",
            render_muted(&format!("recovered ({})", recovery.strategy))
        );
    }
    Ok(())
}
