//! `idealab check` -- validate a prototype config.

use anyhow::{Context, Result, bail};
use idealab_core::prototype::load_prototype;
use idealab_ui::styles::render_pass_icon;
use idealab_ui::views::render_warnings;

use crate::cli::CheckArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_text};

/// Execute the `idealab check` command.
///
/// Integrity errors (duplicate or empty ids, selects without options) fail
/// the load itself. Warnings only fail the command with `--strict`.
pub fn run(ctx: &RuntimeContext, args: &CheckArgs) -> Result<()> {
    let config = load_prototype(&args.config)
        .with_context(|| format!("invalid prototype config {}", args.config.display()))?;
    let warnings = config.warnings();

    if ctx.json {
        output_json(&serde_json::json!({
            "title": config.title,
            "inputs": config.inputs.len(),
            "outputs": config.outputs.len(),
            "calculation": config.calculation.as_ref().map(|c| c.kind()),
            "warnings": warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        }));
    } else {
        if !ctx.quiet {
            println!(
                "{} {} ({} inputs, {} outputs)",
                render_pass_icon(),
                config.title,
                config.inputs.len(),
                config.outputs.len()
            );
        }
        output_text(&render_warnings(&warnings));
    }

    if args.strict && !warnings.is_empty() {
        bail!("{} warning(s) in {}", warnings.len(), args.config.display());
    }
    Ok(())
}
