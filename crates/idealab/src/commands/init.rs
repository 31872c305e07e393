//! `idealab init` -- create `.idealab/` with a default config.

use anyhow::{Context, Result, bail};
use idealab_config::config::{CONFIG_FILE, LabConfig, save_config};
use idealab_config::lab_dir::ensure_lab_dir;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `idealab init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let lab_dir = ensure_lab_dir(&ctx.cwd)
        .with_context(|| format!("failed to create .idealab in {}", ctx.cwd.display()))?;
    let config_path = lab_dir.join(CONFIG_FILE);

    if config_path.exists() && !args.force {
        bail!(
            "{} already exists\nHint: use --force to reset it to defaults",
            config_path.display()
        );
    }

    save_config(&lab_dir, &LabConfig::default())
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "lab_dir": lab_dir,
            "config": config_path,
        }));
    } else if !ctx.quiet {
        println!("Initialized {}", lab_dir.display());
        println!();
        println!("  Config: {}", config_path.display());
        println!();
        println!("Set ANTHROPIC_API_KEY, then run `idealab idea \"My idea\"` to get started.");
    }
    Ok(())
}
