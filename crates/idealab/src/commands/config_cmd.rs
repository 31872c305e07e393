//! `idealab config` -- inspect and change configuration (list/get/set).

use anyhow::{Context, Result};
use idealab_config::config::{load_file_config, save_config};
use idealab_config::lab_dir::find_lab_dir_or_error;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `idealab config` command.
///
/// `list` and `get` show effective values, environment overrides included.
/// `set` edits the config file only.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::List => {
            let entries = ctx.load_config()?.entries()?;
            if ctx.json {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect();
                output_json(&map);
            } else {
                for (key, value) in &entries {
                    println!("{} = {}", key, value);
                }
            }
        }

        ConfigCommands::Get(get_args) => {
            let value = ctx.load_config()?.get(&get_args.key)?;
            if ctx.json {
                output_json(&serde_json::json!({
                    "key": get_args.key,
                    "value": value,
                }));
            } else {
                println!("{}", value);
            }
        }

        ConfigCommands::Set(set_args) => {
            let lab_dir = match &ctx.lab_dir {
                Some(dir) => dir.clone(),
                None => find_lab_dir_or_error(&ctx.cwd)?,
            };
            let mut config = load_file_config(&lab_dir)
                .with_context(|| format!("failed to read config in {}", lab_dir.display()))?;
            config.set(&set_args.key, &set_args.value)?;
            save_config(&lab_dir, &config)?;

            let value = config.get(&set_args.key)?;
            if ctx.json {
                output_json(&serde_json::json!({
                    "key": set_args.key,
                    "value": value,
                }));
            } else if !ctx.quiet {
                println!("Set {} = {}", set_args.key, value);
            }
        }
    }

    Ok(())
}
