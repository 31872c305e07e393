//! Runtime context for command execution.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use idealab_config::config::{LabConfig, load_config};
use idealab_config::lab_dir::find_lab_dir;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Working directory the command was started in.
    pub cwd: PathBuf,

    /// Discovered `.idealab/` directory, if any.
    pub lab_dir: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let lab_dir = find_lab_dir(&cwd);

        Self {
            cwd,
            lab_dir,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Effective configuration: defaults, then the config file (when a
    /// `.idealab/` directory was found), then `IDEALAB_*` variables.
    pub fn load_config(&self) -> Result<LabConfig> {
        load_config(self.lab_dir.as_deref()).context("failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_copies_global_flags() {
        let global = GlobalArgs {
            json: true,
            verbose: false,
            quiet: true,
        };
        let ctx = RuntimeContext::from_global_args(&global);
        assert!(ctx.json);
        assert!(!ctx.verbose);
        assert!(ctx.quiet);
        assert!(ctx.cwd.is_absolute() || ctx.cwd == PathBuf::from("."));
    }
}
