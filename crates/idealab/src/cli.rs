//! Clap CLI definitions for the `idealab` command.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// idealab -- turn rough product ideas into working prototypes.
#[derive(Parser, Debug)]
#[command(
    name = "idealab",
    about = "Recover, evaluate and generate prototype ideas",
    long_about = "Flesh out product ideas, generate small calculator prototypes for them, \
                  and run those prototypes locally. Generated text is recovered into JSON \
                  even when the model wraps it in prose or breaks string escaping.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Local tools =====
    /// Recover a JSON object from free-form generated text.
    Recover(RecoverArgs),

    /// Evaluate a calculation against input values.
    Eval(EvalArgs),

    /// Fill in a prototype form and show its outputs.
    Form(FormArgs),

    /// Validate a prototype config and report problems.
    Check(CheckArgs),

    // ===== Generation =====
    /// Research an idea and score it with RICE.
    Idea(IdeaArgs),

    /// Generate an interactive prototype config for a user need.
    Prototype(PrototypeArgs),

    /// Roast a plain-text resume.
    Roast(RoastArgs),

    // ===== Setup =====
    /// Create a .idealab directory with a default config.
    Init(InitArgs),

    /// Manage configuration (list/get/set).
    Config(ConfigArgs),

    /// Print version information.
    Version,

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Recover
// ---------------------------------------------------------------------------

/// Arguments for `idealab recover`.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// File holding the generated text (default: stdin, or `-`).
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Eval
// ---------------------------------------------------------------------------

/// Arguments for `idealab eval`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("calculation").required(true).args(["spec", "formula", "describe"])))]
pub struct EvalArgs {
    /// Calculation spec file (.json or .toml).
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// Formula expression, e.g. "salary / 12".
    #[arg(long)]
    pub formula: Option<String>,

    /// Plain description, evaluated by keyword inference.
    #[arg(long)]
    pub describe: Option<String>,

    /// Input value (id=value), repeatable.
    #[arg(short = 'i', long = "input", num_args = 1..)]
    pub inputs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Form / Check
// ---------------------------------------------------------------------------

/// Arguments for `idealab form`.
#[derive(Args, Debug)]
pub struct FormArgs {
    /// Prototype config file (.json or .toml).
    pub config: PathBuf,

    /// Input edit (id=value), applied in order, repeatable.
    #[arg(short = 'i', long = "input", num_args = 1..)]
    pub inputs: Vec<String>,

    /// Read further id=value edits from stdin, one per line.
    #[arg(long)]
    pub interactive: bool,
}

/// Arguments for `idealab check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Prototype config file (.json or .toml).
    pub config: PathBuf,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Arguments for `idealab idea`.
#[derive(Args, Debug)]
pub struct IdeaArgs {
    /// Idea title.
    pub title: String,

    /// Description or user need, if already known.
    #[arg(long)]
    pub need: Option<String>,
}

/// Arguments for `idealab prototype`.
#[derive(Args, Debug)]
pub struct PrototypeArgs {
    /// The user need the prototype should address.
    #[arg(long)]
    pub need: String,

    /// Idea title for extra context.
    #[arg(long)]
    pub title: Option<String>,

    /// Upsell message for extra context.
    #[arg(long)]
    pub upsell: Option<String>,

    /// Write the prototype config to this file (JSON), ready for `idealab form`.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Arguments for `idealab roast`.
#[derive(Args, Debug)]
pub struct RoastArgs {
    /// Plain-text resume file (`-` for stdin).
    pub file: PathBuf,
}

// ---------------------------------------------------------------------------
// Init / Config
// ---------------------------------------------------------------------------

/// Arguments for `idealab init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file with defaults.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `idealab config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// List all effective configuration values.
    List,
    /// Get an effective configuration value.
    Get(ConfigGetArgs),
    /// Set a configuration value in .idealab/config.yaml.
    Set(ConfigSetArgs),
}

/// Arguments for `idealab config get`.
#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Dotted key, e.g. `ai.model`.
    pub key: String,
}

/// Arguments for `idealab config set`.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dotted key, e.g. `ai.max-tokens.idea`.
    pub key: String,
    /// New value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `idealab completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
