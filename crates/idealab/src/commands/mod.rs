//! Command handlers, one module per subcommand.

pub mod check;
pub mod completion;
pub mod config_cmd;
pub mod eval;
pub mod form;
pub mod idea;
pub mod init;
pub mod prototype;
pub mod recover;
pub mod roast;
pub mod version;

use anyhow::{Context, Result, bail};
use idealab_ai::{AnthropicClient, Generator};
use tracing::debug;

use crate::context::RuntimeContext;

/// Split `id=value` flags, keeping their order. The value may be empty or
/// contain further `=` signs.
pub(crate) fn parse_input_flags(flags: &[String]) -> Result<Vec<(String, String)>> {
    flags
        .iter()
        .map(|flag| match flag.split_once('=') {
            Some((id, value)) if !id.trim().is_empty() => {
                Ok((id.trim().to_string(), value.to_string()))
            }
            _ => bail!("invalid input '{}': expected id=value", flag),
        })
        .collect()
}

/// A generator backed by the configured Anthropic client.
pub(crate) fn generator(ctx: &RuntimeContext) -> Result<Generator<AnthropicClient>> {
    let config = ctx.load_config()?;
    let client = AnthropicClient::from_env(&config.ai).context("cannot reach the model")?;
    debug!(model = client.model(), "using anthropic provider");
    Ok(Generator::new(client, &config))
}
