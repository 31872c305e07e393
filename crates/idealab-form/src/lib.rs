//! Interactive form runtime.
//!
//! A [`FormSession`] owns one prototype config plus the values entered so
//! far, and recomputes every output after each edit. Outputs never fail as a
//! group: each one independently holds a value or a sentinel string.

use idealab_calc::engine;
use idealab_calc::types::{Evaluation, InputValue, InputValueMap, Sentinel};
use idealab_core::descriptor::{InputDescriptor, InputKind};
use idealab_core::prototype::PrototypeConfig;
use idealab_core::validation::SpecIntegrityError;
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Output id to display string.
pub type OutputValueMap = IndexMap<String, String>;

/// Error type for form edits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("unknown input: {0}")]
    UnknownInput(String),

    #[error("'{value}' is not an option for input '{id}'")]
    InvalidOption { id: String, value: String },

    #[error(transparent)]
    Integrity(#[from] SpecIntegrityError),
}

pub type Result<T> = std::result::Result<T, FormError>;

/// Per-prototype input and output state.
#[derive(Debug, Clone)]
pub struct FormSession {
    config: PrototypeConfig,
    inputs: InputValueMap,
    outputs: OutputValueMap,
    evaluations: IndexMap<String, Evaluation>,
}

impl FormSession {
    /// Start a session. The config must pass integrity validation.
    pub fn new(config: PrototypeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            inputs: InputValueMap::new(),
            outputs: OutputValueMap::new(),
            evaluations: IndexMap::new(),
        })
    }

    pub fn config(&self) -> &PrototypeConfig {
        &self.config
    }

    pub fn inputs(&self) -> &InputValueMap {
        &self.inputs
    }

    /// Computed outputs. Empty until the first input is set.
    pub fn outputs(&self) -> &OutputValueMap {
        &self.outputs
    }

    /// Set a typed value for one input and recompute.
    pub fn set_input(&mut self, id: &str, value: InputValue) -> Result<&OutputValueMap> {
        self.descriptor(id)?;
        trace!(input = id, ?value, "set input");
        self.inputs.insert(id.to_string(), value);
        self.recompute();
        Ok(&self.outputs)
    }

    /// Apply a raw text edit, coerced according to the input's kind.
    ///
    /// Number inputs parse the text as a float; blank or unparsable text
    /// clears the value. Select inputs only take one of their options (or
    /// the empty string). Everything else stores the text verbatim.
    pub fn apply_edit(&mut self, id: &str, raw: &str) -> Result<&OutputValueMap> {
        let value = coerce(self.descriptor(id)?, raw)?;
        self.set_input(id, value)
    }

    /// Display string for an output: its computed value, or the
    /// enter-inputs placeholder before anything has been entered.
    pub fn display(&self, output_id: &str) -> Option<&str> {
        if !self.config.outputs.iter().any(|o| o.id == output_id) {
            return None;
        }
        Some(
            self.outputs
                .get(output_id)
                .map(String::as_str)
                .unwrap_or(Sentinel::AwaitingInput.as_str()),
        )
    }

    /// The evaluation behind an output's display string, if computed.
    pub fn evaluation(&self, output_id: &str) -> Option<&Evaluation> {
        self.evaluations.get(output_id)
    }

    /// Recompute every output from the current inputs.
    ///
    /// Does nothing while no input has been set.
    pub fn recompute(&mut self) {
        if self.inputs.is_empty() {
            return;
        }

        self.outputs.clear();
        self.evaluations.clear();
        for output in &self.config.outputs {
            let evaluation = match self.config.calculation_for(output) {
                Some(spec) => engine::evaluate(spec, &self.inputs),
                None => Evaluation::Failed(Sentinel::NoCalculation),
            };
            if evaluation.is_failure() {
                debug!(output = %output.id, result = %evaluation.display(), "output not computed");
            }
            self.outputs.insert(output.id.clone(), evaluation.display());
            self.evaluations.insert(output.id.clone(), evaluation);
        }
    }

    fn descriptor(&self, id: &str) -> Result<&InputDescriptor> {
        self.config
            .input(id)
            .ok_or_else(|| FormError::UnknownInput(id.to_string()))
    }
}

fn coerce(input: &InputDescriptor, raw: &str) -> Result<InputValue> {
    match &input.kind {
        InputKind::Number => Ok(raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(InputValue::Null, InputValue::Number)),
        InputKind::Select => {
            let options = input.options.as_deref().unwrap_or_default();
            if raw.is_empty() || options.iter().any(|o| o == raw) {
                Ok(InputValue::Text(raw.to_string()))
            } else {
                Err(FormError::InvalidOption {
                    id: input.id.clone(),
                    value: raw.to_string(),
                })
            }
        }
        _ => Ok(InputValue::Text(raw.to_string())),
    }
}
