//! Prototype config integrity rules.

use std::collections::HashSet;
use std::fmt;

use idealab_calc::engine::spec_identifiers;
use idealab_calc::types::CalculationSpec;

use crate::descriptor::{InputDescriptor, InputKind, OutputDescriptor};
use crate::prototype::PrototypeConfig;

/// Error type for configs that must not be used at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecIntegrityError {
    #[error("input #{0} has an empty id")]
    EmptyInputId(usize),

    #[error("output #{0} has an empty id")]
    EmptyOutputId(usize),

    #[error("duplicate input id: {0}")]
    DuplicateInputId(String),

    #[error("duplicate output id: {0}")]
    DuplicateOutputId(String),

    #[error("select input '{0}' has no options")]
    MissingOptions(String),
}

/// A problem that does not stop a config from being used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// An expression mentions an id no input declares. Outputs using it
    /// will show the invalid-calculation sentinel.
    UndeclaredIdentifier {
        identifier: String,
        /// The output whose own calculation mentions it, or `None` for the
        /// shared calculation.
        output: Option<String>,
    },

    /// An input kind outside text/number/select/textarea; treated as text.
    UnknownInputKind { id: String, kind: String },

    /// No shared calculation and at least one output without its own.
    NoCalculation { output: String },

    /// A calculation with no formula, conditions or description. Outputs
    /// using it show the no-logic sentinel.
    UnusableCalculation {
        /// The output owning it, or `None` for the shared calculation.
        output: Option<String>,
    },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndeclaredIdentifier {
                identifier,
                output: None,
            } => write!(f, "calculation references undeclared input '{identifier}'"),
            Self::UndeclaredIdentifier {
                identifier,
                output: Some(output),
            } => write!(
                f,
                "calculation for output '{output}' references undeclared input '{identifier}'"
            ),
            Self::UnknownInputKind { id, kind } => {
                write!(f, "input '{id}' has unknown type '{kind}', treated as text")
            }
            Self::NoCalculation { output } => {
                write!(f, "output '{output}' has no calculation")
            }
            Self::UnusableCalculation { output: None } => {
                write!(f, "calculation has no usable logic")
            }
            Self::UnusableCalculation {
                output: Some(output),
            } => write!(f, "calculation for output '{output}' has no usable logic"),
        }
    }
}

/// Validates a whole config.
pub fn validate_config(config: &PrototypeConfig) -> Result<(), SpecIntegrityError> {
    validate_descriptors(&config.inputs, &config.outputs)
}

/// Validates descriptor ids and select options.
pub fn validate_descriptors(
    inputs: &[InputDescriptor],
    outputs: &[OutputDescriptor],
) -> Result<(), SpecIntegrityError> {
    let mut seen = HashSet::new();
    for (i, input) in inputs.iter().enumerate() {
        if input.id.trim().is_empty() {
            return Err(SpecIntegrityError::EmptyInputId(i + 1));
        }
        if !seen.insert(input.id.as_str()) {
            return Err(SpecIntegrityError::DuplicateInputId(input.id.clone()));
        }
        if input.kind == InputKind::Select
            && input.options.as_ref().is_none_or(|o| o.is_empty())
        {
            return Err(SpecIntegrityError::MissingOptions(input.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for (i, output) in outputs.iter().enumerate() {
        if output.id.trim().is_empty() {
            return Err(SpecIntegrityError::EmptyOutputId(i + 1));
        }
        if !seen.insert(output.id.as_str()) {
            return Err(SpecIntegrityError::DuplicateOutputId(output.id.clone()));
        }
    }

    Ok(())
}

/// Collects non-fatal problems, in declaration order.
pub fn config_warnings(config: &PrototypeConfig) -> Vec<IntegrityWarning> {
    let mut warnings = Vec::new();

    for input in &config.inputs {
        if !input.kind.is_known() {
            warnings.push(IntegrityWarning::UnknownInputKind {
                id: input.id.clone(),
                kind: input.kind.to_string(),
            });
        }
    }

    let declared: HashSet<&str> = config.inputs.iter().map(|i| i.id.as_str()).collect();
    if let Some(spec) = &config.calculation {
        spec_warnings(spec, &declared, None, &mut warnings);
    }
    for output in &config.outputs {
        match (&output.calculation, &config.calculation) {
            (Some(spec), _) => spec_warnings(spec, &declared, Some(&output.id), &mut warnings),
            (None, None) => warnings.push(IntegrityWarning::NoCalculation {
                output: output.id.clone(),
            }),
            (None, Some(_)) => {}
        }
    }

    warnings
}

fn spec_warnings(
    spec: &CalculationSpec,
    declared: &HashSet<&str>,
    output: Option<&str>,
    warnings: &mut Vec<IntegrityWarning>,
) {
    if !spec.is_usable() {
        warnings.push(IntegrityWarning::UnusableCalculation {
            output: output.map(str::to_string),
        });
        return;
    }
    for identifier in spec_identifiers(spec) {
        if !declared.contains(identifier.as_str()) {
            warnings.push(IntegrityWarning::UndeclaredIdentifier {
                identifier,
                output: output.map(str::to_string),
            });
        }
    }
}
