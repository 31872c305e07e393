//! Calculation data model: specs, input values, evaluation results, errors.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Input values keyed by input descriptor id, in insertion order.
pub type InputValueMap = IndexMap<String, InputValue>;

/// One `if`/`then` pair of a conditional calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Expression tested for truthiness.
    #[serde(rename = "if")]
    pub if_expr: String,

    /// Expression evaluated and returned when `if_expr` is truthy.
    #[serde(rename = "then")]
    pub then_expr: String,
}

impl Condition {
    pub fn new(if_expr: impl Into<String>, then_expr: impl Into<String>) -> Self {
        Self {
            if_expr: if_expr.into(),
            then_expr: then_expr.into(),
        }
    }
}

/// How a prototype turns inputs into outputs.
///
/// Wire shapes:
/// - `{"type": "formula", "formula": "<expr>", "description": "..."}`
/// - `{"type": "conditional", "conditions": [{"if": "<expr>", "then": "<expr>"}]}`
/// - a bare string, or an object carrying only `description` (legacy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCalculation", into = "RawCalculation")]
pub enum CalculationSpec {
    /// A single expression over the input ids.
    Formula {
        expression: String,
        description: Option<String>,
    },

    /// Conditions tried in order; the first truthy one wins.
    Conditional { conditions: Vec<Condition> },

    /// Free text, handled by the keyword heuristic.
    Descriptive { text: String },

    /// A calculation object with nothing the evaluator can run. Only
    /// produced by [`deserialize_calculation`]; keeps the `type` tag it had.
    Unusable { kind: Option<String> },
}

impl CalculationSpec {
    pub fn formula(expression: impl Into<String>) -> Self {
        Self::Formula {
            expression: expression.into(),
            description: None,
        }
    }

    pub fn conditional(conditions: Vec<Condition>) -> Self {
        Self::Conditional { conditions }
    }

    pub fn descriptive(text: impl Into<String>) -> Self {
        Self::Descriptive { text: text.into() }
    }

    /// The wire `type` tag for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Formula { .. } => "formula",
            Self::Conditional { .. } => "conditional",
            Self::Descriptive { .. } => "descriptive",
            Self::Unusable { .. } => "unusable",
        }
    }

    /// Every expression this spec evaluates, in evaluation order.
    pub fn expressions(&self) -> Vec<&str> {
        match self {
            Self::Formula { expression, .. } => vec![expression.as_str()],
            Self::Conditional { conditions } => conditions
                .iter()
                .flat_map(|c| [c.if_expr.as_str(), c.then_expr.as_str()])
                .collect(),
            Self::Descriptive { .. } | Self::Unusable { .. } => Vec::new(),
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self, Self::Unusable { .. })
    }
}

/// Decode an optional calculation field without rejecting it.
///
/// A present value that does not decode as a formula, conditional or
/// description becomes [`CalculationSpec::Unusable`], so only the outputs
/// relying on it are affected. Use with `#[serde(deserialize_with)]`.
pub fn deserialize_calculation<'de, D>(deserializer: D) -> Result<Option<CalculationSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);
    match serde_json::from_value(value) {
        Ok(spec) => Ok(Some(spec)),
        Err(e) => {
            debug!(error = %e, "calculation kept as unusable");
            Ok(Some(CalculationSpec::Unusable { kind }))
        }
    }
}

/// Untyped wire form, decoded once into [`CalculationSpec`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawCalculation {
    Text(String),
    Object(RawCalculationObject),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawCalculationObject {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    formula: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions: Option<Vec<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TryFrom<RawCalculation> for CalculationSpec {
    type Error = SpecError;

    fn try_from(raw: RawCalculation) -> Result<Self, Self::Error> {
        let obj = match raw {
            RawCalculation::Text(text) => return Ok(Self::Descriptive { text }),
            RawCalculation::Object(obj) => obj,
        };

        let description = obj.description.filter(|d| !d.trim().is_empty());
        match (obj.kind.as_deref(), obj.formula, obj.conditions) {
            (Some("formula"), Some(formula), _) if !formula.trim().is_empty() => {
                Ok(Self::Formula {
                    expression: formula,
                    description,
                })
            }
            (Some("conditional"), _, Some(conditions)) => Ok(Self::Conditional { conditions }),
            _ => match description {
                Some(text) => Ok(Self::Descriptive { text }),
                None => Err(SpecError::NoUsableLogic),
            },
        }
    }
}

impl From<CalculationSpec> for RawCalculation {
    fn from(spec: CalculationSpec) -> Self {
        match spec {
            CalculationSpec::Formula {
                expression,
                description,
            } => Self::Object(RawCalculationObject {
                kind: Some("formula".into()),
                formula: Some(expression),
                description,
                ..Default::default()
            }),
            CalculationSpec::Conditional { conditions } => Self::Object(RawCalculationObject {
                kind: Some("conditional".into()),
                conditions: Some(conditions),
                ..Default::default()
            }),
            CalculationSpec::Descriptive { text } => Self::Text(text),
            CalculationSpec::Unusable { kind } => Self::Object(RawCalculationObject {
                kind,
                ..Default::default()
            }),
        }
    }
}

/// A value entered by the user for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
    Null,
}

impl InputValue {
    /// `true` for values that count as "not yet entered": null, the empty
    /// string, and non-finite numbers.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => !n.is_finite(),
        }
    }

    /// The value as a finite number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A runtime value produced by expression evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Truthiness: `false`, `null`, `0` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

/// A fixed placeholder shown in place of a value that could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// A formula or `then` expression failed to evaluate.
    InvalidCalculation,
    /// No condition of a conditional spec was truthy.
    NoConditionMatched,
    /// The heuristic needs at least two numeric inputs.
    NeedTwoNumbers,
    /// No input has been entered yet.
    AwaitingInput,
    /// The prototype declares no calculation at all.
    NoCalculation,
    /// A calculation is declared but carries no usable logic.
    NoCalculationLogic,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCalculation => "Invalid calculation - check inputs",
            Self::NoConditionMatched => "No condition matched",
            Self::NeedTwoNumbers => "Enter two numbers",
            Self::AwaitingInput => "Enter inputs above to see results",
            Self::NoCalculation => "No calculation defined",
            Self::NoCalculationLogic => "No calculation logic available",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a spec: a value or a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Value(Value),
    Failed(Sentinel),
}

impl Evaluation {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The display string for this outcome.
    pub fn display(&self) -> String {
        match self {
            Self::Value(v) => crate::format::display(v),
            Self::Failed(s) => s.to_string(),
        }
    }
}

/// Why an expression failed to evaluate. Never escapes [`crate::engine::evaluate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unresolved identifier: {0}")]
    UnresolvedIdentifier(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("cannot apply '{op}' to {lhs} and {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("cannot apply '{op}' to {operand}")]
    UnaryTypeMismatch {
        op: &'static str,
        operand: &'static str,
    },

    #[error("result is not a finite number")]
    NonFinite,

    #[error("expression evaluated to null")]
    NullResult,
}

/// Errors decoding or loading a calculation spec.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("calculation has no usable logic (expected a formula, conditions, or a description)")]
    NoUsableLogic,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
