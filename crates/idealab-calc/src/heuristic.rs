//! Keyword heuristic for specs that only carry a free-text description.
//!
//! Cue categories are tested in a fixed order (multiply, add, divide,
//! subtract) by plain substring match on the lower-cased description, and the
//! first category that matches decides the operation. Short cues such as
//! `"x"` and `"per"` also match inside longer words; that is part of the
//! contract, not an accident to fix here.

use crate::types::{Evaluation, InputValueMap, Sentinel, Value};

const MULTIPLY_CUES: &[&str] = &["multiply", "times", "x"];
const ADD_CUES: &[&str] = &["add", "sum", "plus", "+"];
const DIVIDE_CUES: &[&str] = &["divide", "per", "/"];
const SUBTRACT_CUES: &[&str] = &["subtract", "minus", "-"];

/// Operation inferred from a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Multiply,
    Add,
    Divide,
    Subtract,
}

/// The first cue category present in `description`, in precedence order.
pub fn detect_cue(description: &str) -> Option<Cue> {
    let desc = description.to_lowercase();
    let has = |cues: &[&str]| cues.iter().any(|cue| desc.contains(cue));

    if has(MULTIPLY_CUES) {
        Some(Cue::Multiply)
    } else if has(ADD_CUES) {
        Some(Cue::Add)
    } else if has(DIVIDE_CUES) {
        Some(Cue::Divide)
    } else if has(SUBTRACT_CUES) {
        Some(Cue::Subtract)
    } else {
        None
    }
}

/// Finite numeric inputs in insertion order.
pub fn numeric_inputs(inputs: &InputValueMap) -> Vec<f64> {
    inputs.values().filter_map(|v| v.as_number()).collect()
}

/// Infer a result from a description and the current numeric inputs.
///
/// Quotients are always shown with two decimals, so they come back as text.
/// Without a recognised cue the description itself is returned.
pub fn infer(description: &str, inputs: &InputValueMap) -> Evaluation {
    let nums = numeric_inputs(inputs);
    let result = match detect_cue(description) {
        Some(Cue::Multiply) => nums.iter().product(),
        Some(Cue::Add) => nums.iter().sum(),
        Some(Cue::Divide) => match nums.as_slice() {
            [a, b, ..] if *b != 0.0 && (a / b).is_finite() => {
                return Evaluation::Value(Value::Text(format!("{:.2}", a / b)));
            }
            [_, b, ..] if *b != 0.0 => return Evaluation::Failed(Sentinel::InvalidCalculation),
            _ => return Evaluation::Failed(Sentinel::NeedTwoNumbers),
        },
        Some(Cue::Subtract) => match nums.as_slice() {
            [a, b, ..] => a - b,
            _ => return Evaluation::Failed(Sentinel::NeedTwoNumbers),
        },
        None => return Evaluation::Value(Value::Text(description.to_string())),
    };

    if result.is_finite() {
        Evaluation::Value(Value::Number(result))
    } else {
        Evaluation::Failed(Sentinel::InvalidCalculation)
    }
}
