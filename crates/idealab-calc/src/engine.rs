//! Evaluate calculation specs: input substitution, formula and conditional
//! evaluation, identifier extraction.

use std::collections::BTreeSet;

use tracing::debug;

use crate::expr::{self, is_ident_cont, is_ident_start};
use crate::heuristic;
use crate::types::{
    CalculationSpec, Condition, EvalError, Evaluation, InputValue, InputValueMap, Sentinel, Value,
};

/// Evaluate a spec against the current inputs. Never fails: evaluation
/// problems come back as [`Evaluation::Failed`].
pub fn evaluate(spec: &CalculationSpec, inputs: &InputValueMap) -> Evaluation {
    match spec {
        CalculationSpec::Formula { expression, .. } => match evaluate_expression(expression, inputs) {
            Ok(value) => Evaluation::Value(value),
            Err(e) => {
                debug!(%expression, error = %e, "formula evaluation failed");
                Evaluation::Failed(Sentinel::InvalidCalculation)
            }
        },
        CalculationSpec::Conditional { conditions } => evaluate_conditions(conditions, inputs),
        CalculationSpec::Descriptive { text } => heuristic::infer(text, inputs),
        CalculationSpec::Unusable { .. } => Evaluation::Failed(Sentinel::NoCalculationLogic),
    }
}

/// Substitute inputs into `expression`, then parse and evaluate it.
///
/// A `null` result counts as a failure.
pub fn evaluate_expression(expression: &str, inputs: &InputValueMap) -> Result<Value, EvalError> {
    let concrete = substitute_inputs(expression, inputs);
    match expr::parse(&concrete)?.evaluate()? {
        Value::Null => Err(EvalError::NullResult),
        value => Ok(value),
    }
}

/// Try each condition in order; the first truthy `if` has its `then`
/// evaluated. A failing `if` counts as not truthy, and a failing `then`
/// leaves the spec without a match.
fn evaluate_conditions(conditions: &[Condition], inputs: &InputValueMap) -> Evaluation {
    for condition in conditions {
        match evaluate_expression(&condition.if_expr, inputs) {
            Ok(v) if v.is_truthy() => {}
            Ok(_) => continue,
            Err(e) => {
                debug!(expression = %condition.if_expr, error = %e, "condition skipped");
                continue;
            }
        }
        return match evaluate_expression(&condition.then_expr, inputs) {
            Ok(value) => Evaluation::Value(value),
            Err(e) => {
                debug!(expression = %condition.then_expr, error = %e, "branch evaluation failed");
                Evaluation::Failed(Sentinel::NoConditionMatched)
            }
        };
    }
    Evaluation::Failed(Sentinel::NoConditionMatched)
}

/// Replace identifiers that name a non-blank input with a literal.
///
/// Numbers become bare numeric literals, text becomes a double-quoted
/// literal with `\` and `"` escaped. Blank or unknown identifiers are left
/// as-is. String literals in the expression are never touched.
pub fn substitute_inputs(expression: &str, inputs: &InputValueMap) -> String {
    let mut out = String::with_capacity(expression.len());
    for segment in segments(expression) {
        match segment {
            Segment::Ident(name) => match inputs.get(name) {
                Some(value) if !value.is_blank() => push_literal(&mut out, value),
                _ => out.push_str(name),
            },
            Segment::Other(text) => out.push_str(text),
        }
    }
    out
}

/// All identifiers an expression mentions, sorted, keywords excluded.
pub fn referenced_identifiers(expression: &str) -> Vec<String> {
    let mut names = BTreeSet::new();
    collect_identifiers(expression, &mut names);
    names.into_iter().collect()
}

/// All identifiers mentioned anywhere in a spec, sorted.
pub fn spec_identifiers(spec: &CalculationSpec) -> Vec<String> {
    let mut names = BTreeSet::new();
    for expression in spec.expressions() {
        collect_identifiers(expression, &mut names);
    }
    names.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

const KEYWORDS: &[&str] = &["true", "false", "null"];

fn collect_identifiers(expression: &str, names: &mut BTreeSet<String>) {
    for segment in segments(expression) {
        if let Segment::Ident(name) = segment {
            if !KEYWORDS.contains(&name) {
                names.insert(name.to_string());
            }
        }
    }
}

fn push_literal(out: &mut String, value: &InputValue) {
    match value {
        InputValue::Number(n) => out.push_str(&n.to_string()),
        InputValue::Text(s) => {
            out.push('"');
            for c in s.chars() {
                if c == '\\' || c == '"' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        }
        InputValue::Null => out.push_str("null"),
    }
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Ident(&'a str),
    Other(&'a str),
}

/// Split an expression into identifiers and everything else. Quoted
/// strings and number runs (including exponents like `1e5`) are opaque.
fn segments(src: &str) -> Vec<Segment<'_>> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if is_ident_start(c) {
            if start < i {
                out.push(Segment::Other(&src[start..i]));
            }
            let mut end = i + 1;
            while end < bytes.len() && is_ident_cont(bytes[end] as char) {
                end += 1;
            }
            out.push(Segment::Ident(&src[i..end]));
            i = end;
            start = end;
        } else if c == '"' || c == '\'' {
            i = skip_string(bytes, i);
        } else if c.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'.') {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    if start < bytes.len() {
        out.push(Segment::Other(&src[start..]));
    }
    out
}

/// Index just past the string literal opened at `open`, or the end of input.
fn skip_string(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
