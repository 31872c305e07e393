//! Calculation engine for idealab prototypes.
//!
//! A prototype carries one [`CalculationSpec`](types::CalculationSpec): a
//! formula, an ordered chain of conditions, or a free-text description. The
//! engine evaluates it against the user's current input values and always
//! yields something displayable. Failures become sentinel strings instead of
//! errors so one broken output never takes down the rest of a form.
//!
//! Formulas are parsed by a small closed grammar ([`expr`]) and walked
//! directly; nothing is handed to a general-purpose interpreter.

pub mod engine;
pub mod expr;
pub mod format;
pub mod heuristic;
pub mod parser;
pub mod types;
