//! Terminal rendering for idealab.
//!
//! Colors follow the usual conventions (`NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, TTY detection) and fall back to plain text.

pub mod styles;
pub mod terminal;
pub mod views;
