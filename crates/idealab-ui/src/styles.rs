//! Color palette and styling helpers.
//!
//! Only states that need attention get color: sentinel outputs, score bands
//! and warnings. Computed values use the accent color, labels stay plain.

use idealab_calc::types::{Evaluation, Sentinel};
use idealab_core::idea::{Band, ScoreField, Scores};
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Palette (RGB)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // blue

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠

pub const SEPARATOR_LIGHT: &str = "────────────────────────────────────────";

// ---------------------------------------------------------------------------
// Helpers: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Section heading: bold accent.
pub fn render_heading(s: &str) -> String {
    color_bold_str(s, ACCENT)
}

pub fn render_separator() -> String {
    render_muted(SEPARATOR_LIGHT)
}

pub fn render_pass_icon() -> String {
    render_pass(ICON_PASS)
}

pub fn render_warn_icon() -> String {
    render_warn(ICON_WARN)
}

// ---------------------------------------------------------------------------
// Domain renderers
// ---------------------------------------------------------------------------

/// An output's display string, colored by outcome.
///
/// The enter-inputs placeholder is muted; input-related sentinels are
/// warnings; broken or missing calculations are failures.
pub fn render_evaluation(evaluation: &Evaluation) -> String {
    let text = evaluation.display();
    match evaluation {
        Evaluation::Value(_) => render_accent(&text),
        Evaluation::Failed(Sentinel::AwaitingInput) => render_muted(&text),
        Evaluation::Failed(Sentinel::NeedTwoNumbers | Sentinel::NoConditionMatched) => {
            render_warn(&text)
        }
        Evaluation::Failed(
            Sentinel::InvalidCalculation | Sentinel::NoCalculation | Sentinel::NoCalculationLogic,
        ) => {
            render_fail(&text)
        }
    }
}

pub fn render_band(text: &str, band: Band) -> String {
    match band {
        Band::High => render_pass(text),
        Band::Medium => render_warn(text),
        Band::Low => render_fail(text),
    }
}

/// `RICE 84`, colored by band.
pub fn render_rice(scores: &Scores) -> String {
    let rice = scores.rice();
    render_band(&format!("RICE {rice}"), Band::for_rice(rice))
}

/// `reach 8`, colored by the field's band.
pub fn render_score(scores: &Scores, field: ScoreField) -> String {
    render_band(
        &format!("{} {}", field, scores.get(field)),
        scores.band(field),
    )
}

/// Letter grades: A and B pass, C warns, anything lower fails.
pub fn render_grade(grade: &str) -> String {
    match grade.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('A' | 'B') => color_bold_str(grade, PASS),
        Some('C') => color_bold_str(grade, WARN),
        _ => color_bold_str(grade, FAIL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idealab_calc::types::Value;

    #[test]
    fn evaluation_keeps_display_text() {
        let value = render_evaluation(&Evaluation::Value(Value::Number(12000.0)));
        assert!(value.contains("12,000"));
        let failed = render_evaluation(&Evaluation::Failed(Sentinel::InvalidCalculation));
        assert!(failed.contains("Invalid calculation - check inputs"));
    }

    #[test]
    fn rice_and_scores_contain_numbers() {
        let scores = Scores {
            reach: 8,
            impact: 7,
            confidence: 6,
            effort: 4,
        };
        assert!(render_rice(&scores).contains("RICE 84"));
        assert!(render_score(&scores, ScoreField::Effort).contains("effort 4"));
    }

    #[test]
    fn grade_text_is_kept() {
        assert!(render_grade("B-").contains("B-"));
        assert!(render_grade("F").contains('F'));
    }
}
