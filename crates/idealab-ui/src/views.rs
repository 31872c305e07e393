//! Plain-text views of forms, ideas, roasts and prototypes.
//!
//! Every view returns a `String` so the CLI decides where it goes and tests
//! can assert on content.

use std::fmt::Write as _;

use idealab_calc::format::format_number;
use idealab_calc::types::InputValue;
use idealab_core::descriptor::InputKind;
use idealab_core::idea::{GeneratedIdea, ScoreField};
use idealab_core::prototype::{GeneratedPrototype, PrototypeConfig};
use idealab_core::roast::ResumeRoast;
use idealab_core::validation::IntegrityWarning;
use idealab_form::FormSession;

use crate::styles::{
    render_bold, render_evaluation, render_grade, render_heading, render_muted, render_rice,
    render_score, render_separator, render_warn, render_warn_icon,
};
use crate::terminal::text_width;

/// Greedy word wrap. Existing line breaks are kept.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

fn push_wrapped(out: &mut String, text: &str, indent: &str) {
    let width = text_width().saturating_sub(indent.len());
    for line in wrap(text, width) {
        let _ = writeln!(out, "{indent}{line}");
    }
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    let _ = writeln!(out, "{}", render_heading(heading));
    push_wrapped(out, body, "  ");
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Prototype form
// ---------------------------------------------------------------------------

/// Header, current input values and every output's display string.
pub fn render_form(session: &FormSession) -> String {
    let config = session.config();
    let mut out = String::new();
    render_config_header(&mut out, config);

    let _ = writeln!(out, "{}", render_heading("Inputs"));
    for input in &config.inputs {
        let value = session
            .inputs()
            .get(&input.id)
            .filter(|v| !v.is_blank())
            .map(|v| render_bold(&input_text(v)))
            .unwrap_or_else(|| {
                render_muted(input.placeholder.as_deref().unwrap_or("(empty)"))
            });
        let _ = writeln!(out, "  {}: {}", input.label, value);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", render_heading("Results"));
    for output in &config.outputs {
        let shown = match session.evaluation(&output.id) {
            Some(evaluation) => render_evaluation(evaluation),
            None => render_muted(session.display(&output.id).unwrap_or_default()),
        };
        let _ = writeln!(out, "  {}: {}", output.label, shown);
    }

    if !config.upsell_message.trim().is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", render_separator());
        push_wrapped(&mut out, &config.upsell_message, "");
    }
    out
}

fn input_text(value: &InputValue) -> String {
    match value {
        InputValue::Number(n) => format_number(*n),
        InputValue::Text(s) => s.clone(),
        InputValue::Null => String::new(),
    }
}

fn render_config_header(out: &mut String, config: &PrototypeConfig) {
    let _ = writeln!(out, "{}", render_bold(&config.title));
    if !config.description.trim().is_empty() {
        push_wrapped(out, &config.description, "");
    }
    out.push('\n');
}

/// Summary of a prototype config: fields, outputs and calculation kind.
pub fn render_prototype(prototype: &GeneratedPrototype) -> String {
    let config = &prototype.prototype_config;
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_heading(&prototype.tab_name));
    render_config_header(&mut out, config);

    let _ = writeln!(out, "{}", render_heading("Inputs"));
    for input in &config.inputs {
        let mut line = format!("  {} ({}, {})", input.label, input.id, input.kind);
        if input.kind == InputKind::Select {
            if let Some(options) = &input.options {
                let _ = write!(line, ": {}", options.join(" | "));
            }
        }
        let _ = writeln!(out, "{line}");
    }
    out.push('\n');

    let _ = writeln!(out, "{}", render_heading("Outputs"));
    for output in &config.outputs {
        let _ = writeln!(out, "  {} ({}, {})", output.label, output.id, output.kind);
    }
    out.push('\n');

    match &config.calculation {
        Some(spec) => {
            let _ = writeln!(out, "{} {}", render_heading("Calculation"), spec.kind());
            for expression in spec.expressions() {
                let _ = writeln!(out, "  {}", render_muted(expression));
            }
        }
        None => {
            let _ = writeln!(out, "{} none", render_heading("Calculation"));
        }
    }

    if !config.upsell_message.trim().is_empty() {
        out.push('\n');
        push_section(&mut out, "Upsell", &config.upsell_message);
    }
    out
}

// ---------------------------------------------------------------------------
// Idea and roast
// ---------------------------------------------------------------------------

/// Full idea write-up with the RICE breakdown.
pub fn render_idea(title: &str, idea: &GeneratedIdea) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  {}",
        render_bold(title.trim()),
        render_rice(&idea.scores)
    );
    out.push('\n');

    push_section(&mut out, "User need", &idea.user_need);
    push_section(&mut out, "Why it wins", &idea.why_it_wins);
    push_section(&mut out, "SEO", &idea.seo_ability);
    push_section(&mut out, "Virality", &idea.virality);
    push_section(&mut out, "Upsell", &idea.upsell);
    push_section(&mut out, "Data needs", &idea.data_needs);

    let _ = writeln!(out, "{}", render_heading("Scores"));
    for field in ScoreField::ALL {
        let _ = writeln!(out, "  {}", render_score(&idea.scores, field));
        push_wrapped(&mut out, idea.reasoning.get(field), "    ");
    }
    out
}

pub fn render_roast(roast: &ResumeRoast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grade: {}", render_grade(&roast.grade));
    out.push('\n');
    push_section(&mut out, "The roast", &roast.roast);

    if !roast.fixes.is_empty() {
        let _ = writeln!(out, "{}", render_heading("Fixes"));
        for (i, fix) in roast.fixes.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, fix.problem);
            push_wrapped(&mut out, &fix.fix, "     ");
        }
        out.push('\n');
    }

    if !roast.strengths.is_empty() {
        let _ = writeln!(out, "{}", render_heading("Strengths"));
        for strength in &roast.strengths {
            let _ = writeln!(out, "  - {strength}");
        }
        out.push('\n');
    }

    push_section(&mut out, "Next steps", &roast.next_steps);
    out
}

/// One line per warning, or nothing.
pub fn render_warnings(warnings: &[IntegrityWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!("{} {}\n", render_warn_icon(), render_warn(&w.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use idealab_calc::types::CalculationSpec;
    use idealab_core::descriptor::{InputDescriptor, OutputDescriptor, OutputKind};
    use idealab_core::idea::{Reasoning, Scores};
    use idealab_core::roast::RoastFix;
    use pretty_assertions::assert_eq;

    fn config() -> PrototypeConfig {
        PrototypeConfig {
            title: "Salary Calculator".into(),
            description: "Yearly to monthly".into(),
            inputs: vec![InputDescriptor::new("salary", "Salary", InputKind::Number)],
            outputs: vec![OutputDescriptor::new("monthly", "Monthly", OutputKind::Number)],
            calculation: Some(CalculationSpec::formula("salary / 12")),
            upsell_message: "Save your results".into(),
        }
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn form_before_and_after_input() {
        let mut session = FormSession::new(config()).unwrap();
        let before = render_form(&session);
        assert!(before.contains("Salary Calculator"));
        assert!(before.contains("Enter inputs above to see results"));
        assert!(before.contains("Save your results"));

        session.apply_edit("salary", "60000").unwrap();
        let after = render_form(&session);
        assert!(after.contains("60,000"));
        assert!(after.contains("5,000"));
    }

    #[test]
    fn prototype_summary() {
        let prototype = GeneratedPrototype {
            tab_name: "💰 Salary".into(),
            prototype_config: config(),
            prototype_code: String::new(),
        };
        let text = render_prototype(&prototype);
        assert!(text.contains("💰 Salary"));
        assert!(text.contains("Salary (salary, number)"));
        assert!(text.contains("salary / 12"));
    }

    #[test]
    fn idea_lists_every_score() {
        let idea = GeneratedIdea {
            user_need: "Know my worth".into(),
            seo_ability: "High".into(),
            virality: "Shareable".into(),
            upsell: "Save it".into(),
            data_needs: "Salary data".into(),
            why_it_wins: "Nobody else does it".into(),
            scores: Scores::default(),
            reasoning: Reasoning::default(),
        };
        let text = render_idea("Salary Check", &idea);
        assert!(text.contains("Salary Check"));
        for field in ScoreField::ALL {
            assert!(text.contains(field.as_str()));
        }
        assert!(text.contains("To be determined"));
    }

    #[test]
    fn roast_numbers_fixes() {
        let roast = ResumeRoast {
            grade: "C".into(),
            roast: "Bland.".into(),
            fixes: vec![RoastFix {
                problem: "Helped customers".into(),
                fix: "Served 200 customers a day".into(),
            }],
            strengths: vec!["Clear layout".into()],
            next_steps: "Add numbers".into(),
        };
        let text = render_roast(&roast);
        assert!(text.contains("1. Helped customers"));
        assert!(text.contains("- Clear layout"));
        assert!(text.contains("Add numbers"));
    }

    #[test]
    fn warnings_one_per_line() {
        let warnings = vec![IntegrityWarning::NoCalculation {
            output: "total".into(),
        }];
        let text = render_warnings(&warnings);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("output 'total' has no calculation"));
        assert_eq!(render_warnings(&[]), "");
    }
}
