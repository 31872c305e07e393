//! Prompt text for each generation pipeline.
//!
//! Every prompt spells out the JSON shape expected back; the field names
//! match what the schemas in `idealab-core` read.

const AUDIENCE: &str = "The audience is early career job seekers (Gen Z).";

/// Prompt for fleshing out an idea from its title.
pub fn idea_prompt(title: &str, user_need: Option<&str>) -> String {
    let need = user_need
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!("Description / user need: {}\n", n.trim()))
        .unwrap_or_default();

    format!(
        r#"Do some preliminary research on the product idea below and assess it: why it wins, SEO potential, virality, an upsell or hook, the data it needs, and a RICE score for each dimension.

Project name: {title}
{need}
Reply with a JSON object of exactly this shape:
{{
  "userNeed": "the user need or problem this solves",
  "seoAbility": "SEO potential with concrete keywords and search volume notes",
  "virality": "what would make people share it",
  "upsell": "the hook that turns a free user into an account",
  "dataNeeds": "the data sources required to build it",
  "whyItWins": "the key strategic insight behind the idea",
  "reach": <integer 1-10>,
  "impact": <integer 1-10>,
  "confidence": <integer 1-10>,
  "effort": <integer 1-10>,
  "reasoning": {{
    "reach": "why this reach score",
    "impact": "why this impact score",
    "confidence": "why this confidence score",
    "effort": "why this effort score"
  }}
}}

{AUDIENCE} Be specific and actionable."#,
        title = title.trim(),
    )
}

/// Prompt for turning a user need into an interactive prototype config.
pub fn prototype_prompt(user_need: &str, title: Option<&str>, upsell: Option<&str>) -> String {
    let mut context = String::new();
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        context.push_str(&format!("The idea is called \"{}\".\n", title.trim()));
    }
    if let Some(upsell) = upsell.filter(|u| !u.trim().is_empty()) {
        context.push_str(&format!("Upsell message: \"{}\".\n", upsell.trim()));
    }

    format!(
        r#"Design a small interactive web tool that addresses this user need: "{need}"
{context}
The tool must be useful immediately, have clear inputs and outputs, need no backend beyond a single calculation, and include a hook that converts free users into accounts.

Reply with ONLY a JSON object (no markdown, no commentary) of this shape:
{{
  "tabName": "short emoji-prefixed tab name",
  "prototypeConfig": {{
    "title": "main heading",
    "description": "one sentence on what the tool does",
    "inputs": [
      {{"id": "input1", "label": "Label", "type": "text|number|select|textarea", "placeholder": "hint", "options": ["only", "for", "select"]}}
    ],
    "outputs": [
      {{"id": "output1", "label": "Label", "type": "text|number|list|chart"}}
    ],
    "calculation": {{
      "type": "formula",
      "formula": "expression over the input ids, e.g. input1 * 12 or input1 > 50000 ? 'High' : 'Low'",
      "description": "what the calculation does, in plain words"
    }},
    "upsellMessage": "message that converts free users"
  }},
  "prototypeCode": "optional source for a standalone component"
}}

Formulas may only use input ids, numbers, quoted strings, parentheses and the operators + - * / % == != < > <= >= && || ! ?:.
Escape line breaks inside strings as \n; never put raw control characters inside a string value.

{AUDIENCE}"#,
        need = user_need.trim(),
    )
}

/// Prompt for a candid, funny resume review.
pub fn roast_prompt(resume: &str) -> String {
    format!(
        r#"You are a brutally honest resume reviewer with a sharp sense of humor. Roast the resume below: be direct, specific and funny, but make every criticism constructive.

Resume:
{resume}

Reply with a JSON object of this shape:
{{
  "grade": "letter grade from A+ to F",
  "roast": "two or three paragraphs of honest, witty critique",
  "fixes": [
    {{"problem": "❌ a weak line quoted from the resume", "fix": "✅ a stronger rewrite with metrics and impact"}}
  ],
  "strengths": ["✅ something done well"],
  "nextSteps": "a one or two sentence action plan"
}}

Focus on vague language, missing metrics, weak verbs and irrelevant content. Give 3-5 fixes and 2-4 strengths if there are any."#,
        resume = resume.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_prompt_includes_optional_need() {
        let with = idea_prompt("Salary Check", Some("Know my worth"));
        assert!(with.contains("Project name: Salary Check"));
        assert!(with.contains("Description / user need: Know my worth"));
        assert!(with.contains("\"whyItWins\""));

        let without = idea_prompt("Salary Check", Some("   "));
        assert!(!without.contains("Description / user need"));
    }

    #[test]
    fn prototype_prompt_context() {
        let prompt = prototype_prompt("Compare offers", Some("Offer Compare"), None);
        assert!(prompt.contains("\"Compare offers\""));
        assert!(prompt.contains("The idea is called \"Offer Compare\"."));
        assert!(!prompt.contains("Upsell message"));
        assert!(prompt.contains("\"prototypeConfig\""));
    }

    #[test]
    fn roast_prompt_embeds_resume() {
        let prompt = roast_prompt("  Jane Doe\nBarista  ");
        assert!(prompt.contains("Resume:\nJane Doe\nBarista\n"));
        assert!(prompt.contains("\"nextSteps\""));
    }
}
