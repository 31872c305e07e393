//! Generated product ideas and their RICE scores.

use std::fmt;

use idealab_recovery::RecoveredObject;
use serde::{Deserialize, Serialize};

use crate::schema::{non_blank, score_or, text, text_or};

const DEFAULT_REACH: u8 = 6;
const DEFAULT_IMPACT: u8 = 6;
const DEFAULT_CONFIDENCE: u8 = 5;
const DEFAULT_EFFORT: u8 = 6;

const FALLBACK_SEO: &str = "To be determined - analyze search volume";
const FALLBACK_VIRALITY: &str = "Medium - Needs unique angle for organic sharing";
const FALLBACK_UPSELL: &str = "Unlock additional features by creating a free Handshake account";
const FALLBACK_DATA_NEEDS: &str = "To be determined - assess what data sources are needed";
const FALLBACK_WHY_IT_WINS: &str = "Addresses a real pain point in the job search journey";
const FALLBACK_REASONING: &str = "To be determined";

/// One of the four RICE inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    Reach,
    Impact,
    Confidence,
    Effort,
}

impl ScoreField {
    pub const ALL: [ScoreField; 4] = [Self::Reach, Self::Impact, Self::Confidence, Self::Effort];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reach => "reach",
            Self::Impact => "impact",
            Self::Confidence => "confidence",
            Self::Effort => "effort",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic-light band used when rendering scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    /// Band for a RICE total: 80 and up is high, 40 and up is medium.
    pub fn for_rice(score: u32) -> Self {
        if score >= 80 {
            Self::High
        } else if score >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Band for a single score. Effort is inverted: lower is better.
    pub fn for_score(field: ScoreField, value: u8) -> Self {
        match field {
            ScoreField::Effort if value <= 3 => Self::High,
            ScoreField::Effort if value <= 6 => Self::Medium,
            ScoreField::Effort => Self::Low,
            _ if value >= 8 => Self::High,
            _ if value >= 5 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// RICE inputs, each in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub reach: u8,
    pub impact: u8,
    pub confidence: u8,
    pub effort: u8,
}

impl Default for Scores {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            impact: DEFAULT_IMPACT,
            confidence: DEFAULT_CONFIDENCE,
            effort: DEFAULT_EFFORT,
        }
    }
}

impl Scores {
    /// `round(reach * impact * confidence / effort)`.
    pub fn rice(&self) -> u32 {
        let product = f64::from(self.reach) * f64::from(self.impact) * f64::from(self.confidence);
        (product / f64::from(self.effort.max(1))).round() as u32
    }

    pub fn get(&self, field: ScoreField) -> u8 {
        match field {
            ScoreField::Reach => self.reach,
            ScoreField::Impact => self.impact,
            ScoreField::Confidence => self.confidence,
            ScoreField::Effort => self.effort,
        }
    }

    pub fn band(&self, field: ScoreField) -> Band {
        Band::for_score(field, self.get(field))
    }
}

/// Why each score was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub reach: String,
    pub impact: String,
    pub confidence: String,
    pub effort: String,
}

impl Default for Reasoning {
    fn default() -> Self {
        Self {
            reach: FALLBACK_REASONING.to_string(),
            impact: FALLBACK_REASONING.to_string(),
            confidence: FALLBACK_REASONING.to_string(),
            effort: FALLBACK_REASONING.to_string(),
        }
    }
}

impl Reasoning {
    pub fn get(&self, field: ScoreField) -> &str {
        match field {
            ScoreField::Reach => &self.reach,
            ScoreField::Impact => &self.impact,
            ScoreField::Confidence => &self.confidence,
            ScoreField::Effort => &self.effort,
        }
    }
}

/// A fleshed-out idea. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIdea {
    pub user_need: String,
    pub seo_ability: String,
    pub virality: String,
    pub upsell: String,
    pub data_needs: String,
    pub why_it_wins: String,
    #[serde(flatten)]
    pub scores: Scores,
    pub reasoning: Reasoning,
}

impl GeneratedIdea {
    /// Build an idea from a recovered object, filling gaps with defaults.
    ///
    /// `user_need` is the need the caller supplied, used when the object has
    /// none; after that a sentence derived from `title` is used.
    pub fn from_recovered(obj: &RecoveredObject, title: &str, user_need: Option<&str>) -> Self {
        let user_need = text(obj, "userNeed")
            .or_else(|| {
                user_need
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                format!("Solving a key problem for early career job seekers related to: {title}")
            });

        let reasoning_obj = obj.get("reasoning").and_then(|v| v.as_object());
        let reason = |key: &str| {
            reasoning_obj
                .and_then(|r| r.get(key))
                .and_then(non_blank)
                .unwrap_or_else(|| FALLBACK_REASONING.to_string())
        };

        Self {
            user_need,
            seo_ability: text_or(obj, "seoAbility", FALLBACK_SEO),
            virality: text_or(obj, "virality", FALLBACK_VIRALITY),
            upsell: text_or(obj, "upsell", FALLBACK_UPSELL),
            data_needs: text_or(obj, "dataNeeds", FALLBACK_DATA_NEEDS),
            why_it_wins: text_or(obj, "whyItWins", FALLBACK_WHY_IT_WINS),
            scores: Scores {
                reach: score_or(obj, "reach", DEFAULT_REACH),
                impact: score_or(obj, "impact", DEFAULT_IMPACT),
                confidence: score_or(obj, "confidence", DEFAULT_CONFIDENCE),
                effort: score_or(obj, "effort", DEFAULT_EFFORT),
            },
            reasoning: Reasoning {
                reach: reason("reach"),
                impact: reason("impact"),
                confidence: reason("confidence"),
                effort: reason("effort"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: serde_json::Value) -> RecoveredObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn rice_rounds() {
        let s = Scores { reach: 8, impact: 7, confidence: 6, effort: 4 };
        assert_eq!(s.rice(), 84);
        let s = Scores { reach: 5, impact: 5, confidence: 5, effort: 3 };
        assert_eq!(s.rice(), 42);
        assert_eq!(Scores::default().rice(), 30);
    }

    #[test]
    fn rice_bands() {
        assert_eq!(Band::for_rice(80), Band::High);
        assert_eq!(Band::for_rice(79), Band::Medium);
        assert_eq!(Band::for_rice(40), Band::Medium);
        assert_eq!(Band::for_rice(39), Band::Low);
    }

    #[test]
    fn effort_band_is_inverted() {
        assert_eq!(Band::for_score(ScoreField::Effort, 2), Band::High);
        assert_eq!(Band::for_score(ScoreField::Effort, 6), Band::Medium);
        assert_eq!(Band::for_score(ScoreField::Effort, 9), Band::Low);
        assert_eq!(Band::for_score(ScoreField::Reach, 9), Band::High);
        assert_eq!(Band::for_score(ScoreField::Impact, 5), Band::Medium);
        assert_eq!(Band::for_score(ScoreField::Confidence, 2), Band::Low);
    }

    #[test]
    fn complete_object_is_taken_as_is() {
        let idea = GeneratedIdea::from_recovered(
            &obj(json!({
                "userNeed": "Know what to ask for",
                "seoAbility": "High",
                "virality": "Shareable results",
                "upsell": "Save your history",
                "dataNeeds": "Salary data",
                "whyItWins": "Nobody else does it",
                "reach": 9, "impact": 8, "confidence": 7, "effort": 3,
                "reasoning": {"reach": "r", "impact": "i", "confidence": "c", "effort": "e"}
            })),
            "Salary Check",
            None,
        );
        assert_eq!(idea.user_need, "Know what to ask for");
        assert_eq!(idea.scores, Scores { reach: 9, impact: 8, confidence: 7, effort: 3 });
        assert_eq!(idea.reasoning.get(ScoreField::Effort), "e");
    }

    #[test]
    fn empty_object_gets_defaults() {
        let idea = GeneratedIdea::from_recovered(&RecoveredObject::new(), "Salary Check", None);
        assert_eq!(
            idea.user_need,
            "Solving a key problem for early career job seekers related to: Salary Check"
        );
        assert_eq!(idea.seo_ability, FALLBACK_SEO);
        assert_eq!(idea.why_it_wins, FALLBACK_WHY_IT_WINS);
        assert_eq!(idea.scores, Scores::default());
        assert_eq!(idea.reasoning, Reasoning::default());
    }

    #[test]
    fn caller_need_beats_derived_need() {
        let idea = GeneratedIdea::from_recovered(
            &obj(json!({"userNeed": ""})),
            "Salary Check",
            Some("Find fair pay"),
        );
        assert_eq!(idea.user_need, "Find fair pay");
    }

    #[test]
    fn partial_reasoning_is_filled_per_entry() {
        let idea = GeneratedIdea::from_recovered(
            &obj(json!({"reasoning": {"reach": "Every student"}})),
            "t",
            None,
        );
        assert_eq!(idea.reasoning.reach, "Every student");
        assert_eq!(idea.reasoning.impact, FALLBACK_REASONING);
    }

    #[test]
    fn serializes_flat_camel_case() {
        let idea = GeneratedIdea::from_recovered(&RecoveredObject::new(), "t", None);
        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["reach"], 6);
        assert_eq!(json["confidence"], 5);
        assert!(json.get("whyItWins").is_some());
        assert!(json.get("scores").is_none());
    }
}
