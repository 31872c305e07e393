//! Resume roast results.

use idealab_recovery::RecoveredObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{non_blank, text_or};

const FALLBACK_GRADE: &str = "C";
const FALLBACK_ROAST: &str = "Unable to generate roast. Please try again.";
const FALLBACK_PROBLEM: &str = "❌ Unable to generate specific fixes";
const FALLBACK_FIX: &str = "✅ Please try submitting your resume again";
const FALLBACK_STRENGTH: &str = "✅ Resume submitted successfully";
const FALLBACK_NEXT_STEPS: &str =
    "Review the feedback above and work on the specific improvements mentioned.";

/// A before/after rewrite of one resume line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoastFix {
    pub problem: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRoast {
    pub grade: String,
    pub roast: String,
    pub fixes: Vec<RoastFix>,
    pub strengths: Vec<String>,
    pub next_steps: String,
}

impl ResumeRoast {
    /// Build a roast from a recovered object. Absent or empty fields fall
    /// back to fixed messages so the result is always renderable.
    pub fn from_recovered(obj: &RecoveredObject) -> Self {
        let mut fixes: Vec<RoastFix> = array(obj, "fixes")
            .iter()
            .filter_map(|item| {
                let item = item.as_object()?;
                let problem = item.get("problem").and_then(non_blank);
                let fix = item.get("fix").and_then(non_blank);
                if problem.is_none() && fix.is_none() {
                    return None;
                }
                Some(RoastFix {
                    problem: problem.unwrap_or_default(),
                    fix: fix.unwrap_or_default(),
                })
            })
            .collect();
        if fixes.is_empty() {
            fixes.push(RoastFix {
                problem: FALLBACK_PROBLEM.to_string(),
                fix: FALLBACK_FIX.to_string(),
            });
        }

        let mut strengths: Vec<String> = array(obj, "strengths")
            .iter()
            .filter_map(non_blank)
            .collect();
        if strengths.is_empty() {
            strengths.push(FALLBACK_STRENGTH.to_string());
        }

        Self {
            grade: text_or(obj, "grade", FALLBACK_GRADE),
            roast: text_or(obj, "roast", FALLBACK_ROAST),
            fixes,
            strengths,
            next_steps: text_or(obj, "nextSteps", FALLBACK_NEXT_STEPS),
        }
    }
}

fn array<'a>(obj: &'a RecoveredObject, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
