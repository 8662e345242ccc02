use serde_json::{Map, Value};

use crate::core::extract::{extract_json_block, ExtractedBlock};

/// Score substituted for any field the model failed to provide
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Placeholder when the explanation is missing or not a string
pub const NO_EXPLANATION: &str = "No explanation";

/// How a judgment was obtained from the raw response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgmentSource {
    /// A block was extracted and decoded into an object
    Parsed,
    /// No balanced object was present in the response
    NoBlock,
    /// A block was present but was not a valid JSON object
    DecodeFailed,
}

/// Typed view of one pairwise model judgment
///
/// Every field is always populated; anything the model left out or mangled
/// is replaced by [`NEUTRAL_SCORE`] or [`NO_EXPLANATION`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedJudgment {
    pub role: f64,
    pub skill: f64,
    pub interest: f64,
    pub availability: f64,
    /// `overall_score`, or the bare `score` of the minimal shape
    pub overall: f64,
    pub explanation: String,
    pub source: JudgmentSource,
}

impl ParsedJudgment {
    pub fn neutral(explanation: impl Into<String>, source: JudgmentSource) -> Self {
        Self {
            role: NEUTRAL_SCORE,
            skill: NEUTRAL_SCORE,
            interest: NEUTRAL_SCORE,
            availability: NEUTRAL_SCORE,
            overall: NEUTRAL_SCORE,
            explanation: explanation.into(),
            source,
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let overall = numeric_field(object, "overall_score")
            .or_else(|| numeric_field(object, "score"))
            .unwrap_or(NEUTRAL_SCORE);

        let explanation = match object.get("explanation") {
            Some(Value::String(text)) => text.clone(),
            _ => NO_EXPLANATION.to_string(),
        };

        Self {
            role: numeric_field(object, "role_score").unwrap_or(NEUTRAL_SCORE),
            skill: numeric_field(object, "skill_score").unwrap_or(NEUTRAL_SCORE),
            interest: numeric_field(object, "interest_score").unwrap_or(NEUTRAL_SCORE),
            availability: numeric_field(object, "availability_score").unwrap_or(NEUTRAL_SCORE),
            overall,
            explanation,
            source: JudgmentSource::Parsed,
        }
    }
}

/// Decode an extracted block. Never fails.
pub fn parse_judgment(block: &ExtractedBlock) -> ParsedJudgment {
    match serde_json::from_str::<Value>(block.as_str()) {
        Ok(Value::Object(object)) => ParsedJudgment::from_object(&object),
        Ok(other) => ParsedJudgment::neutral(
            format!("Model judgment was not an object: {}", type_name(&other)),
            JudgmentSource::DecodeFailed,
        ),
        Err(e) => {
            tracing::debug!("Failed to decode extracted judgment: {}", e);
            ParsedJudgment::neutral(
                format!("Could not decode model judgment: {}", e),
                JudgmentSource::DecodeFailed,
            )
        }
    }
}

/// Extract and decode a raw model response in one step
pub fn judge_response(raw: &str) -> ParsedJudgment {
    match extract_json_block(raw) {
        Some(block) => parse_judgment(&block),
        None => ParsedJudgment::neutral(
            "No structured judgment found in model response",
            JudgmentSource::NoBlock,
        ),
    }
}

/// Coerce a field to a finite number; numeric strings are accepted
fn numeric_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    value.is_finite().then_some(value)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
