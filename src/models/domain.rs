use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Hackathon participant as submitted by the caller and stored in the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(custom(function = "not_blank"))]
    pub hackathon: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub blurb: String,
}

impl Profile {
    /// Projection returned to callers, without the hackathon scope
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            name: self.name.clone(),
            contact: self.contact.clone(),
            roles: self.roles.clone(),
            skills: self.skills.clone(),
            interests: self.interests.clone(),
            availability: self.availability.clone(),
            blurb: self.blurb.clone(),
        }
    }
}

/// Pool scoping and self-exclusion key on these values, so whitespace alone is rejected
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Candidate view of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub contact: String,
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub availability: String,
    pub blurb: String,
}

/// Final ranked result for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: Candidate,
    pub score: u8,
    pub explanation: String,
    pub ai_raw_response: Option<String>,
}

/// Which judgment shape the text-generation collaborator is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgmentMode {
    /// `{"score", "explanation"}`
    Minimal,
    /// Four sub-scores plus overall, scale and explanation
    #[default]
    Detailed,
}

/// Sub-score weights for the detailed composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub role: f64,
    pub skill: f64,
    pub interest: f64,
    pub availability: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.role + self.skill + self.interest + self.availability
    }

    /// Rescale so the weights sum to 1.0. Negative weights are treated as zero;
    /// an all-zero set falls back to the defaults.
    pub fn normalized(self) -> Self {
        let clamped = Self {
            role: self.role.max(0.0),
            skill: self.skill.max(0.0),
            interest: self.interest.max(0.0),
            availability: self.availability.max(0.0),
        };

        let total = clamped.total();
        if total <= f64::EPSILON {
            return Self::default();
        }

        Self {
            role: clamped.role / total,
            skill: clamped.skill / total,
            interest: clamped.interest / total,
            availability: clamped.availability / total,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            role: 0.30,
            skill: 0.45,
            interest: 0.15,
            availability: 0.10,
        }
    }
}
