use serde::{Deserialize, Serialize};
use crate::models::domain::{Candidate, MatchResult};

/// Response for the match endpoint, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

/// One unparsed comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComparison {
    pub candidate: Candidate,
    pub ai_raw_response: Option<String>,
}

/// Response for the raw comparison endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMatchResponse {
    pub results: Vec<RawComparison>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub llm_enabled: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
