// Model exports
pub mod domain;
pub mod responses;

pub use domain::{Candidate, JudgmentMode, MatchResult, Profile, ScoringWeights};
pub use responses::{ErrorResponse, HealthResponse, MatchResponse, RawComparison, RawMatchResponse};
