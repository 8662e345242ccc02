//! Hackmatch - hackathon teammate matching service
//!
//! A text-generation model judges pairwise compatibility; the judgment is
//! extracted from free text, corrected by deterministic guardrails and a
//! stable jitter, and ranked.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{extract_json_block, apply_guardrails, stable_jitter, Collaborator, Matcher, MatcherConfig};
pub use models::{Candidate, JudgmentMode, MatchResult, MatchResponse, Profile, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let block = extract_json_block("```json\n{\"score\": 1}\n```");
        assert!(block.is_some());
        assert!(stable_jitter("a", "b", 3).abs() <= 3);
    }
}
