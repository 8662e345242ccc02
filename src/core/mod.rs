// Core algorithm exports
pub mod extract;
pub mod guardrails;
pub mod jitter;
pub mod judgment;
pub mod matcher;
pub mod prompt;
pub mod scoring;

pub use extract::{extract_json_block, ExtractedBlock};
pub use guardrails::{apply_guardrails, Overlap};
pub use jitter::stable_jitter;
pub use judgment::{judge_response, parse_judgment, JudgmentSource, ParsedJudgment};
pub use matcher::{Collaborator, Matcher, MatcherConfig};
pub use prompt::build_prompt;
pub use scoring::{combined_score, final_score};
