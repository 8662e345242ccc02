use crate::core::{guardrails::apply_guardrails, jitter::stable_jitter, judgment::ParsedJudgment};
use crate::models::{JudgmentMode, Profile, ScoringWeights};

/// Collapse a judgment into one composite score (not yet guarded)
///
/// Detailed mode:
/// combined = round(
///     role * 0.30 +
///     skill * 0.45 +
///     interest * 0.15 +
///     availability * 0.10
/// )
///
/// Minimal mode uses the model's single `score` as-is, rounded.
/// Exact halves round to even.
pub fn combined_score(
    judgment: &ParsedJudgment,
    mode: JudgmentMode,
    weights: &ScoringWeights,
) -> f64 {
    let raw = match mode {
        JudgmentMode::Minimal => judgment.overall,
        JudgmentMode::Detailed => {
            judgment.role * weights.role
                + judgment.skill * weights.skill
                + judgment.interest * weights.interest
                + judgment.availability * weights.availability
        }
    };

    raw.round_ties_even()
}

/// Guardrail, then jitter, then clamp to 0..=100
pub fn final_score(submitter: &Profile, candidate: &Profile, combined: f64, spread: u8) -> u8 {
    let guarded = apply_guardrails(submitter, candidate, combined) as i32;
    let jitter = stable_jitter(&submitter.name, &candidate.name, spread);

    let score = (guarded + jitter).clamp(0, 100) as u8;

    tracing::debug!(
        "Scored {} -> {}: combined={}, guarded={}, jitter={}, final={}",
        submitter.name,
        candidate.name,
        combined,
        guarded,
        jitter,
        score
    );

    score
}
