use std::collections::HashSet;

use crate::models::Profile;

/// Highest score a redundant pair (shared role or skill) may receive
pub const REDUNDANT_CAP: f64 = 30.0;

/// Lowest score a fully complementary pair may receive
pub const COMPLEMENTARY_FLOOR: f64 = 70.0;

/// Overlap between two profiles after tag normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub same_role: bool,
    pub shared_skill: bool,
}

impl Overlap {
    pub fn between(a: &Profile, b: &Profile) -> Self {
        let roles_a = normalized_roles(&a.roles);
        let roles_b = normalized_roles(&b.roles);
        let skills_a = normalized_skills(&a.skills);
        let skills_b = normalized_skills(&b.skills);

        Self {
            same_role: !roles_a.is_disjoint(&roles_b),
            shared_skill: !skills_a.is_disjoint(&skills_b),
        }
    }

    /// Any shared role or skill makes the pair redundant, regardless of how many
    pub fn is_redundant(&self) -> bool {
        self.same_role || self.shared_skill
    }
}

/// Apply the complementarity rules to an untrusted score
///
/// Redundant pairs are capped at [`REDUNDANT_CAP`]; pairs with no role or
/// skill overlap are floored at [`COMPLEMENTARY_FLOOR`]. The result is
/// rounded half to even and clamped to 0..=100.
pub fn apply_guardrails(a: &Profile, b: &Profile, score: f64) -> u8 {
    let overlap = Overlap::between(a, b);

    // NaN cannot survive min/max against a finite bound
    let bounded = if overlap.is_redundant() {
        score.min(REDUNDANT_CAP)
    } else {
        score.max(COMPLEMENTARY_FLOOR)
    };

    clamp_score(bounded.round_ties_even())
}

/// Clamp an already rounded score into 0..=100
pub fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.clamp(0.0, 100.0) as u8
}

fn normalized_roles(roles: &[String]) -> HashSet<String> {
    roles
        .iter()
        .map(|r| r.trim().to_uppercase())
        .filter(|r| !r.is_empty())
        .collect()
}

fn normalized_skills(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
