use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{
    judgment::judge_response,
    prompt::build_prompt,
    scoring::{combined_score, final_score},
};
use crate::models::{JudgmentMode, MatchResult, Profile, RawComparison, ScoringWeights};
use crate::services::llm::{GenerationError, TextGenerator};

/// The text-generation collaborator, or its explicit absence
#[derive(Clone)]
pub enum Collaborator {
    Disabled,
    Enabled(Arc<dyn TextGenerator>),
}

impl Collaborator {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Collaborator::Enabled(_))
    }
}

impl std::fmt::Debug for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collaborator::Disabled => write!(f, "Disabled"),
            Collaborator::Enabled(_) => write!(f, "Enabled"),
        }
    }
}

/// Immutable matching parameters
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    pub mode: JudgmentMode,
    pub weights: ScoringWeights,
    pub jitter_spread: u8,
    /// Score reported when no judgment could be obtained at all
    pub neutral_score: u8,
    pub timeout: Duration,
    pub max_concurrency: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            mode: JudgmentMode::Detailed,
            weights: ScoringWeights::default(),
            jitter_spread: crate::core::jitter::DEFAULT_SPREAD,
            neutral_score: 50,
            timeout: Duration::from_secs(20),
            max_concurrency: 8,
        }
    }
}

/// Main matching orchestrator
///
/// # Pipeline per candidate
/// 1. Prompt the collaborator (bounded by a timeout)
/// 2. Extract and decode the judgment
/// 3. Weighted composite
/// 4. Guardrails, jitter, clamp
///
/// Collaborator failures never abort a batch; they produce a neutral result.
#[derive(Debug, Clone)]
pub struct Matcher {
    collaborator: Collaborator,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(collaborator: Collaborator, config: MatcherConfig) -> Self {
        Self {
            collaborator,
            config,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Collaborator::Disabled, MatcherConfig::default())
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.collaborator.is_enabled()
    }

    /// Score one candidate against the submitter
    pub async fn score_pair(&self, submitter: &Profile, candidate: &Profile) -> MatchResult {
        let generator = match &self.collaborator {
            Collaborator::Enabled(generator) => generator,
            Collaborator::Disabled => return self.fallback(candidate, "LLM disabled".to_string()),
        };

        match self.request(generator.as_ref(), submitter, candidate).await {
            Ok(raw) => self.score_response(submitter, candidate, raw),
            Err(e) => {
                tracing::warn!(
                    "Judgment for {} -> {} failed, using neutral score: {}",
                    submitter.name,
                    candidate.name,
                    e
                );
                self.fallback(candidate, format!("AI error: {}", e))
            }
        }
    }

    /// Fold a raw model response into a final result
    pub fn score_response(&self, submitter: &Profile, candidate: &Profile, raw: String) -> MatchResult {
        let judgment = judge_response(&raw);
        let combined = combined_score(&judgment, self.config.mode, &self.config.weights);
        let score = final_score(submitter, candidate, combined, self.config.jitter_spread);

        MatchResult {
            candidate: candidate.to_candidate(),
            score,
            explanation: judgment.explanation,
            ai_raw_response: Some(raw),
        }
    }

    /// Rank every other profile in the pool against the submitter
    ///
    /// Self is excluded by name. All comparisons complete (or fall back)
    /// before the stable descending sort; no truncation.
    pub async fn rank(&self, submitter: &Profile, pool: &[Profile]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = stream::iter(others(submitter, pool))
            .map(|candidate| self.score_pair(submitter, candidate))
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }

    /// Collect unparsed responses for every other profile in the pool
    ///
    /// Failures are rendered as a one-line JSON object carrying the error.
    pub async fn raw_comparisons(&self, submitter: &Profile, pool: &[Profile]) -> Vec<RawComparison> {
        stream::iter(others(submitter, pool))
            .map(|candidate| async move {
                let ai_raw_response = match &self.collaborator {
                    Collaborator::Disabled => None,
                    Collaborator::Enabled(generator) => {
                        match self.request(generator.as_ref(), submitter, candidate).await {
                            Ok(raw) => Some(raw),
                            Err(e) => Some(
                                serde_json::json!({
                                    "score": 0,
                                    "explanation": format!("AI error: {}", e),
                                })
                                .to_string(),
                            ),
                        }
                    }
                };

                RawComparison {
                    candidate: candidate.to_candidate(),
                    ai_raw_response,
                }
            })
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await
    }

    async fn request(
        &self,
        generator: &dyn TextGenerator,
        submitter: &Profile,
        candidate: &Profile,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(self.config.mode, submitter, candidate);

        match tokio::time::timeout(self.config.timeout, generator.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.config.timeout)),
        }
    }

    fn fallback(&self, candidate: &Profile, explanation: String) -> MatchResult {
        MatchResult {
            candidate: candidate.to_candidate(),
            score: self.config.neutral_score.min(100),
            explanation,
            ai_raw_response: None,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::disabled()
    }
}

fn others<'a>(submitter: &'a Profile, pool: &'a [Profile]) -> impl Iterator<Item = &'a Profile> {
    pool.iter().filter(move |p| p.name != submitter.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Replies per candidate name found in the prompt
    struct Scripted {
        replies: HashMap<&'static str, Result<&'static str, u16>>,
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            let user_b = prompt.split("User B (existing):").nth(1).unwrap_or(prompt);
            for (name, reply) in &self.replies {
                if user_b.contains(&format!("\"name\":\"{}\"", name)) {
                    return match reply {
                        Ok(text) => Ok(text.to_string()),
                        Err(status) => Err(GenerationError::ApiError {
                            status: *status,
                            body: "boom".to_string(),
                        }),
                    };
                }
            }
            Err(GenerationError::EmptyResponse)
        }
    }

    struct Stalled;

    #[async_trait]
    impl TextGenerator for Stalled {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("{\"score\": 99}".to_string())
        }
    }

    fn profile(name: &str, roles: &[&str], skills: &[&str]) -> Profile {
        Profile {
            hackathon: "SCE 2025".to_string(),
            name: name.to_string(),
            contact: format!("@{}", name.to_lowercase()),
            roles: roles.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: vec![],
            availability: "Flexible".to_string(),
            blurb: String::new(),
        }
    }

    fn minimal_config() -> MatcherConfig {
        MatcherConfig {
            mode: JudgmentMode::Minimal,
            ..MatcherConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_returns_neutral() {
        let matcher = Matcher::disabled();
        let a = profile("A", &["FE"], &["React"]);
        let b = profile("B", &["FE"], &["React"]);

        let result = matcher.score_pair(&a, &b).await;

        assert_eq!(result.score, 50);
        assert_eq!(result.explanation, "LLM disabled");
        assert_eq!(result.ai_raw_response, None);
    }

    #[tokio::test]
    async fn test_rank_excludes_self_and_sorts() {
        let generator = Scripted {
            replies: HashMap::from([
                ("B", Ok("```json\n{\"score\": 85, \"explanation\": \"Good fit\"}\n```")),
                ("C", Ok("{\"score\": 90, \"explanation\": \"Same stack\"}")),
                ("D", Err(503)),
            ]),
        };
        let matcher = Matcher::new(Collaborator::Enabled(Arc::new(generator)), minimal_config());

        let a = profile("A", &["FE"], &["React"]);
        let pool = vec![
            a.clone(),
            profile("B", &["BE"], &["FastAPI"]),
            profile("C", &["FE"], &["Vue"]),
            profile("D", &["Design"], &["Figma"]),
        ];

        let results = matcher.rank(&a, &pool).await;

        let names: Vec<&str> = results.iter().map(|r| r.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "C"]);

        // 85 + jitter("A", "B") = 84
        assert_eq!(results[0].score, 84);
        assert_eq!(results[0].explanation, "Good fit");
        // Failure degrades to neutral without guardrail or jitter
        assert_eq!(results[1].score, 50);
        assert!(results[1].explanation.starts_with("AI error:"));
        // 90 capped at 30, jitter("A", "C") is -2
        assert_eq!(results[2].score, 28);
    }

    #[tokio::test]
    async fn test_prose_without_json_is_neutral_then_guarded() {
        let generator = Scripted {
            replies: HashMap::from([("B", Ok("I cannot evaluate this"))]),
        };
        let matcher = Matcher::new(Collaborator::Enabled(Arc::new(generator)), minimal_config());
        let a = profile("A", &["FE"], &["React"]);
        let b = profile("B", &["BE"], &["FastAPI"]);

        let result = matcher.score_pair(&a, &b).await;

        assert!(result.explanation.contains("No structured judgment"));
        // Neutral 50 floored to 70, then jitter("A", "B") = -1
        assert_eq!(result.score, 69);
        assert_eq!(result.ai_raw_response.as_deref(), Some("I cannot evaluate this"));
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_neutral() {
        let config = MatcherConfig {
            timeout: Duration::from_millis(20),
            ..MatcherConfig::default()
        };
        let matcher = Matcher::new(Collaborator::Enabled(Arc::new(Stalled)), config);
        let a = profile("A", &["FE"], &[]);
        let pool = vec![profile("B", &["BE"], &[]), profile("C", &["FE"], &[])];

        let results = matcher.rank(&a, &pool).await;

        assert_eq!(results.len(), 2);
        for result in results {
            assert_eq!(result.score, 50);
            assert!(result.explanation.contains("Timed out"));
        }
    }

    #[tokio::test]
    async fn test_raw_comparisons_render_errors_as_json() {
        let generator = Scripted {
            replies: HashMap::from([("B", Ok("raw text")), ("C", Err(500))]),
        };
        let matcher = Matcher::new(Collaborator::Enabled(Arc::new(generator)), minimal_config());
        let a = profile("A", &["FE"], &[]);
        let pool = vec![profile("B", &["BE"], &[]), profile("C", &["ML"], &[])];

        let results = matcher.raw_comparisons(&a, &pool).await;

        assert_eq!(results[0].ai_raw_response.as_deref(), Some("raw text"));
        let error: serde_json::Value =
            serde_json::from_str(results[1].ai_raw_response.as_deref().unwrap()).unwrap();
        assert_eq!(error["score"], 0);
        assert!(error["explanation"].as_str().unwrap().starts_with("AI error:"));
    }

    #[tokio::test]
    async fn test_raw_comparisons_disabled_are_null() {
        let matcher = Matcher::disabled();
        let a = profile("A", &["FE"], &[]);
        let pool = vec![a.clone(), profile("B", &["BE"], &[])];

        let results = matcher.raw_comparisons(&a, &pool).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ai_raw_response, None);
    }
}
