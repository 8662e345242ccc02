use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::core::matcher::{Collaborator, MatcherConfig};
use crate::models::{JudgmentMode, ScoringWeights};
use crate::services::{GeminiClient, GenerationError};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Missing or blank disables the collaborator
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gemini_base_url() -> String { crate::services::gemini::DEFAULT_BASE_URL.to_string() }
fn default_gemini_model() -> String { crate::services::gemini::DEFAULT_MODEL.to_string() }
fn default_temperature() -> f64 { 0.7 }
fn default_top_p() -> f64 { 0.9 }
fn default_timeout_secs() -> u64 { 20 }

/// Extra seconds the HTTP client waits beyond the per-call matcher deadline
const CLIENT_TIMEOUT_GRACE_SECS: u64 = 5;

impl GeminiSettings {
    /// Deadline for one judgment, enforced by the matcher
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Deadline for the underlying HTTP client, always past `request_timeout`
    pub fn client_timeout(&self) -> Duration {
        self.request_timeout() + Duration::from_secs(CLIENT_TIMEOUT_GRACE_SECS)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    /// Missing or blank runs on the seed pool only
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub mode: JudgmentMode,
    #[serde(default = "default_pool_limit")]
    pub pool_limit: usize,
    #[serde(default = "default_jitter_spread")]
    pub jitter_spread: u8,
    #[serde(default = "default_neutral_score")]
    pub neutral_score: u8,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            mode: JudgmentMode::default(),
            pool_limit: default_pool_limit(),
            jitter_spread: default_jitter_spread(),
            neutral_score: default_neutral_score(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_pool_limit() -> usize { 200 }
fn default_jitter_spread() -> u8 { crate::core::jitter::DEFAULT_SPREAD }
fn default_neutral_score() -> u8 { 50 }
fn default_max_concurrency() -> usize { 8 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_role_weight")]
    pub role: f64,
    #[serde(default = "default_skill_weight")]
    pub skill: f64,
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            role: default_role_weight(),
            skill: default_skill_weight(),
            interest: default_interest_weight(),
            availability: default_availability_weight(),
        }
    }
}

fn default_role_weight() -> f64 { 0.30 }
fn default_skill_weight() -> f64 { 0.45 }
fn default_interest_weight() -> f64 { 0.15 }
fn default_availability_weight() -> f64 { 0.10 }

impl WeightsConfig {
    /// Weights ready for scoring; a set not summing to 1.0 is rescaled
    pub fn to_weights(&self) -> ScoringWeights {
        let weights = ScoringWeights {
            role: self.role,
            skill: self.skill,
            interest: self.interest,
            availability: self.availability,
        };

        if (weights.total() - 1.0).abs() > 1e-6 {
            tracing::warn!(
                "Scoring weights sum to {}, normalizing: {:?}",
                weights.total(),
                weights
            );
            return weights.normalized();
        }

        weights
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HACKMATCH__)
    /// 5. GEMINI_API_KEY and DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HACKMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HACKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_well_known_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HACKMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            mode: self.matching.mode,
            weights: self.scoring.weights.to_weights(),
            jitter_spread: self.matching.jitter_spread,
            neutral_score: self.matching.neutral_score.min(100),
            timeout: self.gemini.request_timeout(),
            max_concurrency: self.matching.max_concurrency.max(1),
        }
    }

    /// Build the collaborator, disabled when no API key is configured
    pub fn collaborator(&self) -> Result<Collaborator, GenerationError> {
        let api_key = match non_blank(self.gemini.api_key.as_deref()) {
            Some(key) => key.to_string(),
            None => return Ok(Collaborator::Disabled),
        };

        let client = GeminiClient::new(
            self.gemini.base_url.clone(),
            api_key,
            self.gemini.model.clone(),
            self.gemini.temperature,
            self.gemini.top_p,
            self.gemini.client_timeout(),
        )?;

        Ok(Collaborator::Enabled(Arc::new(client)))
    }

    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database.url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Honour the bare variables most deployments already set
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = env::var("GEMINI_API_KEY") {
        builder = builder.set_override("gemini.api_key", api_key)?;
    }
    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }

    builder.build()
}
