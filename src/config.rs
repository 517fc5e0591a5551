use serde::Deserialize;
use std::time::Duration;

/// A zero timeout would make every oracle call fail
const MIN_ORACLE_TIMEOUT_SECS: u64 = 1;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenAI API key. The oracle is disabled when unset.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for the final pick
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Upper bound on a single oracle call, in seconds
    #[serde(default = "default_oracle_timeout_secs")]
    pub oracle_timeout_secs: u64,

    #[serde(default = "default_oracle_max_tokens")]
    pub oracle_max_tokens: u32,

    #[serde(default = "default_oracle_temperature")]
    pub oracle_temperature: f32,

    /// Path to the meal catalog JSON file
    #[serde(default = "default_meals_file")]
    pub meals_file: String,

    /// Path to the per-user rating history JSON file
    #[serde(default = "default_preferences_file")]
    pub preferences_file: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the external recommendation oracle
///
/// Built once at process bootstrap and handed to the oracle client; the scoring
/// core never reads credentials itself.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_oracle_timeout_secs() -> u64 {
    15
}

fn default_oracle_max_tokens() -> u32 {
    600
}

fn default_oracle_temperature() -> f32 {
    0.3
}

fn default_meals_file() -> String {
    "data/meals.json".to_string()
}

fn default_preferences_file() -> String {
    "data/preferences.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Oracle settings, or `None` when no API key is configured
    pub fn oracle(&self) -> Option<OracleConfig> {
        let api_key = self
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;

        Some(OracleConfig {
            api_key: api_key.to_string(),
            api_url: self.openai_api_url.trim_end_matches('/').to_string(),
            model: self.openai_model.clone(),
            max_tokens: self.oracle_max_tokens,
            temperature: self.oracle_temperature,
            timeout: self.oracle_timeout(),
        })
    }

    /// Oracle timeout, never shorter than one second
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs.max(MIN_ORACLE_TIMEOUT_SECS))
    }
}
