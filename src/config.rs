use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

/// Knobs shared by the answer generator and the discussion summarizer.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub max_attempts: u32,
    pub summary_max_tokens: u32,
    pub summary_temperature: f64,
}

impl GenerationSettings {
    /// Attempts per generation; a configured zero still allows one call.
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            summary_max_tokens: 300,
            summary_temperature: 0.7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct QueueSettings {
    pub answer_queue_name: String,
    pub community_queue_name: String,
    pub poll_interval: Duration,
    pub visibility_timeout: Duration,
    pub max_dequeue_count: u32,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            answer_queue_name: "answers".to_string(),
            community_queue_name: "communities".to_string(),
            poll_interval: Duration::from_millis(1000),
            visibility_timeout: Duration::from_secs(30),
            max_dequeue_count: 5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub llm_timeout: Duration,
    pub generation: GenerationSettings,
    pub queue: QueueSettings,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let generation_defaults = GenerationSettings::default();
        let queue_defaults = QueueSettings::default();

        Self {
            mongo_conn_string: env_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_or("MONGO_DB_NAME", "examprep-local"),
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_parsed("WEB_SERVER_PORT", 8080),
            openai_api_key: SecretString::from(env_or("OPENAI_API_KEY", "")),
            openai_api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o"),
            llm_timeout: Duration::from_secs(env_parsed("LLM_TIMEOUT_SECS", 60)),
            generation: GenerationSettings {
                max_attempts: env_parsed("GENERATION_MAX_ATTEMPTS", generation_defaults.max_attempts),
                summary_max_tokens: env_parsed(
                    "SUMMARY_MAX_TOKENS",
                    generation_defaults.summary_max_tokens,
                ),
                summary_temperature: env_parsed(
                    "SUMMARY_TEMPERATURE",
                    generation_defaults.summary_temperature,
                ),
            },
            queue: QueueSettings {
                answer_queue_name: env_or("ANSWER_QUEUE_NAME", &queue_defaults.answer_queue_name),
                community_queue_name: env_or(
                    "COMMUNITY_QUEUE_NAME",
                    &queue_defaults.community_queue_name,
                ),
                poll_interval: Duration::from_millis(env_parsed("QUEUE_POLL_INTERVAL_MS", 1000)),
                visibility_timeout: Duration::from_secs(env_parsed(
                    "QUEUE_VISIBILITY_TIMEOUT_SECS",
                    30,
                )),
                max_dequeue_count: env_parsed(
                    "QUEUE_MAX_DEQUEUE_COUNT",
                    queue_defaults.max_dequeue_count,
                ),
            },
        }
    }

    /// Rejects settings that only make sense for local development.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        if self.generation.max_attempts == 0 {
            return Err(AppError::ValidationError(
                "GENERATION_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }

        if self.llm_timeout.is_zero() {
            return Err(AppError::ValidationError(
                "LLM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "examprep-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://localhost:9999/v1".to_string(),
            openai_model: "gpt-test".to_string(),
            llm_timeout: Duration::from_secs(5),
            generation: GenerationSettings::default(),
            queue: QueueSettings::default(),
        }
    }
}
