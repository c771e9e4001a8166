use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the local libsql database file.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Active provider: "openai" or "ollama".
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
}

/// Tuning knobs for the research workflow. The review interval and
/// timeout are deliberately configuration rather than constants: the
/// review checkpoint is driven by an external human actor and deployments
/// want very different wait windows.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Target size of the generated analyst team.
    pub analyst_count: usize,
    /// Total time a project may sit in review before continuing.
    pub review_timeout_secs: u64,
    /// How often the review gate re-reads project status.
    pub review_poll_secs: u64,
    /// Number of concurrent workflow runner tasks.
    pub queue_workers: usize,
    /// Bound of the workflow submission queue.
    pub queue_capacity: usize,
}

impl WorkflowConfig {
    pub fn review_timeout(&self) -> Duration {
        Duration::from_secs(self.review_timeout_secs)
    }

    pub fn review_poll_interval(&self) -> Duration {
        Duration::from_secs(self.review_poll_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").unwrap_or_else(|_| "verity.db".to_string()),
            },
            llm: LlmConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_model: env::var("OLLAMA_MODEL")
                    .unwrap_or_else(|_| "llama3.2".to_string()),
            },
            workflow: WorkflowConfig {
                analyst_count: parse_var("WORKFLOW_ANALYST_COUNT", 3)?,
                review_timeout_secs: parse_var("WORKFLOW_REVIEW_TIMEOUT_SECS", 300)?,
                review_poll_secs: parse_var("WORKFLOW_REVIEW_POLL_SECS", 10)?,
                queue_workers: parse_var("WORKFLOW_QUEUE_WORKERS", 4)?,
                queue_capacity: parse_var("WORKFLOW_QUEUE_CAPACITY", 64)?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
