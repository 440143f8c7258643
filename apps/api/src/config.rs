use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_STATE_KEY: &str = "cv_generator_state_v1";

/// Where the wizard state is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateBackend {
    File(PathBuf),
    Redis { url: String },
    Memory,
}

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values or a missing Redis URL.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub rust_log: String,
    pub backend: StateBackend,
    pub state_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = match get("STATE_BACKEND").as_deref().unwrap_or("file") {
            "file" => StateBackend::File(PathBuf::from(
                get("STATE_FILE").unwrap_or_else(|| ".h2cv/state.json".to_string()),
            )),
            "redis" => StateBackend::Redis {
                url: get("REDIS_URL").with_context(|| {
                    "Required environment variable 'REDIS_URL' is not set".to_string()
                })?,
            },
            "memory" => StateBackend::Memory,
            other => bail!("STATE_BACKEND must be one of file, redis, memory (got '{other}')"),
        };

        Ok(Config {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            backend,
            state_key: get("STATE_KEY").unwrap_or_else(|| DEFAULT_STATE_KEY.to_string()),
        })
    }
}
