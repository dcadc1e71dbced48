use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every knob has a default matching the standard deployment (Ollama on the
/// compose network), so the service starts with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_base_url: String,
    pub ollama_model: String,
    /// Client-level timeout for program generation. Small local models can
    /// take minutes to answer the full prompt.
    pub ollama_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://ollama:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama2:7b"),
            ollama_timeout_secs: env_or("OLLAMA_TIMEOUT_SECS", "300")
                .parse::<u64>()
                .context("OLLAMA_TIMEOUT_SECS must be a number of seconds")?,
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
