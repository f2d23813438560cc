use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_layout_model: String,
    pub llm_timeout_secs: u64,
    /// Retries after the first attempt of each inference call.
    pub llm_max_retries: u32,
    /// Uploads, parsed records, layout caches and rendered files live here.
    pub workspace_dir: PathBuf,
    /// External HTML→PDF converter, invoked as `<cmd> <in.html> <out.pdf>`.
    pub pdf_export_command: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_layout_model: env_or("GEMINI_LAYOUT_MODEL", "gemini-2.5-flash-lite"),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            llm_max_retries: env_or("LLM_MAX_RETRIES", "3")
                .parse::<u32>()
                .context("LLM_MAX_RETRIES must be a non-negative integer")?,
            workspace_dir: PathBuf::from(env_or("WORKSPACE_DIR", "./temp_files")),
            pdf_export_command: std::env::var("PDF_EXPORT_COMMAND")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
