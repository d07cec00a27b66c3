use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::info;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MODEL_ID: &str = "llama3-8b-8192";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the generation backend, always ending with `/`.
    pub backend_url: Url,
    pub request_timeout: Duration,
    pub default_model: String,
    pub log_level: String,
}

impl ClientConfig {
    /// Load from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("UML_BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = normalize_base(&raw_url)
            .with_context(|| format!("invalid UML_BACKEND_URL '{}'", raw_url))?;

        let request_timeout = match lookup("UML_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid UML_REQUEST_TIMEOUT_SECS '{}'", raw))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let default_model = lookup("UML_DEFAULT_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(ClientConfig {
            backend_url,
            request_timeout,
            default_model,
            log_level,
        })
    }

    pub fn log_summary(&self) {
        info!("Client configuration loaded:");
        info!("  Backend: {}", self.backend_url);
        info!("  Request timeout: {}s", self.request_timeout.as_secs());
        info!("  Default model: {}", self.default_model);
    }
}

/// Parse a base address and make sure relative endpoint paths join under it.
pub fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        anyhow::bail!("'{}' cannot be used as a base address", raw);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
