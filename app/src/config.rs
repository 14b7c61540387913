//! Runtime configuration for the client.
//!
//! Defaults match the hosted backend. The binary overrides them from flags
//! and environment variables; library users build a `Config` directly.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://trippy-be.onrender.com/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("warmup retry count must be at least 1")]
    NoRetries,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Fixed-delay retry schedule used while a remote backend cold-starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
            max_attempts: 24,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Per-request timeout. Kept short so a sleeping backend is detected fast.
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub health_timeout: Duration,
    pub health_interval: Duration,
    /// Whether mock fallbacks sleep to imitate network latency.
    pub mock_latency: bool,
    pub maps_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(1000),
            retry: RetryPolicy::default(),
            health_timeout: Duration::from_secs(2),
            health_interval: Duration::from_secs(5),
            mock_latency: true,
            maps_api_key: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::NoRetries);
        }
        Ok(())
    }

    /// Warmup retries only mask a remote host's cold start.
    pub fn warmup_enabled(&self) -> bool {
        !is_local_url(&self.api_base_url)
    }
}

/// Loopback and unspecified hosts count as local. Unparseable URLs do not.
pub fn is_local_url(url: &str) -> bool {
    let Ok(url) = Url::parse(url) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>()
        .map(|ip| ip.is_loopback() || ip.is_unspecified())
        .unwrap_or(false)
}
