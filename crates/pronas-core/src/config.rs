//! Configuration module
//!
//! Configuration for the analysis gateway boundary. The gateway address is
//! the only externally supplied value the workflow reads; everything else is
//! a documented default.

use std::env;
use std::time::Duration;

const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Gateway connection settings, passed explicitly into the client
/// constructor rather than read ad hoc from the environment.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    base_url: String,
    request_timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read configuration from the environment: PRONAS_GATEWAY_URL (or
    /// GATEWAY_URL), falling back to the localhost gateway address.
    /// PRONAS_GATEWAY_TIMEOUT_SECS overrides the request timeout.
    pub fn from_env() -> Self {
        let base_url = env::var("PRONAS_GATEWAY_URL")
            .or_else(|_| env::var("GATEWAY_URL"))
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());

        let timeout_secs = env::var("PRONAS_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self::new(base_url).with_request_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}
