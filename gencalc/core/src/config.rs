//! Relay Configuration
//!
//! The relay client consumes only one configuration value: the base URL
//! of the solve service. It is env-driven with a localhost default.

use crate::protocol::PROCESS_IMAGE_PATH;

/// Default solve-service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the solve-service base URL.
pub const BASE_URL_ENV: &str = "GENCALC_SERVER_URL";

/// Solve-service endpoint configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    /// Base URL of the solve service, without a trailing slash.
    pub base_url: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl RelayConfig {
    /// Configuration pointing at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read configuration from the environment, falling back to the
    /// localhost default.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Full URL of the image-processing endpoint.
    #[must_use]
    pub fn process_image_url(&self) -> String {
        format!("{}{}", self.base_url, PROCESS_IMAGE_PATH)
    }

    /// Full URL of the health-check endpoint.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}
