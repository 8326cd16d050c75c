//! HTTP Solve Backend
//!
//! Posts the exported PNG as a multipart request to the solve service's
//! `/process-image` endpoint and maps the JSON response into the share
//! error taxonomy. No retries and no timeout beyond what the transport
//! client enforces.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::SolveBackend;
use crate::config::RelayConfig;
use crate::error::ShareError;
use crate::protocol::{IMAGE_FIELD, IMAGE_FILENAME, IMAGE_MIME};

/// Solve service client over HTTP.
#[derive(Clone, Debug)]
pub struct HttpSolveBackend {
    config: RelayConfig,
    http_client: reqwest::Client,
}

impl HttpSolveBackend {
    /// Create a backend from endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: RelayConfig) -> Result<Self, ShareError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ShareError::Transport(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a backend from the environment (`GENCALC_SERVER_URL`).
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn from_env() -> Result<Self, ShareError> {
        Self::from_config(RelayConfig::from_env())
    }

    /// The configured endpoint.
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

#[async_trait]
impl SolveBackend for HttpSolveBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.config.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }

    async fn solve(&self, png: &[u8]) -> Result<String, ShareError> {
        let part = Part::bytes(png.to_vec())
            .file_name(IMAGE_FILENAME)
            .mime_str(IMAGE_MIME)
            .map_err(|e| ShareError::Transport(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http_client
            .post(self.config.process_image_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ShareError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShareError::Transport(e.to_string()))?;

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();

        // A structured error field wins regardless of status code
        if let Some(error) = parsed.get("error").and_then(|e| e.as_str()) {
            tracing::warn!(%status, error, "solve service returned an error");
            return Err(ShareError::Upstream(error.to_string()));
        }

        if !status.is_success() {
            return Err(ShareError::Transport(format!(
                "solve service returned {status}"
            )));
        }

        match parsed.get("solution").and_then(|s| s.as_str()) {
            Some(solution) => Ok(solution.to_string()),
            None => Err(ShareError::Transport(
                "malformed solve response: missing solution".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let backend =
            HttpSolveBackend::from_config(RelayConfig::new("http://localhost:5000")).unwrap();
        assert_eq!(
            backend.config().process_image_url(),
            "http://localhost:5000/process-image"
        );
        assert_eq!(backend.name(), "http");
    }
}
