//! Relay Wire Protocol
//!
//! Types and constants shared between the relay client and the solve
//! service host: multipart field naming, the upload size cap, and the
//! JSON response shapes.
//!
//! Success: `{ "solution": "<cleaned text>" }`.
//! Failure: `{ "error": "<message>", "details"?: <any> }` with a non-2xx
//! status code.

use serde::{Deserialize, Serialize};

/// Multipart field name carrying the image, fixed by protocol.
pub const IMAGE_FIELD: &str = "image";

/// Filename attached to the uploaded image part.
pub const IMAGE_FILENAME: &str = "canvas.png";

/// MIME type of the exported canvas.
pub const IMAGE_MIME: &str = "image/png";

/// Maximum accepted upload size (5 MiB). Enforced by the receiving
/// service, not by the relay client.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Path of the image-processing endpoint.
pub const PROCESS_IMAGE_PATH: &str = "/process-image";

/// Successful solve response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// The cleaned solved-expression text.
    pub solution: String,
}

/// Structured failure response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveFailure {
    /// Human-readable error message, surfaced verbatim to the user.
    pub error: String,
    /// Optional diagnostic payload (upstream body, exception text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SolveFailure {
    /// A failure with no diagnostic details.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Attach a diagnostic payload.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Health-check response for `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status line.
    pub status: String,
}
