//! Solve Backend Trait
//!
//! Narrow interface over the external solve service. Implementations
//! handle transport details and map failures into the
//! [`ShareError`] taxonomy; the returned text is the *raw* solution,
//! cleaned later by the relay client.

use async_trait::async_trait;

use crate::error::ShareError;

/// The external solve-service collaborator.
#[async_trait]
pub trait SolveBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether the service is reachable and reports healthy.
    async fn health_check(&self) -> bool;

    /// Submit a PNG image of the drawing and return the raw solved text.
    ///
    /// # Errors
    ///
    /// - [`ShareError::Transport`] on network failure or a non-2xx
    ///   response without a structured error body
    /// - [`ShareError::Upstream`] when the response carries a structured
    ///   `error` field
    async fn solve(&self, png: &[u8]) -> Result<String, ShareError>;
}
