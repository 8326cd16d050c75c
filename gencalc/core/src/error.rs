//! Share Error Taxonomy
//!
//! Every failure on the share path is one of these kinds. All of them are
//! caught at the [`RelayClient`](crate::relay::RelayClient) boundary and
//! converted to a single display string; none propagate as uncaught
//! failures to the drawing layer. There are no automatic retries; a retry
//! is a fresh, user-initiated share.

/// Errors that can occur during one share attempt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// No image data was present when share was invoked. Cannot happen if
    /// the exporter contract is honored, but guarded anyway.
    #[error("no image data to share")]
    Input,

    /// Raster-to-PNG serialization failed. Fatal for this attempt.
    #[error("failed to encode canvas: {0}")]
    Encoding(String),

    /// Network failure, timeout, or a non-2xx response without a
    /// structured error body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The solve service returned a structured `error` field; its text is
    /// surfaced verbatim.
    #[error("{0}")]
    Upstream(String),

    /// The solve service reported success but no usable text survived
    /// output cleaning.
    #[error("no usable answer after cleaning")]
    Extraction,
}

impl ShareError {
    /// The user-facing display string for this failure.
    ///
    /// Transport failures map to a fixed generic message; upstream errors
    /// pass through verbatim; extraction failures use a fixed message
    /// distinct from upstream errors.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Input => "No image to share".to_string(),
            Self::Encoding(_) => "Failed to export drawing".to_string(),
            Self::Transport(_) => "Failed to process image".to_string(),
            Self::Upstream(message) => message.clone(),
            Self::Extraction => "Failed to extract answer from image".to_string(),
        }
    }
}
