//! Canvas Export
//!
//! Serializes the current raster surface into a lossless PNG payload for
//! transmission to the solve service. A payload is created fresh per
//! share action and never cached; encoding runs on a blocking task so it
//! does not stall the async runtime.

use std::io::Cursor;

use image::ImageFormat;

use crate::canvas::Canvas;
use crate::error::ShareError;

/// A binary-encoded image derived from the canvas at one moment in time.
#[derive(Clone, Debug)]
pub struct ExportPayload {
    bytes: Vec<u8>,
}

impl ExportPayload {
    /// The encoded PNG bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the payload, yielding the PNG bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encode the canvas content as a PNG payload.
///
/// The pixels are copied out before encoding, so the payload reflects the
/// surface exactly at the moment of the call. Fails with
/// [`ShareError::Encoding`], which is fatal for that share attempt and is
/// not retried automatically.
///
/// # Errors
///
/// Returns [`ShareError::Encoding`] if PNG serialization fails or the
/// encoding task is cancelled.
pub async fn export_png(canvas: &Canvas) -> Result<ExportPayload, ShareError> {
    let pixels = canvas.image().clone();

    let bytes = tokio::task::spawn_blocking(move || {
        let mut cursor = Cursor::new(Vec::new());
        pixels
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| ShareError::Encoding(e.to_string()))?;
        Ok::<_, ShareError>(cursor.into_inner())
    })
    .await
    .map_err(|e| ShareError::Encoding(e.to_string()))??;

    tracing::debug!(bytes = bytes.len(), "canvas exported");
    Ok(ExportPayload { bytes })
}
