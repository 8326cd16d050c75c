//! HTTP Handlers
//!
//! Health check and the image-processing endpoint. All failures become
//! the wire protocol's structured failure shape with a non-2xx status.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use gencalc_core::clean_solved_text;
use gencalc_core::protocol::{HealthResponse, SolveFailure, SolveResponse, IMAGE_FIELD};

use crate::gemini::{GeminiClient, GeminiError};

/// Shared application state.
pub struct AppState {
    /// Upstream Gemini client.
    pub gemini: GeminiClient,
}

/// Failures a request can end in, mapped to wire responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The multipart body carried no `image` field.
    #[error("no image uploaded")]
    NoImage,

    /// The multipart body could not be read.
    #[error("malformed upload: {0}")]
    BadUpload(String),

    /// The upstream Gemini call failed.
    #[error(transparent)]
    Gemini(#[from] GeminiError),

    /// Gemini answered, but no usable text survived cleaning.
    #[error("no answer extracted")]
    NoAnswer,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, failure) = match self {
            Self::NoImage => (
                StatusCode::BAD_REQUEST,
                SolveFailure::new("No image uploaded"),
            ),
            Self::BadUpload(detail) => (
                StatusCode::BAD_REQUEST,
                SolveFailure::new("Malformed upload")
                    .with_details(serde_json::Value::String(detail)),
            ),
            Self::Gemini(GeminiError::Api { details }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SolveFailure::new("Gemini API failed").with_details(details),
            ),
            Self::Gemini(GeminiError::Http(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SolveFailure::new("Internal server error")
                    .with_details(serde_json::Value::String(e.to_string())),
            ),
            Self::NoAnswer => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SolveFailure::new("Failed to extract answer from image"),
            ),
        };
        (status, Json(failure)).into_response()
    }
}

/// GET / - health check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "GenCalc backend running".to_string(),
    })
}

/// POST /process-image - multipart upload, relayed to Gemini.
pub async fn process_image_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<SolveResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let mime = field
            .content_type()
            .unwrap_or(gencalc_core::protocol::IMAGE_MIME)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadUpload(e.to_string()))?;
        upload = Some((mime, data.to_vec()));
        break;
    }

    let (mime, data) = upload.ok_or(ApiError::NoImage)?;
    tracing::info!(bytes = data.len(), %mime, "processing uploaded drawing");

    let raw = state.gemini.solve_image(&mime, &data).await?;
    let cleaned = clean_solved_text(&raw);
    if cleaned.is_empty() {
        tracing::warn!("gemini answered but nothing survived cleaning");
        return Err(ApiError::NoAnswer);
    }

    Ok(Json(SolveResponse { solution: cleaned }))
}
