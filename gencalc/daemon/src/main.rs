//! GenCalc Solve-Service Daemon
//!
//! HTTP host for the relay protocol: accepts a canvas PNG over multipart,
//! forwards it to the Gemini API, cleans the answer, and responds with
//! the wire protocol's solution or failure shape.

mod gemini;
mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gencalc_core::protocol::MAX_IMAGE_BYTES;

use crate::gemini::{GeminiClient, DEFAULT_MODEL_ID};
use crate::handlers::{health_handler, process_image_handler, AppState};

/// Command-line arguments, each with an environment fallback.
#[derive(Debug, Parser)]
#[command(name = "gencalc-daemon", about = "GenCalc solve-service daemon")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Allowed request origin for CORS.
    #[arg(long, env = "CLIENT_URL", default_value = "http://localhost:3000")]
    client_url: String,

    /// Gemini API key. Absence is a fatal startup condition.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model identifier.
    #[arg(long, env = "GENAI_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    model_id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gencalc_daemon=debug,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let Some(api_key) = args.gemini_api_key else {
        tracing::error!("GEMINI_API_KEY is missing");
        anyhow::bail!("GEMINI_API_KEY is missing");
    };

    let gemini = GeminiClient::new(api_key, args.model_id)?;
    tracing::info!(model = gemini.model_id(), "using model");

    let state = Arc::new(AppState { gemini });

    let cors = CorsLayer::new()
        .allow_origin(
            args.client_url
                .parse::<HeaderValue>()
                .context("invalid CLIENT_URL")?,
        )
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(health_handler))
        .route("/process-image", post(process_image_handler))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_address = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!("server running on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on Ctrl-C so in-flight requests can drain.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
