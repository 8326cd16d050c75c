//! GenCalc Core - Headless Drawing Canvas and Solve Relay
//!
//! This crate provides the core logic for GenCalc, completely independent
//! of any UI framework. The hosting UI layer (web, native, or headless
//! tests) wires its pointer events to [`CanvasSession`] operations and
//! forwards share requests to the [`RelayClient`].
//!
//! # Architecture
//!
//! ```text
//! pointer events
//!       │
//!       ▼
//! ┌──────────────────────────────────────────────┐
//! │                CanvasSession                  │
//! │  ┌─────────┐  ┌─────────┐  ┌──────────────┐  │
//! │  │ Canvas  │  │ History │  │ Pen / Stroke │  │
//! │  │ (RGBA)  │  │ (snaps) │  │    state     │  │
//! │  └─────────┘  └─────────┘  └──────────────┘  │
//! └──────────────────────┬───────────────────────┘
//!                        │ export_png
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │                 RelayClient                   │
//! │   Idle → Exporting → Sending → {Ok|Err}      │
//! └──────────────────────┬───────────────────────┘
//!                        │ multipart POST /process-image
//!                        ▼
//!               Solve Service (daemon)
//! ```
//!
//! # Key Types
//!
//! - [`CanvasSession`]: one user's drawing surface, pen state, and history
//! - [`History`]: snapshot stack with whole-stroke undo and reset
//! - [`RelayClient`]: sends an exported PNG to the solve service and maps
//!   the response (or failure) into a display-ready string
//! - [`SolveBackend`]: trait boundary around the external solve service
//!
//! # Module Overview
//!
//! - [`canvas`]: fixed-dimension RGBA raster surface and rasterization
//! - [`stroke`]: pen, color palette, and in-flight stroke types
//! - [`history`]: snapshot stack (record, undo, reset)
//! - [`session`]: the drawing session tying surface, pen, and history
//! - [`export`]: PNG serialization of the current surface
//! - [`relay`]: share-cycle state machine and display-string mapping
//! - [`solve`]: solve-service abstraction and HTTP implementation
//! - [`clean`]: output cleaning applied to solved text
//! - [`protocol`]: wire types shared with the solve-service host
//! - [`config`]: relay endpoint configuration
//! - [`error`]: the share error taxonomy

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod clean;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod protocol;
pub mod relay;
pub mod session;
pub mod solve;
pub mod stroke;

// Re-exports for convenience
pub use canvas::{Canvas, Snapshot, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use clean::clean_solved_text;
pub use config::RelayConfig;
pub use error::ShareError;
pub use export::{export_png, ExportPayload};
pub use history::History;
pub use protocol::{HealthResponse, SolveFailure, SolveResponse};
pub use relay::{RelayClient, ShareState};
pub use session::CanvasSession;
pub use solve::{HttpSolveBackend, SolveBackend};
pub use stroke::{ActiveStroke, Color, Pen, Point};
