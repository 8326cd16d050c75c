//! Relay Client
//!
//! Drives one share cycle: export the canvas, send the payload to the
//! solve service, clean the answer, and hand the display layer a single
//! string whatever happened. Every error kind is caught here; nothing
//! propagates as an uncaught failure to the drawing layer.
//!
//! # Share cycle
//!
//! ```text
//! Idle → Exporting → Sending → {Success | Failed} → Idle
//! ```
//!
//! No state is skipped. While a share is in flight, further `share` calls
//! are rejected, not queued, so rapid repeated clicks produce exactly one
//! request. No cancellation and no automatic retries: an in-flight request
//! runs to completion or failure, and a retry is a fresh user action.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::clean::clean_solved_text;
use crate::error::ShareError;
use crate::export::export_png;
use crate::session::CanvasSession;
use crate::solve::SolveBackend;

/// Phase of the current share cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareState {
    /// No share in progress; initial and terminal state.
    Idle,
    /// Serializing the canvas to a PNG payload.
    Exporting,
    /// Awaiting the solve service response.
    Sending,
    /// The last cycle produced a solution (transient, returns to idle).
    Success,
    /// The last cycle failed (transient, returns to idle).
    Failed,
}

/// Client that relays canvas exports to a solve backend.
pub struct RelayClient<B: SolveBackend> {
    backend: B,
    in_flight: AtomicBool,
    state: Mutex<ShareState>,
}

impl<B: SolveBackend> RelayClient<B> {
    /// Create a relay client over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(ShareState::Idle),
        }
    }

    /// The backend this client relays to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current phase of the share cycle.
    pub fn state(&self) -> ShareState {
        *self.state.lock()
    }

    /// Whether a share is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run one share cycle for the session's current drawing.
    ///
    /// Returns `None` when a prior share is still pending (the call is
    /// rejected, not queued). Otherwise always returns a display-ready
    /// string: the cleaned solution on success, or the mapped failure
    /// message on any error.
    pub async fn share(&self, session: &CanvasSession) -> Option<String> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("share rejected: request already in flight");
            return None;
        }

        let result = self.run_cycle(session).await;

        let display = match result {
            Ok(solution) => {
                self.set_state(ShareState::Success);
                solution
            }
            Err(ref error) => {
                tracing::warn!(%error, "share failed");
                self.set_state(ShareState::Failed);
                error.user_message()
            }
        };

        self.set_state(ShareState::Idle);
        self.in_flight.store(false, Ordering::SeqCst);
        Some(display)
    }

    /// Export, send, and clean; errors map to display text in `share`.
    async fn run_cycle(&self, session: &CanvasSession) -> Result<String, ShareError> {
        self.set_state(ShareState::Exporting);
        let payload = export_png(session.canvas()).await?;
        if payload.is_empty() {
            return Err(ShareError::Input);
        }

        self.set_state(ShareState::Sending);
        tracing::debug!(
            backend = self.backend.name(),
            bytes = payload.len(),
            "relaying canvas export"
        );
        let raw = self.backend.solve(payload.bytes()).await?;

        let cleaned = clean_solved_text(&raw);
        if cleaned.is_empty() {
            return Err(ShareError::Extraction);
        }
        Ok(cleaned)
    }

    fn set_state(&self, next: ShareState) {
        let mut state = self.state.lock();
        tracing::trace!(from = ?*state, to = ?next, "share state transition");
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    /// Backend returning a canned result.
    struct CannedBackend {
        result: Result<String, ShareError>,
        calls: AtomicUsize,
    }

    impl CannedBackend {
        fn ok(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(error: ShareError) -> Self {
            Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SolveBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        async fn health_check(&self) -> bool {
            true
        }

        async fn solve(&self, _png: &[u8]) -> Result<String, ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    /// Backend that stalls until told to finish.
    struct SlowBackend {
        release: tokio::sync::Semaphore,
    }

    #[async_trait]
    impl SolveBackend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        async fn health_check(&self) -> bool {
            true
        }

        async fn solve(&self, _png: &[u8]) -> Result<String, ShareError> {
            let _permit = self.release.acquire().await.map_err(|e| {
                ShareError::Transport(e.to_string())
            })?;
            Ok("42".to_string())
        }
    }

    fn session_with_stroke() -> CanvasSession {
        let mut session = CanvasSession::with_canvas_size(64, 64);
        session.start_stroke(5.0, 5.0);
        session.extend_stroke(50.0, 50.0);
        session.end_stroke();
        session
    }

    #[tokio::test]
    async fn test_success_is_cleaned() {
        let relay = RelayClient::new(CannedBackend::ok("\\boxed{7}"));
        let session = session_with_stroke();

        let display = relay.share(&session).await;
        assert_eq!(display, Some("7".to_string()));
        assert_eq!(relay.state(), ShareState::Idle);
        assert!(!relay.is_busy());
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_verbatim() {
        let relay = RelayClient::new(CannedBackend::err(ShareError::Upstream(
            "Gemini API failed".to_string(),
        )));
        let session = session_with_stroke();

        let display = relay.share(&session).await;
        assert_eq!(display, Some("Gemini API failed".to_string()));
        assert_eq!(relay.state(), ShareState::Idle);
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_generic_message() {
        let relay = RelayClient::new(CannedBackend::err(ShareError::Transport(
            "connection reset".to_string(),
        )));
        let session = session_with_stroke();

        let display = relay.share(&session).await;
        assert_eq!(display, Some("Failed to process image".to_string()));
    }

    #[tokio::test]
    async fn test_empty_answer_is_extraction_failure() {
        let relay = RelayClient::new(CannedBackend::ok("  $$ \n\n\n "));
        let session = session_with_stroke();

        let display = relay.share(&session).await;
        assert_eq!(
            display,
            Some("Failed to extract answer from image".to_string())
        );
    }

    #[tokio::test]
    async fn test_concurrent_share_is_rejected_not_queued() {
        let relay = Arc::new(RelayClient::new(SlowBackend {
            release: tokio::sync::Semaphore::new(0),
        }));
        let session = Arc::new(session_with_stroke());

        let first = {
            let relay = Arc::clone(&relay);
            let session = Arc::clone(&session);
            tokio::spawn(async move { relay.share(&session).await })
        };

        // Let the first share reach the backend
        while !relay.is_busy() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let second = relay.share(&session).await;
        assert_eq!(second, None);

        relay.backend().release.add_permits(1);
        let first = first.await.expect("task join");
        assert_eq!(first, Some("42".to_string()));
        assert!(!relay.is_busy());
    }

    #[tokio::test]
    async fn test_backend_called_once_per_share() {
        let relay = RelayClient::new(CannedBackend::ok("12"));
        let session = session_with_stroke();

        relay.share(&session).await;
        relay.share(&session).await;
        assert_eq!(relay.backend().calls.load(Ordering::SeqCst), 2);
    }
}
