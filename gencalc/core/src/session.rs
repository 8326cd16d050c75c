//! Drawing Session
//!
//! One user's drawing surface, pen state, and undo history, owned as a
//! single session object so multiple concurrent sessions stay
//! independently testable. The hosting UI layer invokes the stroke
//! operations on its pointer events; this module defines only the
//! operations, not the event wiring.
//!
//! # Invariants
//!
//! - Exactly one stroke may be active at a time.
//! - Canvas dimensions are immutable for the session lifetime.
//! - A snapshot is recorded only when a stroke completes, so undo rolls
//!   back whole strokes.

use crate::canvas::Canvas;
use crate::history::History;
use crate::stroke::{ActiveStroke, Color, Pen, Point};

/// An interactive drawing session.
#[derive(Debug, Default)]
pub struct CanvasSession {
    canvas: Canvas,
    history: History,
    pen: Pen,
    active: Option<ActiveStroke>,
}

impl CanvasSession {
    /// Create a session with the default canvas dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a custom canvas size.
    #[must_use]
    pub fn with_canvas_size(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            ..Self::default()
        }
    }

    /// Create a session whose history keeps at most `max_depth` snapshots.
    #[must_use]
    pub fn with_history_depth(max_depth: usize) -> Self {
        Self {
            history: History::with_max_depth(max_depth),
            ..Self::default()
        }
    }

    /// Begin a stroke at `(x, y)`.
    ///
    /// No-op if a stroke is already active: a new stroke cannot start
    /// while another is in flight.
    pub fn start_stroke(&mut self, x: f32, y: f32) {
        if self.active.is_some() {
            tracing::debug!("start_stroke ignored: stroke already active");
            return;
        }
        self.active = Some(ActiveStroke::begin(self.pen, Point::new(x, y)));
    }

    /// Extend the active stroke with a segment to `(x, y)`, rasterized
    /// immediately with the stroke's captured color and width.
    ///
    /// No-op when no stroke is active.
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        let Some(stroke) = self.active.as_mut() else {
            return;
        };
        let to = Point::new(x, y);
        let from = stroke.last_point();
        let (color, width) = (stroke.color(), stroke.width());
        stroke.add_point(to);
        self.canvas.draw_segment(from, to, color, width);
    }

    /// Close the active stroke and record a history snapshot of the
    /// committed drawing state.
    ///
    /// No-op when no stroke is active, which guards against duplicate end
    /// events (pointer-up and pointer-leave both firing).
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.active.take() else {
            return;
        };
        tracing::debug!(points = stroke.point_count(), "stroke completed");
        self.history.record(self.canvas.snapshot());
    }

    /// Set the pen color for future strokes. Pixels already rendered, and
    /// any stroke currently in flight, are unaffected.
    pub fn set_color(&mut self, color: Color) {
        self.pen.color = color;
    }

    /// Set the pen width for future strokes.
    pub fn set_width(&mut self, width: f32) {
        self.pen.width = width;
    }

    /// Current pen settings.
    #[must_use]
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Whether a stroke is currently active.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    /// Undo the most recent completed stroke.
    pub fn undo(&mut self) {
        self.history.undo(&mut self.canvas);
    }

    /// Clear the history and blank the canvas.
    pub fn reset(&mut self) {
        self.history.reset(&mut self.canvas);
        self.active = None;
    }

    /// Number of completed strokes currently in the history.
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.history.len()
    }

    /// Read access to the drawing surface, e.g. for export.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
