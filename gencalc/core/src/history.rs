//! History Stack
//!
//! Captures a raster snapshot after each completed stroke and supports
//! whole-stroke undo by restoring the previous snapshot. An in-progress
//! stroke is never snapshotted, so undo always rolls back complete
//! strokes, never partial pen movements.
//!
//! Growth is unbounded by default, an accepted trade-off for long
//! sessions. [`History::with_max_depth`] caps the stack for callers that
//! want a bound.

use crate::canvas::{Canvas, Snapshot};

/// Ordered stack of canvas snapshots, append-only except for the single
/// allowed pop-last (undo) operation.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// Maximum retained snapshots (0 = unlimited).
    max_depth: usize,
}

impl History {
    /// Create an empty, unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that retains at most `max_depth` snapshots,
    /// discarding the oldest when the cap is exceeded (0 = unlimited).
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            max_depth,
        }
    }

    /// Append a snapshot representing the latest committed drawing state.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);

        if self.max_depth > 0 && self.snapshots.len() > self.max_depth {
            let excess = self.snapshots.len() - self.max_depth;
            self.snapshots.drain(..excess);
            tracing::debug!(
                removed = excess,
                remaining = self.snapshots.len(),
                "Pruned oldest history snapshots"
            );
        }
    }

    /// Undo the most recent completed stroke.
    ///
    /// With two or more snapshots, pops the last and restores the canvas
    /// to the new last. With exactly one, pops it and clears the canvas to
    /// blank. With none, does nothing.
    pub fn undo(&mut self, canvas: &mut Canvas) {
        if self.snapshots.pop().is_none() {
            return;
        }
        match self.snapshots.last() {
            Some(previous) => canvas.restore(previous),
            None => canvas.clear(),
        }
    }

    /// Discard all snapshots and clear the canvas to blank.
    pub fn reset(&mut self, canvas: &mut Canvas) {
        self.snapshots.clear();
        canvas.clear();
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshots are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The most recent snapshot, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Color, Point};

    fn canvas_with_marker(step: f32) -> Canvas {
        let mut canvas = Canvas::new(50, 50);
        canvas.draw_segment(
            Point::new(step, step),
            Point::new(step + 10.0, step),
            Color::BLACK,
            4.0,
        );
        canvas
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history = History::new();
        let mut canvas = canvas_with_marker(10.0);

        history.undo(&mut canvas);
        assert_eq!(history.len(), 0);
        // Canvas left untouched
        assert!(!canvas.is_blank());
    }

    #[test]
    fn test_single_snapshot_undo_blanks_canvas() {
        let mut history = History::new();
        let mut canvas = canvas_with_marker(10.0);
        history.record(canvas.snapshot());

        history.undo(&mut canvas);
        assert!(history.is_empty());
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_undo_restores_previous_snapshot() {
        let mut canvas = Canvas::new(50, 50);
        let mut history = History::new();

        canvas.draw_segment(Point::new(5.0, 5.0), Point::new(15.0, 5.0), Color::BLACK, 4.0);
        history.record(canvas.snapshot());

        canvas.draw_segment(Point::new(5.0, 25.0), Point::new(15.0, 25.0), Color::RED, 4.0);
        history.record(canvas.snapshot());
        assert_eq!(history.len(), 2);

        history.undo(&mut canvas);
        assert_eq!(history.len(), 1);
        // First stroke remains, second is gone
        assert_eq!(canvas.pixel(10, 5), Color::BLACK.as_rgba());
        assert_eq!(canvas.pixel(10, 25), image::Rgba([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn test_n_strokes_k_undos_property() {
        let mut canvas = Canvas::new(80, 80);
        let mut history = History::new();

        for i in 0..5u32 {
            #[allow(clippy::cast_precision_loss)]
            let y = 10.0 + (i as f32) * 10.0;
            canvas.draw_segment(Point::new(5.0, y), Point::new(70.0, y), Color::BLACK, 3.0);
            history.record(canvas.snapshot());
        }
        assert_eq!(history.len(), 5);

        for k in 0..3 {
            history.undo(&mut canvas);
            assert_eq!(history.len(), 4 - k);
        }
        // Surface equals the snapshot still on top of the stack
        let top = history.last().expect("two snapshots left").image().clone();
        assert_eq!(canvas.image(), &top);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut canvas = Canvas::new(50, 50);
        let mut history = History::new();
        canvas.draw_segment(Point::new(5.0, 5.0), Point::new(45.0, 45.0), Color::BLUE, 4.0);
        history.record(canvas.snapshot());
        history.record(canvas.snapshot());

        history.reset(&mut canvas);
        assert_eq!(history.len(), 0);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_max_depth_caps_growth() {
        let mut canvas = Canvas::new(50, 50);
        let mut history = History::with_max_depth(3);

        for i in 0..6u32 {
            #[allow(clippy::cast_precision_loss)]
            let y = 5.0 + (i as f32) * 6.0;
            canvas.draw_segment(Point::new(5.0, y), Point::new(45.0, y), Color::BLACK, 2.0);
            history.record(canvas.snapshot());
            assert!(history.len() <= 3);
        }
        assert_eq!(history.len(), 3);

        // Undo still walks the retained sequence
        history.undo(&mut canvas);
        assert_eq!(history.len(), 2);
        let top = history.last().expect("snapshot left").image().clone();
        assert_eq!(canvas.image(), &top);
    }
}
