//! Raster Surface
//!
//! A fixed-dimension RGBA pixel buffer plus the rasterization primitives
//! used to draw free-hand strokes onto it. Dimensions are immutable for
//! the lifetime of a drawing session; snapshots and exports copy pixels
//! out rather than sharing the live buffer.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::stroke::{Color, Point};

/// Default canvas width in device pixels.
pub const CANVAS_WIDTH: u32 = 740;
/// Default canvas height in device pixels.
pub const CANVAS_HEIGHT: u32 = 500;

/// The background pixel the canvas is cleared to.
const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// An immutable copy of the canvas content at one point in time.
///
/// Snapshots are the currency of the [`History`](crate::history::History)
/// stack: one is recorded after each completed stroke, and undo restores
/// the canvas from the previous one.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pixels: Arc<RgbaImage>,
}

impl Snapshot {
    /// Width of the captured surface.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height of the captured surface.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The captured pixel data.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// A fixed-dimension RGBA drawing surface.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a blank (white) canvas of the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, BACKGROUND),
        }
    }

    /// Surface width in device pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Surface height in device pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read access to the pixel buffer (for export and tests).
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// The pixel at `(x, y)`. Panics outside the surface; tests only probe
    /// in-bounds coordinates.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// Clear the surface back to the blank background.
    pub fn clear(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = BACKGROUND;
        }
    }

    /// Whether every pixel equals the blank background.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|px| *px == BACKGROUND)
    }

    /// Capture an immutable copy of the current content.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pixels: Arc::new(self.pixels.clone()),
        }
    }

    /// Restore the surface from a snapshot taken earlier in this session.
    ///
    /// Snapshots always match the session dimensions, so this is a plain
    /// pixel copy.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.pixels.clone_from(snapshot.pixels.as_ref());
    }

    /// Draw a line segment from `from` to `to` with the given color and
    /// width, mutating the surface in place.
    ///
    /// The segment is walked with Bresenham's algorithm and a filled disc
    /// of diameter `width` is stamped at every step, giving round-cap
    /// strokes.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let rgba = color.as_rgba();
        let radius = (width / 2.0).max(0.5);

        #[allow(clippy::cast_possible_truncation)]
        let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
        #[allow(clippy::cast_possible_truncation)]
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp_disc(x0, y0, radius, rgba);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Stamp a filled disc centered at `(cx, cy)`.
    fn stamp_disc(&mut self, cx: i32, cy: i32, radius: f32, rgba: Rgba<u8>) {
        #[allow(clippy::cast_possible_truncation)]
        let reach = radius.ceil() as i32;
        let r_sq = radius * radius;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                #[allow(clippy::cast_precision_loss)]
                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq <= r_sq {
                    self.put_pixel_clipped(cx + dx, cy + dy, rgba);
                }
            }
        }
    }

    /// Write a pixel if `(x, y)` is inside the surface; off-surface writes
    /// are silently dropped (pointer events can leave the canvas bounds).
    fn put_pixel_clipped(&mut self, x: i32, y: i32, rgba: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        #[allow(clippy::cast_sign_loss)]
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }
        self.pixels.put_pixel(x, y, rgba);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
