//! Pen and Stroke Types
//!
//! A stroke is one continuous pen motion from contact to release. Strokes
//! are not persisted; only their rasterized effect on the canvas survives,
//! captured by the history stack as a snapshot when the stroke completes.

use serde::{Deserialize, Serialize};

/// A pointer position on the canvas, in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the canvas origin.
    pub x: f32,
    /// Vertical offset from the canvas origin.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An opaque RGB pen color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black (the default pen color).
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    /// Red.
    pub const RED: Self = Self::rgb(0xef, 0x44, 0x44);
    /// Green.
    pub const GREEN: Self = Self::rgb(0x22, 0xc5, 0x5e);
    /// Blue.
    pub const BLUE: Self = Self::rgb(0x3b, 0x82, 0xf6);
    /// Yellow.
    pub const YELLOW: Self = Self::rgb(0xea, 0xb3, 0x08);
    /// Pink.
    pub const PINK: Self = Self::rgb(0xec, 0x48, 0x99);
    /// Cyan.
    pub const CYAN: Self = Self::rgb(0x06, 0xb6, 0xd4);
    /// Orange.
    pub const ORANGE: Self = Self::rgb(0xf9, 0x73, 0x16);
    /// Purple.
    pub const PURPLE: Self = Self::rgb(0xa8, 0x55, 0xf7);
    /// White (doubles as an eraser on the white canvas).
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// The selectable palette, in display order.
    pub const PALETTE: [Self; 10] = [
        Self::BLACK,
        Self::RED,
        Self::GREEN,
        Self::BLUE,
        Self::YELLOW,
        Self::PINK,
        Self::CYAN,
        Self::ORANGE,
        Self::PURPLE,
        Self::WHITE,
    ];

    /// Create a color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The fully opaque RGBA pixel value for this color.
    #[must_use]
    pub fn as_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 0xff])
    }
}

/// Pen settings applied to future strokes.
///
/// Changing the pen never affects pixels already on the canvas, and an
/// in-flight stroke keeps the settings it started with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in device pixels.
    pub width: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 4.0,
        }
    }
}

/// A stroke in progress, alive between pointer-down and pointer-up.
///
/// The color and width are captured from the pen at the moment the stroke
/// starts; later pen changes do not apply retroactively.
#[derive(Clone, Debug)]
pub struct ActiveStroke {
    points: Vec<Point>,
    color: Color,
    width: f32,
}

impl ActiveStroke {
    /// Begin a stroke at `start` with the given pen settings.
    #[must_use]
    pub fn begin(pen: Pen, start: Point) -> Self {
        Self {
            points: vec![start],
            color: pen.color,
            width: pen.width,
        }
    }

    /// Append a point to the stroke path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// The most recent point of the stroke.
    #[must_use]
    pub fn last_point(&self) -> Point {
        // begin() seeds the path, so the vec is never empty
        self.points.last().copied().unwrap_or(Point::new(0.0, 0.0))
    }

    /// The stroke color captured at pointer-down.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The stroke width captured at pointer-down.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of recorded points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
