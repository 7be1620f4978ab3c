//! Basic geometry types for touch input and visual layout.
//!
//! Coordinates are logical pixels in the host scene graph's space.

/// A point or displacement in 2D space.
///
/// Drag gestures report their offset from the gesture start as a `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// The component along `orientation`.
    #[inline]
    pub fn along(self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// A copy with the component along `orientation` replaced.
    #[inline]
    pub fn with_along(self, orientation: Orientation, value: f32) -> Self {
        match orientation {
            Orientation::Horizontal => Self { x: value, ..self },
            Orientation::Vertical => Self { y: value, ..self },
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The extent along `orientation`.
    #[inline]
    pub fn along(self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// A copy with the extent along `orientation` replaced.
    #[inline]
    pub fn with_along(self, orientation: Orientation, extent: f32) -> Self {
        match orientation {
            Orientation::Horizontal => Self { width: extent, ..self },
            Orientation::Vertical => Self { height: extent, ..self },
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// The axis a slider or scroll bar moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right; uses `x` offsets and widths.
    #[default]
    Horizontal,
    /// Top to bottom; uses `y` offsets and heights.
    Vertical,
}
