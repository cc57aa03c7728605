//! Rectangle primitive.

use crate::types::{FillStyle, HatchStyle, LineStyle, LineWidth};

/// An axis-aligned rectangle spanned by two corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub line_style: Option<LineStyle>,
    pub line_width: Option<LineWidth>,
    pub fill_style: Option<FillStyle>,
    pub hatch_style: Option<HatchStyle>,
}

impl Rect {
    /// Create a rectangle from two corners with default styling.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            ..Self::default()
        }
    }

    /// Stroke pattern, defaulting to solid when absent.
    pub fn line_style(&self) -> LineStyle {
        self.line_style.unwrap_or_default()
    }

    /// Stroke width, defaulting to the session width when absent.
    pub fn line_width(&self) -> LineWidth {
        self.line_width.unwrap_or_default()
    }

    /// Interior fill, defaulting to none when absent.
    pub fn fill_style(&self) -> FillStyle {
        self.fill_style.unwrap_or_default()
    }

    /// Hatch pattern, `NotValid` when the shape is not hatched.
    pub fn hatch_style(&self) -> HatchStyle {
        self.hatch_style.unwrap_or_default()
    }
}
