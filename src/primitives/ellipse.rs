//! Ellipse primitive.

use crate::types::{FillStyle, HatchStyle, LineStyle, LineWidth};

/// An ellipse spanned by its bounding box corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ellipse {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub line_style: Option<LineStyle>,
    pub line_width: Option<LineWidth>,
    pub fill_style: Option<FillStyle>,
    pub hatch_style: Option<HatchStyle>,
}

impl Ellipse {
    pub fn line_style(&self) -> LineStyle {
        self.line_style.unwrap_or_default()
    }

    pub fn line_width(&self) -> LineWidth {
        self.line_width.unwrap_or_default()
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style.unwrap_or_default()
    }

    pub fn hatch_style(&self) -> HatchStyle {
        self.hatch_style.unwrap_or_default()
    }
}
