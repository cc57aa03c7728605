//! Polyline primitive.

use super::Point;
use crate::types::{LineStyle, LineWidth};

/// An open chain of line segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polyline {
    pub line_style: Option<LineStyle>,
    pub line_width: Option<LineWidth>,
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn line_style(&self) -> LineStyle {
        self.line_style.unwrap_or_default()
    }

    pub fn line_width(&self) -> LineWidth {
        self.line_width.unwrap_or_default()
    }
}
