//! Geometry specifications.

use crate::primitives::{
    Arc, Bezier, Bitmap, CommentText, Ellipse, GraphicPrimitive, Line, Polygon, Polyline, Rect,
    SymbolVector,
};

/// A named bag of geometry primitives.
///
/// Symbols and packages describe their drawing as one of these; the
/// per-kind sequences keep their stream order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometrySpecification {
    pub name: String,
    pub rects: Vec<Rect>,
    pub lines: Vec<Line>,
    pub arcs: Vec<Arc>,
    pub ellipses: Vec<Ellipse>,
    pub polygons: Vec<Polygon>,
    pub polylines: Vec<Polyline>,
    pub beziers: Vec<Bezier>,
    pub bitmaps: Vec<Bitmap>,
    pub comment_texts: Vec<CommentText>,
    pub symbol_vectors: Vec<SymbolVector>,
}

impl GeometrySpecification {
    /// Store a primitive in the sequence of its kind.
    pub fn push(&mut self, primitive: GraphicPrimitive) {
        match primitive {
            GraphicPrimitive::Rect(p) => self.rects.push(p),
            GraphicPrimitive::Line(p) => self.lines.push(p),
            GraphicPrimitive::Arc(p) => self.arcs.push(p),
            GraphicPrimitive::Ellipse(p) => self.ellipses.push(p),
            GraphicPrimitive::Polygon(p) => self.polygons.push(p),
            GraphicPrimitive::Polyline(p) => self.polylines.push(p),
            GraphicPrimitive::Bezier(p) => self.beziers.push(p),
            GraphicPrimitive::Bitmap(p) => self.bitmaps.push(p),
            GraphicPrimitive::CommentText(p) => self.comment_texts.push(p),
            GraphicPrimitive::SymbolVector(p) => self.symbol_vectors.push(p),
        }
    }

    /// Total number of primitives of all kinds.
    pub fn primitive_count(&self) -> usize {
        self.rects.len()
            + self.lines.len()
            + self.arcs.len()
            + self.ellipses.len()
            + self.polygons.len()
            + self.polylines.len()
            + self.beziers.len()
            + self.bitmaps.len()
            + self.comment_texts.len()
            + self.symbol_vectors.len()
    }
}
