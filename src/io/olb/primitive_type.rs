//! Geometry primitive tag codes.

/// Tags of the leaf shapes inside a geometry specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Primitive {
    Rect = 40,
    Line = 41,
    Arc = 42,
    Ellipse = 43,
    Polygon = 44,
    Polyline = 45,
    CommentText = 48,
    Bitmap = 50,
    SymbolVector = 51,
    Bezier = 87,
}

impl Primitive {
    /// Create a `Primitive` from a raw tag byte.
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            40 => Self::Rect,
            41 => Self::Line,
            42 => Self::Arc,
            43 => Self::Ellipse,
            44 => Self::Polygon,
            45 => Self::Polyline,
            48 => Self::CommentText,
            50 => Self::Bitmap,
            51 => Self::SymbolVector,
            87 => Self::Bezier,
            _ => return None,
        })
    }

    /// The raw tag byte.
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}
