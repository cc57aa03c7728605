//! Fill and hatch style catalogues for closed shapes.

use super::FromRaw;

/// Interior fill of closed shapes (rects, ellipses, polygons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FillStyle {
    /// Outline only.
    None = 0,
    Solid = 1,
    /// Hatched; the pattern is given by the accompanying [`HatchStyle`].
    Hatched = 2,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::None
    }
}

impl FromRaw for FillStyle {
    const KIND: &'static str = "FillStyle";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::None,
            1 => Self::Solid,
            2 => Self::Hatched,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Hatch pattern of a hatched fill.
///
/// `NotValid` marks shapes whose fill is not hatched; it encodes as
/// `0xFFFFFFFF` in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatchStyle {
    LinesHorizontal,
    LinesVertical,
    DiagonalLeft,
    DiagonalRight,
    Checkerboard,
    Mesh,
    NotValid,
}

impl Default for HatchStyle {
    fn default() -> Self {
        Self::NotValid
    }
}

impl FromRaw for HatchStyle {
    const KIND: &'static str = "HatchStyle";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::LinesHorizontal,
            1 => Self::LinesVertical,
            2 => Self::DiagonalLeft,
            3 => Self::DiagonalRight,
            4 => Self::Checkerboard,
            5 => Self::Mesh,
            0xFFFF_FFFF => Self::NotValid,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        match self {
            Self::LinesHorizontal => 0,
            Self::LinesVertical => 1,
            Self::DiagonalLeft => 2,
            Self::DiagonalRight => 3,
            Self::Checkerboard => 4,
            Self::Mesh => 5,
            Self::NotValid => 0xFFFF_FFFF,
        }
    }
}
