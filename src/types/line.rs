//! Line style and width catalogues.

use super::FromRaw;

/// Stroke pattern of lines, wires and shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineStyle {
    Solid = 0,
    Dash = 1,
    Dot = 2,
    DashDot = 3,
    DashDotDot = 4,
    /// Use the style configured in the session preferences.
    Default = 5,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::Solid
    }
}

impl FromRaw for LineStyle {
    const KIND: &'static str = "LineStyle";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Solid,
            1 => Self::Dash,
            2 => Self::Dot,
            3 => Self::DashDot,
            4 => Self::DashDotDot,
            5 => Self::Default,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Stroke width of lines, wires and shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineWidth {
    Thin = 0,
    Medium = 1,
    Wide = 2,
    /// Use the width configured in the session preferences.
    Default = 3,
}

impl Default for LineWidth {
    fn default() -> Self {
        Self::Default
    }
}

impl FromRaw for LineWidth {
    const KIND: &'static str = "LineWidth";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Thin,
            1 => Self::Medium,
            2 => Self::Wide,
            3 => Self::Default,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}
