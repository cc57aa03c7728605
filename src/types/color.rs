//! Colour palette indices.
//!
//! The format stores colours as palette indices, one byte wide in display
//! properties and four bytes wide in wires and instances.  Index 48 selects
//! the session default colour.

use super::FromRaw;

/// A colour from the fixed 16-entry palette, or the session default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    Yellow = 14,
    White = 15,
    /// Use the colour configured in the session preferences.
    Default = 48,
}

impl Color {
    /// RGB value of the palette entry. `Default` maps to black.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black | Self::Default => (0x00, 0x00, 0x00),
            Self::Blue => (0x00, 0x00, 0x80),
            Self::Green => (0x00, 0x80, 0x00),
            Self::Cyan => (0x00, 0x80, 0x80),
            Self::Red => (0x80, 0x00, 0x00),
            Self::Magenta => (0x80, 0x00, 0x80),
            Self::Brown => (0x80, 0x80, 0x00),
            Self::LightGray => (0xC0, 0xC0, 0xC0),
            Self::DarkGray => (0x80, 0x80, 0x80),
            Self::LightBlue => (0x00, 0x00, 0xFF),
            Self::LightGreen => (0x00, 0xFF, 0x00),
            Self::LightCyan => (0x00, 0xFF, 0xFF),
            Self::LightRed => (0xFF, 0x00, 0x00),
            Self::LightMagenta => (0xFF, 0x00, 0xFF),
            Self::Yellow => (0xFF, 0xFF, 0x00),
            Self::White => (0xFF, 0xFF, 0xFF),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Default
    }
}

impl FromRaw for Color {
    const KIND: &'static str = "Color";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Black,
            1 => Self::Blue,
            2 => Self::Green,
            3 => Self::Cyan,
            4 => Self::Red,
            5 => Self::Magenta,
            6 => Self::Brown,
            7 => Self::LightGray,
            8 => Self::DarkGray,
            9 => Self::LightBlue,
            10 => Self::LightGreen,
            11 => Self::LightCyan,
            12 => Self::LightRed,
            13 => Self::LightMagenta,
            14 => Self::Yellow,
            15 => Self::White,
            48 => Self::Default,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_known() {
        assert_eq!(Color::from_raw(4), Some(Color::Red));
        assert_eq!(Color::from_raw(48), Some(Color::Default));
    }

    #[test]
    fn test_from_raw_unknown() {
        assert_eq!(Color::from_raw(16), None);
        assert_eq!(Color::from_raw(0xFFFF), None);
    }

    #[test]
    fn test_rgb() {
        assert_eq!(Color::White.rgb(), (0xFF, 0xFF, 0xFF));
        assert_eq!(Color::Default.rgb(), (0x00, 0x00, 0x00));
    }
}
