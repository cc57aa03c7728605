//! Rotation of placed symbols and display properties.

use super::FromRaw;

/// Counter-clockwise rotation in 90 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rotation {
    Deg0 = 0,
    Deg90 = 1,
    Deg180 = 2,
    Deg270 = 3,
}

impl Rotation {
    /// The rotation angle in degrees.
    pub fn degrees(self) -> u16 {
        self as u16 * 90
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::Deg0
    }
}

impl FromRaw for Rotation {
    const KIND: &'static str = "Rotation";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}
