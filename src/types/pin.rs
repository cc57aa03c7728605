//! Pin shape and port type catalogues.

use super::FromRaw;

/// Graphical shape of a symbol pin.
///
/// `Short*` variants draw the pin at half length; `ZeroLength` collapses it
/// to the hot point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PinShape {
    Line = 0,
    Clock = 1,
    Dot = 2,
    ClockDot = 3,
    Short = 4,
    ShortClock = 5,
    ShortDot = 6,
    ShortClockDot = 7,
    ZeroLength = 8,
}

impl Default for PinShape {
    fn default() -> Self {
        Self::Line
    }
}

impl FromRaw for PinShape {
    const KIND: &'static str = "PinShape";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Line,
            1 => Self::Clock,
            2 => Self::Dot,
            3 => Self::ClockDot,
            4 => Self::Short,
            5 => Self::ShortClock,
            6 => Self::ShortDot,
            7 => Self::ShortClockDot,
            8 => Self::ZeroLength,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Electrical type of a pin or hierarchical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PortType {
    Input = 0,
    Bidirectional = 1,
    Output = 2,
    OpenCollector = 3,
    Passive = 4,
    ThreeState = 5,
    OpenEmitter = 6,
    Power = 7,
}

impl Default for PortType {
    fn default() -> Self {
        Self::Passive
    }
}

impl FromRaw for PortType {
    const KIND: &'static str = "PortType";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::Input,
            1 => Self::Bidirectional,
            2 => Self::Output,
            3 => Self::OpenCollector,
            4 => Self::Passive,
            5 => Self::ThreeState,
            6 => Self::OpenEmitter,
            7 => Self::Power,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}
