//! Structure tag codes.
//!
//! Every record carries one of these one-byte tags.  Records whose purpose
//! is still unknown are named after their tag value (`T0x10`, `T0x1f`).

/// Record tags as they appear in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Structure {
    Properties = 0x01,
    SthInPages0 = 0x02,
    GeoDefinition = 0x04,
    SymbolDisplayProp = 0x07,
    SymbolPinScalar = 0x08,
    SymbolPinBus = 0x09,
    PinIdxMapping = 0x0A,
    PartInst = 0x0D,
    T0x10 = 0x10,
    WireScalar = 0x14,
    Alias = 0x15,
    BusEntry = 0x17,
    T0x1f = 0x1F,
    GlobalSymbol = 0x21,
    PortSymbol = 0x22,
    OffPageSymbol = 0x23,
    TitleBlockSymbol = 0x24,
    GraphicBoxInst = 0x25,
    GraphicCommentTextInst = 0x26,
    SymbolVector = 0x30,
    ErcSymbol = 0x4B,
    PinShapeSymbol = 0x62,
}

impl Structure {
    /// Create a `Structure` from a raw tag byte.
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0x01 => Self::Properties,
            0x02 => Self::SthInPages0,
            0x04 => Self::GeoDefinition,
            0x07 => Self::SymbolDisplayProp,
            0x08 => Self::SymbolPinScalar,
            0x09 => Self::SymbolPinBus,
            0x0A => Self::PinIdxMapping,
            0x0D => Self::PartInst,
            0x10 => Self::T0x10,
            0x14 => Self::WireScalar,
            0x15 => Self::Alias,
            0x17 => Self::BusEntry,
            0x1F => Self::T0x1f,
            0x21 => Self::GlobalSymbol,
            0x22 => Self::PortSymbol,
            0x23 => Self::OffPageSymbol,
            0x24 => Self::TitleBlockSymbol,
            0x25 => Self::GraphicBoxInst,
            0x26 => Self::GraphicCommentTextInst,
            0x30 => Self::SymbolVector,
            0x4B => Self::ErcSymbol,
            0x62 => Self::PinShapeSymbol,
            _ => return None,
        })
    }

    /// The raw tag byte.
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Whether records of this kind are stored behind a preamble.
    ///
    /// `None` for tags that never occur in a conditional-preamble position.
    pub fn preamble_requirement(self) -> Option<bool> {
        Some(match self {
            Self::Properties => true,
            Self::GeoDefinition => false,
            Self::SymbolPinScalar => true,
            Self::SymbolPinBus => false,
            Self::T0x1f => true,
            Self::PinIdxMapping => true,
            Self::GlobalSymbol => false,
            Self::PortSymbol => false,
            Self::OffPageSymbol => true,
            Self::SymbolDisplayProp => true,
            Self::SymbolVector => false,
            Self::TitleBlockSymbol => false,
            Self::ErcSymbol => false,
            Self::PinShapeSymbol => false,
            _ => return None,
        })
    }
}
