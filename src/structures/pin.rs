//! Pin records.

use crate::types::{PinShape, PortType};

/// A scalar (single-wire) pin of a symbol.
///
/// `(start_x, start_y)` is where the pin meets the symbol body;
/// `(hotpt_x, hotpt_y)` is the connection hot point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolPinScalar {
    pub name: String,
    pub start_x: i32,
    pub start_y: i32,
    pub hotpt_x: i32,
    pub hotpt_y: i32,
    pub pin_shape: PinShape,
    pub port_type: PortType,
}

/// A bus pin of a symbol. Same layout as the scalar variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolPinBus {
    pub name: String,
    pub start_x: i32,
    pub start_y: i32,
    pub hotpt_x: i32,
    pub hotpt_y: i32,
    pub pin_shape: PinShape,
    pub port_type: PortType,
}

/// One entry of a pin index mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PinMapEntry {
    /// Pin name, in order ('Pin Properties' -> 'Order').
    pub name: String,
    /// Per-pin property tag; observed values are 0x7F, 0xAA and 0xFF.
    /// Adding a property such as NET_SHORT switches 0x7F to 0xAA.
    pub property: u8,
}

/// Mapping from a package unit to its ordered pin names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PinIdxMapping {
    pub unit_ref: String,
    pub ref_des: String,
    pub pin_map: Vec<PinMapEntry>,
}
