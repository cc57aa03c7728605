//! Property blocks attached to symbols, packages and parts.

use bitflags::bitflags;

use crate::types::ImplementationType;

/// Per-view properties of a symbol.
///
/// A symbol has one (`.Normal`) or two (`.Normal` and `.Convert`) views;
/// `view_number` records which, and `convert_name` is present only for two.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    /// Reference string of the symbol (e.g. `U?`).
    pub reference: String,
    /// Number of views; 1 (`.Normal`) or 2 (`.Normal` + `.Convert`).
    pub view_number: u16,
    /// Name of the convert view; only present when `view_number == 2`.
    pub convert_name: Option<String>,
    /// Name of the symbol.
    pub name: String,
}

/// Secondary property block found on directory-adjacent records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties2 {
    pub name: String,
    pub ref_des: String,
    pub footprint: String,
    /// Number of sections (units) of the package.
    pub section_count: u16,
}

bitflags! {
    /// Pin display bits of the packed properties byte.
    ///
    /// Bit 2 is stored inverted: a set bit hides the pin numbers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PinFlags: u8 {
        const PIN_NAME_VISIBLE = 0b0000_0001;
        const PIN_NAME_ROTATE = 0b0000_0010;
        const PIN_NUMBER_HIDDEN = 0b0000_0100;
    }
}

/// General part properties.
///
/// See 'Part Properties' and 'Package Properties' in the schematic editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneralProperties {
    /// Implementation path of the symbol ('Part Properties' ->
    /// 'Implementation Path').
    pub implementation_path: String,
    /// Implementation of the symbol ('Part Properties' -> 'Implementation').
    pub implementation: String,
    /// Reference prefix, e.g. `R` for resistors.
    pub ref_des_prefix: String,
    /// Value of the part, e.g. `10k`.
    pub part_value: String,
    /// Pin name/number display bits.
    pub pin_flags: PinFlags,
    pub implementation_type: ImplementationType,
}

impl GeneralProperties {
    pub fn pin_name_visible(&self) -> bool {
        self.pin_flags.contains(PinFlags::PIN_NAME_VISIBLE)
    }

    pub fn pin_name_rotate(&self) -> bool {
        self.pin_flags.contains(PinFlags::PIN_NAME_ROTATE)
    }

    /// Whether pin numbers are shown. The stored bit hides them.
    pub fn pin_number_visible(&self) -> bool {
        !self.pin_flags.contains(PinFlags::PIN_NUMBER_HIDDEN)
    }
}
