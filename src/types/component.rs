//! Component and implementation type catalogues.

use super::FromRaw;

/// Kind of a library component, as recorded in directory streams and
/// `$Types$` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentType {
    ExportBlock = 1,
    Graphic = 2,
    Package = 3,
    Part = 4,
    Cell = 5,
    View = 6,
    GlobalSymbol = 7,
    PortSymbol = 8,
    OffPageSymbol = 9,
    TitleBlockSymbol = 10,
    ErcSymbol = 11,
    PinShapeSymbol = 12,
}

impl FromRaw for ComponentType {
    const KIND: &'static str = "ComponentType";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            1 => Self::ExportBlock,
            2 => Self::Graphic,
            3 => Self::Package,
            4 => Self::Part,
            5 => Self::Cell,
            6 => Self::View,
            7 => Self::GlobalSymbol,
            8 => Self::PortSymbol,
            9 => Self::OffPageSymbol,
            10 => Self::TitleBlockSymbol,
            11 => Self::ErcSymbol,
            12 => Self::PinShapeSymbol,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Implementation attached to a part (see 'Part Properties' ->
/// 'Implementation').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImplementationType {
    None = 0,
    SchematicView = 1,
    Vhdl = 2,
    Edif = 3,
    Project = 4,
    PspiceModel = 5,
    PspiceStimulus = 6,
    Verilog = 7,
}

impl Default for ImplementationType {
    fn default() -> Self {
        Self::None
    }
}

impl FromRaw for ImplementationType {
    const KIND: &'static str = "ImplementationType";

    fn from_raw(raw: u32) -> Option<Self> {
        Some(match raw {
            0 => Self::None,
            1 => Self::SchematicView,
            2 => Self::Vhdl,
            3 => Self::Edif,
            4 => Self::Project,
            5 => Self::PspiceModel,
            6 => Self::PspiceStimulus,
            7 => Self::Verilog,
            _ => return None,
        })
    }

    fn as_raw(self) -> u32 {
        self as u32
    }
}
