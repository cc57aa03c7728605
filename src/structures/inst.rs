//! Instance and wiring records found on schematic pages, plus the
//! remaining package-side records.

use super::{GeometrySpecification, Record};
use crate::primitives::GraphicPrimitive;
use crate::types::{Color, LineStyle, LineWidth, Rotation};

/// A placed package instance on a page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartInst {
    pub pkg_name: String,
    pub db_id: u32,
    pub loc_x: i16,
    pub loc_y: i16,
    pub color: Color,
    /// Displayed properties and similar attachments.
    pub records: Vec<Record>,
    pub reference: String,
    /// Second attachment list.
    pub records2: Vec<Record>,
    pub extra: String,
    /// Trailing long-prefixed annex record.
    pub annex: Option<Box<Record>>,
}

/// A scalar wire segment on a page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireScalar {
    pub db_id: u32,
    pub color: Color,
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
    /// Net aliases attached to the wire (present only for wide prefixes).
    pub aliases: Vec<Record>,
    pub line_width: LineWidth,
    pub line_style: LineStyle,
}

/// A net alias label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alias {
    pub loc_x: i32,
    pub loc_y: i32,
    pub color: Color,
    pub rotation: Rotation,
    pub text_font_idx: u16,
    pub name: String,
}

/// A bus entry connecting a wire to a bus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusEntry {
    pub color: Color,
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

/// A placed rectangle graphic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphicBoxInst {
    pub db_id: u32,
    pub loc_x: i16,
    pub loc_y: i16,
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
    pub color: Color,
    /// The wrapped shape record.
    pub shape: Option<Box<Record>>,
}

/// A placed comment text. Contents are not yet reverse engineered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicCommentTextInst;

/// Record of unknown purpose, named after its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct T0x10;

/// Package properties record, named after its tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct T0x1f {
    pub name: String,
    pub ref_des: String,
    pub pcb_footprint: String,
}

/// Bounding box of a symbol drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolBBox {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

/// Wrapper for placed instances on pages.
///
/// Carries its own primitive list; a trailing region holds either a
/// four-coordinate bounding box or data that is skipped to the next
/// checkpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SthInPages0 {
    pub name: String,
    pub some_str: String,
    pub color: Color,
    pub primitives: Vec<GraphicPrimitive>,
    /// Present when the trailing region is exactly eight bytes.
    pub bbox: Option<SymbolBBox>,
}

/// An electrical-rule-check marker symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErcSymbol {
    pub name: String,
    pub geometry: GeometrySpecification,
    pub bbox: SymbolBBox,
}
