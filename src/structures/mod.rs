//! Record data types.
//!
//! Each stream is a sequence of tagged records; the tag tells the reader
//! which of these types to materialise.  [`Record`] is the sum over all of
//! them, produced by the central dispatcher in the reader.

pub mod display_prop;
pub mod geometry;
pub mod inst;
pub mod page;
pub mod pin;
pub mod properties;

pub use display_prop::{PropVisibility, SymbolDisplayProp};
pub use geometry::GeometrySpecification;
pub use inst::{
    Alias, BusEntry, ErcSymbol, GraphicBoxInst, GraphicCommentTextInst, PartInst, SthInPages0,
    SymbolBBox, T0x10, T0x1f, WireScalar,
};
pub use page::{GridReference, Page};
pub use pin::{PinIdxMapping, PinMapEntry, SymbolPinBus, SymbolPinScalar};
pub use properties::{GeneralProperties, PinFlags, Properties, Properties2};

use crate::io::olb::structure_type::Structure;
use crate::primitives::SymbolVector;

/// A parsed record of any kind.
///
/// The symbol variants (`GlobalSymbol`, `PortSymbol`, `OffPageSymbol`,
/// `TitleBlockSymbol`, `PinShapeSymbol`) all carry a geometry specification;
/// they are kept apart so the originating tag survives the parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Properties(Properties),
    SthInPages0(SthInPages0),
    PartInst(PartInst),
    T0x10(T0x10),
    WireScalar(WireScalar),
    Geometry(GeometrySpecification),
    SymbolPinScalar(SymbolPinScalar),
    SymbolPinBus(SymbolPinBus),
    T0x1f(T0x1f),
    PinIdxMapping(PinIdxMapping),
    GlobalSymbol(GeometrySpecification),
    PortSymbol(GeometrySpecification),
    OffPageSymbol(GeometrySpecification),
    TitleBlockSymbol(GeometrySpecification),
    ErcSymbol(ErcSymbol),
    PinShapeSymbol(GeometrySpecification),
    SymbolDisplayProp(SymbolDisplayProp),
    Alias(Alias),
    GraphicBoxInst(GraphicBoxInst),
    GraphicCommentTextInst(GraphicCommentTextInst),
    BusEntry(BusEntry),
    SymbolVector(SymbolVector),
}

impl Record {
    /// The structure tag this record was parsed from.
    pub fn structure(&self) -> Structure {
        match self {
            Self::Properties(_) => Structure::Properties,
            Self::SthInPages0(_) => Structure::SthInPages0,
            Self::PartInst(_) => Structure::PartInst,
            Self::T0x10(_) => Structure::T0x10,
            Self::WireScalar(_) => Structure::WireScalar,
            Self::Geometry(_) => Structure::GeoDefinition,
            Self::SymbolPinScalar(_) => Structure::SymbolPinScalar,
            Self::SymbolPinBus(_) => Structure::SymbolPinBus,
            Self::T0x1f(_) => Structure::T0x1f,
            Self::PinIdxMapping(_) => Structure::PinIdxMapping,
            Self::GlobalSymbol(_) => Structure::GlobalSymbol,
            Self::PortSymbol(_) => Structure::PortSymbol,
            Self::OffPageSymbol(_) => Structure::OffPageSymbol,
            Self::TitleBlockSymbol(_) => Structure::TitleBlockSymbol,
            Self::ErcSymbol(_) => Structure::ErcSymbol,
            Self::PinShapeSymbol(_) => Structure::PinShapeSymbol,
            Self::SymbolDisplayProp(_) => Structure::SymbolDisplayProp,
            Self::Alias(_) => Structure::Alias,
            Self::GraphicBoxInst(_) => Structure::GraphicBoxInst,
            Self::GraphicCommentTextInst(_) => Structure::GraphicCommentTextInst,
            Self::BusEntry(_) => Structure::BusEntry,
            Self::SymbolVector(_) => Structure::SymbolVector,
        }
    }
}
