//! Core value types shared across the library.
//!
//! Every enum that appears in the stream encodes as a small integer; the
//! conversions here are total over the observed corpus and reject everything
//! else (the reader turns a rejection into
//! [`OlbError::UnknownEnumValue`](crate::error::OlbError::UnknownEnumValue)).

pub mod color;
pub mod component;
pub mod fill;
pub mod line;
pub mod pin;
pub mod rotation;
pub mod version;

pub use color::Color;
pub use component::{ComponentType, ImplementationType};
pub use fill::{FillStyle, HatchStyle};
pub use line::{LineStyle, LineWidth};
pub use pin::{PinShape, PortType};
pub use rotation::Rotation;
pub use version::{FileFormatVersion, FileType};

/// Conversion between an enum and its exact raw stream encoding.
///
/// `from_raw` returns `None` for values with no named variant; `as_raw`
/// round-trips an observed value exactly.
pub trait FromRaw: Sized + Copy {
    /// Name used in `UnknownEnumValue` diagnostics.
    const KIND: &'static str;

    /// Convert a raw stream value into a variant.
    fn from_raw(raw: u32) -> Option<Self>;

    /// The raw encoding of this variant.
    fn as_raw(self) -> u32;
}
