//! # orcadrust
//!
//! A pure Rust library for reading OrCAD Capture library (`.OLB`/`.OBK`)
//! and schematic (`.DSN`/`.DBK`) files.
//!
//! The file format is proprietary and undocumented; this library is the
//! result of ongoing reverse engineering.  A container is a compound
//! document holding many named byte streams; each stream is a sequence of
//! length-prefixed, self-describing tagged records that nest recursively.
//! Parsing materialises a typed object tree rooted in [`Library`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orcadrust::io::olb::OlbReader;
//! use orcadrust::types::FileType;
//!
//! // Parse an already-extracted container tree.
//! let mut reader = OlbReader::from_extracted("extracted/", FileType::Library);
//! let library = reader.read()?;
//!
//! for package in &library.packages {
//!     println!("package: {}", package.package_properties.name);
//! }
//! # Ok::<(), orcadrust::OlbError>(())
//! ```
//!
//! Opening a container file directly requires a compound-document
//! extractor, injected through
//! [`ContainerExtractor`](io::olb::ContainerExtractor):
//!
//! ```rust,ignore
//! let mut reader = OlbReader::from_file("parts.olb", &extractor)?;
//! let library = reader.read()?;
//! ```
//!
//! ## Error model
//!
//! Streams fail independently: a malformed record aborts the containing
//! stream, is counted and reported, and the run continues with the other
//! streams (failsafe mode, the default).  Errors outside stream scope,
//! such as a missing required directory, abort the run.
//!
//! ## Scope
//!
//! Read-only. The format is not written back, arbitrary corruption is not
//! recovered from, and the record semantics (electrical rules etc.) are
//! not interpreted.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod library;
pub mod notification;
pub mod primitives;
pub mod structures;
pub mod types;

// Re-export commonly used types
pub use error::{OlbError, Result};
pub use library::{Library, Package, Schematic, StringTable, Symbol, SymbolPin, SymbolsLibrary};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{
    Color, ComponentType, FileFormatVersion, FileType, FillStyle, HatchStyle, LineStyle,
    LineWidth, PinShape, PortType, Rotation,
};

// Re-export reader entry points
pub use io::olb::{OlbReader, OlbReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
