//! Reader for the compound-container stream format shared by `.OLB`/`.OBK`
//! libraries and `.DSN`/`.DBK` schematics.
//!
//! The container itself (a compound document) is opened by an external
//! extractor (see [`extractor`]); this module parses the extracted streams:
//! length-prefixed, self-describing tagged records that nest recursively,
//! vary with format generation, and cross-check their extent through
//! embedded end offsets ("future data").

pub mod data_stream;
pub mod extractor;
pub mod future_data;
pub mod prefix;
pub mod primitive_type;
pub mod reader;
pub mod structure_type;

pub use data_stream::DataStream;
pub use extractor::{ContainerExtractor, ExtractionDir};
pub use future_data::FutureDataStack;
pub use primitive_type::Primitive;
pub use reader::{OlbReader, OlbReaderConfiguration};
pub use structure_type::Structure;

/// The four magic bytes opening every record preamble.
pub const PREAMBLE_MAGIC: [u8; 4] = [0xFF, 0xE4, 0x5C, 0x39];
