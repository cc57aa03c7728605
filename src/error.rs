//! Error types for orcadrust library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for orcadrust operations
#[derive(Debug, Error)]
pub enum OlbError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Read past the end of a stream
    #[error("Truncated stream: read past end at offset {offset:#X}")]
    TruncatedStream {
        /// Offset at which the read was attempted
        offset: u64,
    },

    /// Preamble or fixed byte sequence mismatch
    #[error("Magic mismatch at offset {offset:#X}: expected {expected:02X?}, got {got:02X?}")]
    MagicMismatch {
        /// Offset of the first mismatching byte sequence
        offset: u64,
        /// The bytes that were expected
        expected: Vec<u8>,
        /// The bytes actually found
        got: Vec<u8>,
    },

    /// Prefix tag pair disagreement
    #[error("Tag mismatch at offset {offset:#X}: first {first:#04X}, repeat {repeat:#04X}")]
    TagMismatch {
        /// Offset of the repeated tag
        offset: u64,
        /// The tag read first
        first: u8,
        /// The repeated tag that should equal `first`
        repeat: u8,
    },

    /// No record reader registered for a structure tag
    #[error("Unknown structure tag {tag:#04X} at offset {offset:#X}")]
    UnknownStructure {
        /// The unrecognised tag value
        tag: u8,
        /// Offset at which the tag was read
        offset: u64,
    },

    /// Enum conversion failure
    #[error("Unknown {kind} value {raw:#X} at offset {offset:#X}")]
    UnknownEnumValue {
        /// Name of the enum that rejected the value
        kind: &'static str,
        /// The raw value found in the stream
        raw: u32,
        /// Offset just past the read value
        offset: u64,
    },

    /// Future-data boundary violated
    #[error("Checkpoint misaligned: expected end {expected_end:#X}, actual {actual:#X}")]
    CheckpointMisaligned {
        /// Declared end offset of the bracketed region
        expected_end: u64,
        /// Offset the reader actually stopped at
        actual: u64,
    },

    /// A documented invariant of the format was violated
    #[error("Invariant violated at offset {offset:#X}: {what}")]
    InvariantViolated {
        /// Description of the violated invariant
        what: String,
        /// Offset at which the violation was detected
        offset: u64,
    },

    /// Required stream or directory absent from the container
    #[error("Missing file or directory: {path}")]
    FilesystemMissing {
        /// The expected path
        path: PathBuf,
    },

    /// Input file extension cannot be classified
    #[error("Unknown file kind: extension `{extension}`")]
    UnknownFileKind {
        /// The unrecognised extension (uppercased, including the dot)
        extension: String,
    },
}

/// Result type alias for orcadrust operations
pub type Result<T> = std::result::Result<T, OlbError>;
