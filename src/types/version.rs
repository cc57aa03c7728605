//! File format versions and input file classification.

use std::path::Path;

use crate::error::{OlbError, Result};

/// Layout generation of the container's streams.
///
/// The generations are ordered; later tool releases produce later
/// generations.  The generation selects layout variants inside records,
/// most visibly in geometry lists (see the geometry reader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileFormatVersion {
    A,
    B,
    C,
}

impl Default for FileFormatVersion {
    fn default() -> Self {
        // Current tool releases write generation C.
        Self::C
    }
}

/// Per-stream format version markers recorded on directory entries.
///
/// Observed across tool releases 16.x to 17.4; e.g. 471 in 17.4-2019 S012
/// and 472 in 17.4-2019 S019.
pub const KNOWN_STREAM_VERSIONS: std::ops::RangeInclusive<u16> = 445..=472;

/// Classification of an input file by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// A component library (`.OLB`, or its backup `.OBK`).
    Library,
    /// A schematic design (`.DSN`, or its backup `.DBK`).
    Schematic,
}

impl FileType {
    /// Classify a file by its extension, ignoring case.
    pub fn from_extension(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_uppercase())
            .unwrap_or_default();

        match extension.as_str() {
            "OLB" | "OBK" => Ok(Self::Library),
            "DSN" | "DBK" => Ok(Self::Schematic),
            _ => Err(OlbError::UnknownFileKind {
                extension: format!(".{extension}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_version_ordering() {
        assert!(FileFormatVersion::A < FileFormatVersion::B);
        assert!(FileFormatVersion::B < FileFormatVersion::C);
        assert_eq!(FileFormatVersion::default(), FileFormatVersion::C);
    }

    #[test]
    fn test_file_type_case_insensitive() {
        assert_eq!(
            FileType::from_extension(&PathBuf::from("lib.olb")).unwrap(),
            FileType::Library
        );
        assert_eq!(
            FileType::from_extension(&PathBuf::from("LIB.OBK")).unwrap(),
            FileType::Library
        );
        assert_eq!(
            FileType::from_extension(&PathBuf::from("design.Dsn")).unwrap(),
            FileType::Schematic
        );
        assert_eq!(
            FileType::from_extension(&PathBuf::from("backup.dbk")).unwrap(),
            FileType::Schematic
        );
    }

    #[test]
    fn test_file_type_unknown() {
        let err = FileType::from_extension(&PathBuf::from("design.pdf")).unwrap_err();
        assert!(matches!(err, OlbError::UnknownFileKind { extension } if extension == ".PDF"));
    }

    #[test]
    fn test_known_stream_versions() {
        assert!(KNOWN_STREAM_VERSIONS.contains(&445));
        assert!(KNOWN_STREAM_VERSIONS.contains(&472));
        assert!(!KNOWN_STREAM_VERSIONS.contains(&444));
    }
}
