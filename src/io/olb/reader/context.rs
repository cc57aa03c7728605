//! Per-stream parsing state.

use crate::error::{OlbError, Result};
use crate::io::olb::data_stream::DataStream;
use crate::io::olb::future_data::FutureDataStack;
use crate::library::SymbolsLibrary;
use crate::types::FileFormatVersion;

/// State owned while one stream is being parsed: the positioned reader,
/// the future-data stack, the byte offset of the most recent standard
/// prefix, and a view of the library globals for cross-checks.
pub struct StreamContext<'lib> {
    pub ds: DataStream,
    pub futures: FutureDataStack,
    pub version: FileFormatVersion,
    /// `byte_offset` of the most recently read standard prefix.
    pub byte_offset: u32,
    /// Library globals (string table, text fonts), once parsed.
    pub library: Option<&'lib SymbolsLibrary>,
}

impl<'lib> StreamContext<'lib> {
    /// Create a context over a stream.
    pub fn new(ds: DataStream, version: FileFormatVersion) -> Self {
        Self {
            ds,
            futures: FutureDataStack::new(),
            version,
            byte_offset: 0,
            library: None,
        }
    }

    /// Attach the library globals for string-table and font lookups.
    pub fn with_library(mut self, library: Option<&'lib SymbolsLibrary>) -> Self {
        self.library = library;
        self
    }

    /// Resolve a 1-based string-table index.
    ///
    /// Index 0 is the empty string.  Out-of-range indices are fatal; when no
    /// library is attached the lookup cannot be checked and yields `""`.
    pub fn lookup_string(&self, idx: u32) -> Result<&str> {
        match self.library {
            Some(lib) => lib.str_lst.get(idx).ok_or_else(|| OlbError::InvariantViolated {
                what: format!("string table index {idx} out of range"),
                offset: self.ds.current_offset(),
            }),
            None => Ok(""),
        }
    }

    /// Number of text fonts in the library, when known.
    pub fn text_font_count(&self) -> Option<usize> {
        self.library.map(|lib| lib.text_fonts.len())
    }

    /// Advance to the next future-data boundary, keeping the skipped bytes
    /// auditable under `label`.
    pub fn read_until_next_future(&mut self, label: &str) -> Result<()> {
        let offset = self.ds.current_offset();
        let end = self
            .futures
            .next_boundary()
            .ok_or_else(|| OlbError::InvariantViolated {
                what: format!("{label}: no open future data"),
                offset,
            })?;
        let n = end.checked_sub(offset).ok_or(OlbError::CheckpointMisaligned {
            expected_end: end,
            actual: offset,
        })?;
        self.ds.print_unknown(n as usize, label)
    }

    /// Require the stream to be fully consumed.
    pub fn expect_eof(&mut self) -> Result<()> {
        if !self.ds.is_eof() {
            return Err(OlbError::InvariantViolated {
                what: format!("expected end of stream, {} byte(s) left", self.ds.remaining()),
                offset: self.ds.current_offset(),
            });
        }
        Ok(())
    }
}
