//! Positioned byte reader over a single stream.
//!
//! All integers are little-endian.  Strings are NUL-terminated Windows-1252
//! byte sequences; the terminator is consumed but not returned.  Reads past
//! the end of the buffer fail with
//! [`OlbError::TruncatedStream`](crate::error::OlbError::TruncatedStream);
//! there is no seeking beyond the buffer.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1252;

use crate::error::{OlbError, Result};
use crate::notification::NotificationCollection;
use crate::types::FromRaw;

/// Positioned reader over an in-memory stream.
pub struct DataStream {
    cursor: Cursor<Vec<u8>>,
    /// Unknown-data notes recorded by [`print_unknown`](Self::print_unknown).
    notes: NotificationCollection,
}

impl DataStream {
    /// Wrap raw stream bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
            notes: NotificationCollection::new(),
        }
    }

    /// Load a stream from a file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data))
    }

    /// Current byte offset from the start of the stream.
    pub fn current_offset(&self) -> u64 {
        self.cursor.position()
    }

    /// Whether the reader is at the end of the stream.
    pub fn is_eof(&self) -> bool {
        self.cursor.position() >= self.stream_length()
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> u64 {
        self.stream_length().saturating_sub(self.cursor.position())
    }

    /// Total stream length in bytes.
    pub fn stream_length(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// Take the unknown-data notes collected so far.
    pub fn take_notes(&mut self) -> NotificationCollection {
        std::mem::take(&mut self.notes)
    }

    /// Access the collected notes.
    pub fn notes(&mut self) -> &mut NotificationCollection {
        &mut self.notes
    }

    fn truncated(&self) -> OlbError {
        OlbError::TruncatedStream {
            offset: self.cursor.position(),
        }
    }

    // ------------------------------------------------------------------
    // Fixed-width reads
    // ------------------------------------------------------------------

    pub fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.cursor
            .read_i16::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| self.truncated())
    }

    /// Read `n` raw bytes.
    pub fn read_raw(&mut self, n: usize) -> Result<Vec<u8>> {
        if self.remaining() < n as u64 {
            return Err(self.truncated());
        }
        let mut buf = vec![0u8; n];
        self.cursor.read_exact(&mut buf).map_err(|_| self.truncated())?;
        Ok(buf)
    }

    /// Read bytes up to and including a NUL terminator and decode them as
    /// Windows-1252.  The terminator is not part of the returned string.
    pub fn read_string_zero_terminated(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let b = self.read_u8()?;
            if b == 0x00 {
                break;
            }
            bytes.push(b);
        }
        let (decoded, _, _) = WINDOWS_1252.decode(&bytes);
        Ok(decoded.into_owned())
    }

    // ------------------------------------------------------------------
    // Assertions and diagnostics
    // ------------------------------------------------------------------

    /// Read `expected.len()` bytes and require them to equal `expected`.
    pub fn assume_bytes(&mut self, expected: &[u8], label: &str) -> Result<()> {
        let offset = self.current_offset();
        let got = self.read_raw(expected.len())?;
        if got != expected {
            log::debug!("assume_bytes mismatch in {label} at {offset:#X}");
            return Err(OlbError::MagicMismatch {
                offset,
                expected: expected.to_vec(),
                got,
            });
        }
        Ok(())
    }

    /// Advance `n` bytes of not-yet-understood data, recording a labelled
    /// note with a hex dump so the region stays auditable.
    pub fn print_unknown(&mut self, n: usize, label: &str) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        let offset = self.current_offset();
        let bytes = self.read_raw(n)?;
        log::debug!("unknown data {label} @ {offset:#X}: {bytes:02X?}");
        self.notes.unknown_data(offset, label, &bytes);
        Ok(())
    }

    /// Push one byte back onto the stream.
    ///
    /// The byte must equal the one the stream position is moved back over.
    pub fn putback(&mut self, byte: u8) -> Result<()> {
        let pos = self.cursor.position();
        if pos == 0 {
            return Err(OlbError::InvariantViolated {
                what: "putback at stream start".into(),
                offset: 0,
            });
        }
        let prev = self.cursor.get_ref()[pos as usize - 1];
        if prev != byte {
            return Err(OlbError::InvariantViolated {
                what: format!("putback byte {byte:#04X} does not match stream byte {prev:#04X}"),
                offset: pos - 1,
            });
        }
        self.cursor.set_position(pos - 1);
        Ok(())
    }

    /// Convert a raw value into an enum variant, failing with
    /// `UnknownEnumValue` at the current offset.
    pub fn to_enum<T: FromRaw>(&self, raw: u32) -> Result<T> {
        T::from_raw(raw).ok_or(OlbError::UnknownEnumValue {
            kind: T::KIND,
            raw,
            offset: self.current_offset(),
        })
    }
}
