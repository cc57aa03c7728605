//! Record header (prefix) decoding.
//!
//! Three prefix forms precede records:
//!
//! - **short**: `tag u8, length_or_lock u32, reserved[4], tag u8 (repeated),
//!   size i16`, then `size` pairs of string-table indices when `size >= 0`.
//! - **standard**: `tag u8, byte_offset u32, zeros[4]`, then the short form.
//! - **long**: `tag u8, reserved[2], zeros[6]`, then the short form.
//!
//! The repeated tag must equal the outer one on every level.  A record body
//! may additionally sit behind a *preamble*: the magic `FF E4 5C 39`,
//! optionally followed by a length-prefixed opaque lock region.

use super::data_stream::DataStream;
use super::primitive_type::Primitive;
use super::structure_type::Structure;
use super::PREAMBLE_MAGIC;
use crate::error::{OlbError, Result};
use crate::notification::NotificationType;

/// Lock marker observed on unlocked records.
pub const LOCK_UNLOCKED: u32 = 0x0B;
/// Lock marker observed on locked records.
pub const LOCK_LOCKED: u32 = 0x1E;

/// A decoded standard prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePrefix {
    pub structure: Structure,
    /// Distance from the end of the short form to the next standard prefix
    /// at this nesting level.  Drives size-dependent branches.
    pub byte_offset: u32,
}

/// A decoded short prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortPrefix {
    pub structure: Structure,
    /// 0x0B (unlocked) or 0x1E (locked); other values are accepted and
    /// recorded as notifications.
    pub length_or_lock: u32,
    /// String-table index pairs `(name_idx, value_idx)`.
    pub name_value_pairs: Vec<(u32, u32)>,
}

fn to_structure(ds: &DataStream, tag: u8) -> Result<Structure> {
    Structure::from_raw(tag).ok_or(OlbError::UnknownStructure {
        tag,
        offset: ds.current_offset().saturating_sub(1),
    })
}

fn check_tag_pair(ds: &DataStream, first: u8, repeat: u8) -> Result<()> {
    if first != repeat {
        return Err(OlbError::TagMismatch {
            offset: ds.current_offset().saturating_sub(1),
            first,
            repeat,
        });
    }
    Ok(())
}

/// Read a short prefix.
pub fn read_type_prefix_short(ds: &mut DataStream) -> Result<ShortPrefix> {
    let tag = ds.read_u8()?;
    let structure = to_structure(ds, tag)?;

    let length_or_lock = ds.read_u32()?;
    if length_or_lock != LOCK_UNLOCKED && length_or_lock != LOCK_LOCKED {
        log::warn!("unexpected lock marker {length_or_lock:#X} on {structure:?}");
        ds.notes().notify(
            NotificationType::UnexpectedValue,
            format!("lock marker {length_or_lock:#X} on {structure:?}"),
        );
    }

    ds.print_unknown(4, "read_type_prefix_short - 0")?;

    let tag_rep = ds.read_u8()?;
    check_tag_pair(ds, tag, tag_rep)?;

    let size = ds.read_i16()?;
    log::trace!("short prefix {structure:?}, size = {size}");

    let mut name_value_pairs = Vec::new();
    if size >= 0 {
        for _ in 0..size {
            let name_idx = ds.read_u32()?;
            let value_idx = ds.read_u32()?;
            name_value_pairs.push((name_idx, value_idx));
        }
    } else if size < -1 {
        // -1 behaves like 0; anything below has not been observed.
        ds.notes().notify(
            NotificationType::UnexpectedValue,
            format!("short prefix size {size} on {structure:?}"),
        );
    }

    Ok(ShortPrefix {
        structure,
        length_or_lock,
        name_value_pairs,
    })
}

/// Read a standard prefix: tag, byte offset, four zero bytes, short form.
pub fn read_type_prefix(ds: &mut DataStream) -> Result<TypePrefix> {
    let tag = ds.read_u8()?;
    let structure = to_structure(ds, tag)?;

    let byte_offset = ds.read_u32()?;
    log::trace!("standard prefix {structure:?}, byte_offset = {byte_offset:#X}");

    ds.assume_bytes(&[0x00, 0x00, 0x00, 0x00], "read_type_prefix - 1")?;

    let short = read_type_prefix_short(ds)?;
    check_tag_pair(ds, tag, short.structure.as_raw())?;

    Ok(TypePrefix {
        structure,
        byte_offset,
    })
}

/// Read a long (outer) prefix: tag, two reserved bytes, six zero bytes,
/// short form.
pub fn read_type_prefix_long(ds: &mut DataStream) -> Result<Structure> {
    let tag = ds.read_u8()?;
    let structure = to_structure(ds, tag)?;

    ds.print_unknown(2, "read_type_prefix_long - 0")?;
    ds.assume_bytes(
        &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        "read_type_prefix_long - 1",
    )?;

    let short = read_type_prefix_short(ds)?;
    check_tag_pair(ds, tag, short.structure.as_raw())?;

    Ok(structure)
}

/// Read a preamble: the four magic bytes, then (when `read_optional_len`)
/// a length-prefixed opaque lock region.  Returns the optional length.
pub fn read_preamble(ds: &mut DataStream, read_optional_len: bool) -> Result<u32> {
    ds.assume_bytes(&PREAMBLE_MAGIC, "read_preamble - 0")?;

    let optional_len = if read_optional_len { ds.read_u32()? } else { 0 };

    if optional_len > 0 {
        // Correlates to object locks; meaning still unresolved.
        ds.print_unknown(optional_len as usize, "read_preamble - 1 | lock data")?;
    }

    Ok(optional_len)
}

/// Read a preamble only for structures that require one.
pub fn read_conditional_preamble(
    ds: &mut DataStream,
    structure: Structure,
    read_optional_len: bool,
) -> Result<u32> {
    let required = structure
        .preamble_requirement()
        .ok_or_else(|| OlbError::InvariantViolated {
            what: format!("no preamble rule for {structure:?}"),
            offset: ds.current_offset(),
        })?;

    if required {
        read_preamble(ds, read_optional_len)
    } else {
        Ok(0)
    }
}

/// Read a primitive prefix: `kind u8, 0x00, kind u8 (repeated)`.
pub fn read_prefix_primitive(ds: &mut DataStream) -> Result<Primitive> {
    let kind = ds.read_u8()?;
    ds.assume_bytes(&[0x00], "read_prefix_primitive - 0")?;
    let kind_rep = ds.read_u8()?;
    check_tag_pair(ds, kind, kind_rep)?;

    Primitive::from_raw(kind).ok_or(OlbError::UnknownEnumValue {
        kind: "Primitive",
        raw: kind as u32,
        offset: ds.current_offset().saturating_sub(3),
    })
}

/// Advance until the next preamble magic, leaving the stream positioned on
/// its first byte.
pub fn discard_until_preamble(ds: &mut DataStream) -> Result<()> {
    let mut window = [0u8; 4];
    while window != PREAMBLE_MAGIC {
        window.rotate_left(1);
        window[3] = ds.read_u8()?;
    }

    // Put the magic back so the caller can parse it.
    for i in (0..PREAMBLE_MAGIC.len()).rev() {
        ds.putback(PREAMBLE_MAGIC[i])?;
    }

    Ok(())
}
