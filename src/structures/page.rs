//! Schematic page records.

use chrono::{DateTime, Utc};

use super::Record;

/// Grid reference settings along one axis of a page border.
///
/// See 'Schematic Page Properties' -> 'Grid Reference'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridReference {
    /// Number of border cells along this axis.
    pub count: u16,
    /// Width of one border cell.
    pub width: u32,
    /// 1 for alphabetic labels, 0 for numeric.
    pub alphabetic: u32,
    /// 1 for ascending label order, 0 for descending.
    pub ascending: u32,
}

/// A schematic page.
///
/// The page stream is the most intricate composite of the format: a fixed
/// header of size, grid and display settings followed by several
/// variable-length record sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub name: String,
    /// Page size name, e.g. `A4`.
    pub page_size: String,
    /// Creation time, POSIX seconds.
    pub created: u32,
    /// Last modification time, POSIX seconds.
    pub modified: u32,
    pub width: u32,
    pub height: u32,
    /// Pin-to-pin spacing.
    pub pin_to_pin: u32,
    pub horizontal: GridReference,
    pub vertical: GridReference,
    pub is_metric: u32,
    pub border_displayed: u32,
    pub border_printed: u32,
    pub grid_ref_displayed: u32,
    pub grid_ref_printed: u32,
    pub title_block_displayed: u32,
    pub title_block_printed: u32,
    /// Use ANSI grid references. Always 1 in the XML export.
    pub ansi_grid_refs: u32,
    /// Named entries of the first variable section.
    pub names: Vec<String>,
    /// Graphics and text records.
    pub graphics: Vec<Record>,
    /// Placed part instances.
    pub instances: Vec<Record>,
    /// Wires, bus entries and junction records.
    pub connections: Vec<Record>,
}

impl Page {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created as i64, 0)
    }

    /// Last modification time as a UTC timestamp.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.modified as i64, 0)
    }
}
