//! Library document structure.
//!
//! [`Library`] is the root of the parsed object tree: one instance per
//! container file, populated stream by stream.  Streams that fail to parse
//! leave their slot at its default; the error counter and notifications on
//! the reader record what went wrong.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::io::olb::structure_type::Structure;
use crate::notification::NotificationCollection;
use crate::structures::{
    GeneralProperties, GeometrySpecification, Page, Properties, Properties2, SymbolPinBus,
    SymbolPinScalar, T0x1f,
};
use crate::types::ComponentType;

/// The global, index-addressed string table of a library.
///
/// Stream records address strings with 1-based indices; index 0 stands for
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StringTable {
    entries: Vec<String>,
}

impl StringTable {
    /// Create a table from its entries in stream order.
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Look up a 1-based index. Index 0 yields the empty string;
    /// out-of-range indices yield `None`.
    pub fn get(&self, idx: u32) -> Option<&str> {
        if idx == 0 {
            Some("")
        } else {
            self.entries.get(idx as usize - 1).map(String::as_str)
        }
    }

    /// Number of entries (excluding the implicit empty string).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the entries in stream order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

/// A text font of the library font table.
///
/// The stored fields follow the Windows LOGFONT layout the tool serialises.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFont {
    pub height: i32,
    pub width: i32,
    pub escapement: u16,
    pub weight: u16,
    pub italic: bool,
    pub name: String,
}

/// One entry of a `$Types$` stream: a component name and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub name: String,
    pub component_type: ComponentType,
}

/// One entry of a directory stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirItem {
    pub name: String,
    pub component_type: ComponentType,
    /// Per-stream format version marker; observed values are 445 to 472.
    pub file_format_version: u16,
    /// Timezone offset of the last write, in minutes.
    pub timezone: i16,
}

/// A directory stream: the listing of a sibling folder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryStruct {
    /// Last modification time, POSIX seconds.
    pub last_modified: u32,
    pub items: Vec<DirItem>,
}

impl DirectoryStruct {
    /// Last modification time as a UTC timestamp.
    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_modified as i64, 0)
    }
}

/// Administrative metadata stream. Contents are not yet reverse
/// engineered; only its presence is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminData;

/// One named bundle of a net-bundle map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetBundle {
    pub name: String,
    pub members: Vec<String>,
}

/// The net-bundle map stream of newer format generations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetBundleMapData {
    pub bundles: Vec<NetBundle>,
}

/// One entry of the cache stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub db_id: u32,
    pub name: String,
    pub file_format_version: u16,
}

/// The `Library` stream: global string table, text fonts and save dates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolsLibrary {
    /// Product banner written by the saving tool.
    pub introduction: String,
    /// Creation time, POSIX seconds.
    pub created: u32,
    /// Last modification time, POSIX seconds.
    pub modified: u32,
    pub text_fonts: Vec<TextFont>,
    pub str_lst: StringTable,
}

impl SymbolsLibrary {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created as i64, 0)
    }

    /// Last modification time as a UTC timestamp.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.modified as i64, 0)
    }
}

/// A package: per-view properties, their drawing, and the trailing
/// package-properties records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub properties: Vec<Properties>,
    pub geometries: Vec<GeometrySpecification>,
    pub package_properties: T0x1f,
    /// Per-section property blocks of newer streams.
    pub section_properties: Vec<Properties2>,
}

/// A pin attached to a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolPin {
    Scalar(SymbolPinScalar),
    Bus(SymbolPinBus),
}

/// A standalone symbol stream: the symbol kind, its drawing and its pins.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Tag the symbol was stored under (global, port, off-page, ...).
    pub kind: Structure,
    pub geometry: GeometrySpecification,
    pub pins: Vec<SymbolPin>,
    /// Part-level properties of newer streams.
    pub general_properties: Option<GeneralProperties>,
}

impl Symbol {
    /// The scalar pins of the symbol, in stream order.
    pub fn scalar_pins(&self) -> impl Iterator<Item = &SymbolPinScalar> {
        self.pins.iter().filter_map(|p| match p {
            SymbolPin::Scalar(pin) => Some(pin),
            SymbolPin::Bus(_) => None,
        })
    }
}

/// A schematic view: the named list of its pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schematic {
    pub name: String,
    pub pages: Vec<String>,
}

/// One net of a hierarchy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNet {
    pub db_id: u32,
    pub name: String,
}

/// The hierarchy stream of a schematic view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hierarchy {
    pub schematic_name: String,
    pub nets: Vec<HierarchyNet>,
}

/// The parsed content of one container file.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Administrative metadata; absent in older containers.
    pub admin_data: Option<AdminData>,
    /// Net-bundle map; absent in older containers.
    pub net_bundle_map: Option<NetBundleMapData>,

    pub export_blocks_dir: DirectoryStruct,
    pub graphics_dir: DirectoryStruct,
    pub packages_dir: DirectoryStruct,
    pub parts_dir: DirectoryStruct,
    pub symbols_dir: DirectoryStruct,
    /// The cells directory is optional.
    pub cells_dir: Option<DirectoryStruct>,
    pub views_dir: DirectoryStruct,

    pub graphics_types: Vec<TypeEntry>,
    pub symbols_types: Vec<TypeEntry>,

    pub symbols_library: SymbolsLibrary,
    pub cache: Vec<CacheEntry>,

    pub packages: Vec<Package>,
    pub symbols: Vec<Symbol>,

    /// Per-view schematics, keyed by view name in parse order.
    pub schematics: IndexMap<String, Schematic>,
    /// Per-view hierarchies, keyed by view name in parse order.
    pub hierarchies: IndexMap<String, Hierarchy>,
    /// Pages, keyed by `view/page` stream name in parse order.
    pub pages: IndexMap<String, Page>,

    /// Non-fatal findings collected across all streams.
    pub notifications: NotificationCollection,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }
}
