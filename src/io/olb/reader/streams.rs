//! Top-of-stream entry points, one per stream kind.
//!
//! Each entry point drives the record readers with the stream-specific
//! sequence and requires the stream to be fully consumed at the end.

use log::{debug, trace, warn};

use crate::error::{OlbError, Result};
use crate::io::olb::prefix;
use crate::library::{
    AdminData, CacheEntry, DirItem, DirectoryStruct, Hierarchy, HierarchyNet, NetBundle,
    NetBundleMapData, Package, Schematic, Symbol, SymbolPin, SymbolsLibrary, TextFont, TypeEntry,
};
use crate::library::StringTable;
use crate::notification::NotificationType;
use crate::structures::{GridReference, Page, Record};
use crate::types::version::KNOWN_STREAM_VERSIONS;
use crate::types::ComponentType;

use super::context::StreamContext;

impl StreamContext<'_> {
    // -----------------------------------------------------------------------
    // Directory streams
    // -----------------------------------------------------------------------

    /// Read a `<Name> Directory` stream.
    ///
    /// When `expected` is set, entries of any other component type are
    /// recorded as notifications (observed for the Views directory).
    pub fn parse_directory(&mut self, expected: Option<ComponentType>) -> Result<DirectoryStruct> {
        debug!("parse_directory @ {:#X}", self.ds.current_offset());

        let last_modified = self.ds.read_u32()?;

        let size = self.ds.read_u16()?;

        let mut items = Vec::with_capacity(size as usize);
        for i in 0..size {
            let name = self.ds.read_string_zero_terminated()?;

            let raw = self.ds.read_u16()?;
            let component_type: ComponentType = self.ds.to_enum(raw as u32)?;

            if let Some(expected) = expected {
                if component_type != expected {
                    warn!("unexpected ComponentType {component_type:?} for entry {name}");
                    self.ds.notes().notify(
                        NotificationType::UnexpectedValue,
                        format!("directory entry {name} has type {component_type:?}"),
                    );
                }
            }

            // Changes with the tool release; contents still unresolved.
            self.ds
                .print_unknown(14, &format!("parse_directory item[{i}] - 0"))?;

            let file_format_version = self.ds.read_u16()?;
            trace!("fileFormatVersion = {file_format_version}");

            if !KNOWN_STREAM_VERSIONS.contains(&file_format_version) {
                warn!("unexpected stream format version {file_format_version}");
                self.ds.notes().notify(
                    NotificationType::UnexpectedValue,
                    format!("stream format version {file_format_version} on {name}"),
                );
            }

            let timezone = self.ds.read_i16()?;

            self.ds
                .print_unknown(2, &format!("parse_directory item[{i}] - 1"))?;

            items.push(DirItem {
                name,
                component_type,
                file_format_version,
                timezone,
            });
        }

        self.expect_eof()?;

        Ok(DirectoryStruct {
            last_modified,
            items,
        })
    }

    // -----------------------------------------------------------------------
    // $Types$ streams
    // -----------------------------------------------------------------------

    /// Read a `$Types$` stream. The stream may be completely empty.
    pub fn parse_types(&mut self) -> Result<Vec<TypeEntry>> {
        let mut types = Vec::new();

        while !self.ds.is_eof() {
            let name = self.ds.read_string_zero_terminated()?;
            let raw = self.ds.read_u16()?;
            let component_type: ComponentType = self.ds.to_enum(raw as u32)?;

            types.push(TypeEntry {
                name,
                component_type,
            });
        }

        Ok(types)
    }

    // -----------------------------------------------------------------------
    // Library stream
    // -----------------------------------------------------------------------

    /// Read the `Library` stream: banner, save dates, text fonts and the
    /// global string table.
    pub fn parse_symbols_library(&mut self) -> Result<SymbolsLibrary> {
        let introduction = self.ds.read_string_zero_terminated()?;
        trace!("introduction = {introduction}");

        let created = self.ds.read_u32()?;
        let modified = self.ds.read_u32()?;

        let font_count = self.ds.read_u16()?;
        let mut text_fonts = Vec::with_capacity(font_count as usize);
        for _ in 0..font_count {
            text_fonts.push(self.read_text_font()?);
        }

        let str_count = self.ds.read_u32()?;
        let mut strings = Vec::with_capacity(str_count as usize);
        for _ in 0..str_count {
            strings.push(self.ds.read_string_zero_terminated()?);
        }

        self.expect_eof()?;

        Ok(SymbolsLibrary {
            introduction,
            created,
            modified,
            text_fonts,
            str_lst: StringTable::new(strings),
        })
    }

    /// One font table entry, serialised LOGFONT-style.
    fn read_text_font(&mut self) -> Result<TextFont> {
        let height = self.ds.read_i32()?;
        let width = self.ds.read_i32()?;
        let escapement = self.ds.read_u16()?;
        let weight = self.ds.read_u16()?;
        let italic = self.ds.read_u8()? != 0;

        self.ds.print_unknown(1, "readTextFont - 0")?;

        let name = self.ds.read_string_zero_terminated()?;

        Ok(TextFont {
            height,
            width,
            escapement,
            weight,
            italic,
            name,
        })
    }

    // -----------------------------------------------------------------------
    // Cache stream
    // -----------------------------------------------------------------------

    /// Read the `Cache` stream: a flat list of cached component markers.
    pub fn parse_cache(&mut self) -> Result<Vec<CacheEntry>> {
        let mut entries = Vec::new();

        while !self.ds.is_eof() {
            let db_id = self.ds.read_u32()?;
            let name = self.ds.read_string_zero_terminated()?;
            let file_format_version = self.ds.read_u16()?;

            if !KNOWN_STREAM_VERSIONS.contains(&file_format_version) {
                self.ds.notes().notify(
                    NotificationType::UnexpectedValue,
                    format!("cache format version {file_format_version} on {name}"),
                );
            }

            entries.push(CacheEntry {
                db_id,
                name,
                file_format_version,
            });
        }

        Ok(entries)
    }

    // -----------------------------------------------------------------------
    // Administrative streams
    // -----------------------------------------------------------------------

    /// Read the `AdminData` stream. Contents are not understood; the body
    /// is advanced with a label so it stays auditable.
    pub fn parse_admin_data(&mut self) -> Result<AdminData> {
        let remaining = self.ds.remaining() as usize;
        self.ds.print_unknown(remaining, "AdminData")?;
        self.expect_eof()?;
        Ok(AdminData)
    }

    /// Read the `NetBundleMapData` stream: named bundles and their members.
    pub fn parse_net_bundle_map_data(&mut self) -> Result<NetBundleMapData> {
        let bundle_count = self.ds.read_u16()?;

        let mut bundles = Vec::with_capacity(bundle_count as usize);
        for _ in 0..bundle_count {
            let name = self.ds.read_string_zero_terminated()?;
            let member_count = self.ds.read_u16()?;

            let mut members = Vec::with_capacity(member_count as usize);
            for _ in 0..member_count {
                members.push(self.ds.read_string_zero_terminated()?);
            }

            bundles.push(NetBundle { name, members });
        }

        self.expect_eof()?;

        Ok(NetBundleMapData { bundles })
    }

    /// Read the `HSObjects` stream. Contents are not understood.
    pub fn parse_hs_objects(&mut self) -> Result<()> {
        let remaining = self.ds.remaining() as usize;
        self.ds.print_unknown(remaining, "HSObjects")?;
        self.expect_eof()
    }

    /// Read the `DsnStream` stream of schematic designs. Contents are not
    /// understood.
    pub fn parse_dsn_stream(&mut self) -> Result<()> {
        let remaining = self.ds.remaining() as usize;
        self.ds.print_unknown(remaining, "DsnStream")?;
        self.expect_eof()
    }

    // -----------------------------------------------------------------------
    // Package and symbol streams
    // -----------------------------------------------------------------------

    /// Read a package stream: per-view properties with their geometry
    /// lists, closed by the package-properties record.
    pub fn parse_package(&mut self) -> Result<Package> {
        let len_properties = self.ds.read_u16()?;
        trace!("lenProperties = {len_properties}");

        let mut package = Package::default();

        for _ in 0..len_properties {
            let record = self.parse_record_conditional()?;
            match record {
                Record::Properties(p) => package.properties.push(p),
                other => {
                    return Err(OlbError::InvariantViolated {
                        what: format!("expected Properties record, found {:?}", other.structure()),
                        offset: self.ds.current_offset(),
                    })
                }
            }

            let len_primitives = self.ds.read_u16()?;
            trace!("lenPrimitives = {len_primitives}");

            for _ in 0..len_primitives {
                let record = self.parse_record_conditional()?;
                match record {
                    Record::Geometry(g) => package.geometries.push(g),
                    other => {
                        return Err(OlbError::InvariantViolated {
                            what: format!(
                                "expected geometry record, found {:?}",
                                other.structure()
                            ),
                            offset: self.ds.current_offset(),
                        })
                    }
                }
            }
        }

        let record = self.parse_record_conditional()?;
        match record {
            Record::T0x1f(t) => package.package_properties = t,
            other => {
                return Err(OlbError::InvariantViolated {
                    what: format!("expected T0x1f record, found {:?}", other.structure()),
                    offset: self.ds.current_offset(),
                })
            }
        }

        // Newer streams append per-section property blocks.
        if !self.ds.is_eof() {
            let section_count = self.ds.read_u16()?;
            for _ in 0..section_count {
                package.section_properties.push(self.read_properties2()?);
            }
        }

        self.expect_eof()?;

        Ok(package)
    }

    /// Read a standalone symbol stream: the symbol record, then its pins.
    pub fn parse_symbol(&mut self) -> Result<Symbol> {
        let record = self.parse_record_conditional()?;
        let kind = record.structure();

        let geometry = match record {
            Record::GlobalSymbol(g)
            | Record::PortSymbol(g)
            | Record::OffPageSymbol(g)
            | Record::TitleBlockSymbol(g)
            | Record::PinShapeSymbol(g) => g,
            Record::ErcSymbol(e) => e.geometry,
            other => {
                return Err(OlbError::InvariantViolated {
                    what: format!("expected a symbol record, found {:?}", other.structure()),
                    offset: self.ds.current_offset(),
                })
            }
        };

        // Older streams end right after the symbol record.
        let mut pins = Vec::new();
        if !self.ds.is_eof() {
            let pin_count = self.ds.read_u16()?;
            for _ in 0..pin_count {
                match self.parse_record_conditional()? {
                    Record::SymbolPinScalar(pin) => pins.push(SymbolPin::Scalar(pin)),
                    Record::SymbolPinBus(pin) => pins.push(SymbolPin::Bus(pin)),
                    other => {
                        return Err(OlbError::InvariantViolated {
                            what: format!("expected a pin record, found {:?}", other.structure()),
                            offset: self.ds.current_offset(),
                        })
                    }
                }
            }
        }

        let general_properties = if !self.ds.is_eof() {
            Some(self.read_general_properties()?)
        } else {
            None
        };

        self.expect_eof()?;

        Ok(Symbol {
            kind,
            geometry,
            pins,
            general_properties,
        })
    }

    // -----------------------------------------------------------------------
    // Schematic, hierarchy and page streams
    // -----------------------------------------------------------------------

    /// Read a `Schematic` stream: the named list of its pages.
    pub fn parse_schematic(&mut self) -> Result<Schematic> {
        self.ds.print_unknown(4, "parseSchematic - 0")?;

        let name = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(4, "parseSchematic - 1")?;

        let page_count = self.ds.read_u16()?;
        let mut pages = Vec::with_capacity(page_count as usize);
        for i in 0..page_count {
            let page_name = self.ds.read_string_zero_terminated()?;
            self.ds
                .print_unknown(4, &format!("parseSchematic page[{i}]"))?;
            pages.push(page_name);
        }

        self.expect_eof()?;

        Ok(Schematic { name, pages })
    }

    /// Read a `Hierarchy` stream: the schematic name and its nets.
    pub fn parse_hierarchy(&mut self) -> Result<Hierarchy> {
        self.ds.print_unknown(9, "parseHierarchy - 0")?;

        let schematic_name = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(9, "parseHierarchy - 1")?;

        let net_len = self.ds.read_u16()?;
        let mut nets = Vec::with_capacity(net_len as usize);
        for _ in 0..net_len {
            let short = prefix::read_type_prefix_short(&mut self.ds)?;
            trace!("hierarchy net record {:?}", short.structure);

            prefix::read_preamble(&mut self.ds, true)?;

            let db_id = self.ds.read_u32()?;
            let name = self.ds.read_string_zero_terminated()?;

            nets.push(HierarchyNet { db_id, name });
        }

        self.expect_eof()?;

        Ok(Hierarchy {
            schematic_name,
            nets,
        })
    }

    /// Read a `Page` stream.
    pub fn parse_page(&mut self) -> Result<Page> {
        self.ds.print_unknown(21, "parsePage - 0")?;
        prefix::read_preamble(&mut self.ds, true)?;

        let name = self.ds.read_string_zero_terminated()?;
        let page_size = self.ds.read_string_zero_terminated()?;

        let created = self.ds.read_u32()?;
        let modified = self.ds.read_u32()?;
        trace!("createDateTime = {created} | modifyDateTime = {modified}");

        self.ds.print_unknown(16, "parsePage - 1")?;

        let width = self.ds.read_u32()?;
        let height = self.ds.read_u32()?;
        trace!("width = {width} | height = {height}");

        let pin_to_pin = self.ds.read_u32()?;

        self.ds.print_unknown(2, "parsePage - 2")?;

        let horizontal_count = self.ds.read_u16()?;
        let vertical_count = self.ds.read_u16()?;

        self.ds.print_unknown(2, "parsePage - 3")?;

        let horizontal_width = self.ds.read_u32()?;
        let vertical_width = self.ds.read_u32()?;

        self.ds.print_unknown(48, "parsePage - 4")?;

        // Alphabetic (1) or numeric (0) grid labels.
        let horizontal_char = self.ds.read_u32()?;

        self.ds.print_unknown(4, "parsePage - 5")?;

        // Ascending (1) or descending (0) label order.
        let horizontal_ascending = self.ds.read_u32()?;

        let vertical_char = self.ds.read_u32()?;

        self.ds.print_unknown(4, "parsePage - 6")?;

        let vertical_ascending = self.ds.read_u32()?;

        let is_metric = self.ds.read_u32()?;
        let border_displayed = self.ds.read_u32()?;
        let border_printed = self.ds.read_u32()?;
        let grid_ref_displayed = self.ds.read_u32()?;
        let grid_ref_printed = self.ds.read_u32()?;
        let title_block_displayed = self.ds.read_u32()?;
        let title_block_printed = self.ds.read_u32()?;
        // Always 1 in the XML export, maybe a tool quirk.
        let ansi_grid_refs = self.ds.read_u32()?;

        let len_a = self.ds.read_u16()?;
        trace!("lenA = {len_a}");
        for _ in 0..len_a {
            self.ds.print_unknown(8, "parsePage - a")?;
        }

        let len0 = self.ds.read_u16()?;
        trace!("len0 = {len0}");
        for _ in 0..len0 {
            self.ds.print_unknown(32, "parsePage - 8")?;
        }

        self.ds.print_unknown(2, "parsePage - 9")?;

        let len1 = self.ds.read_u16()?;
        trace!("len1 = {len1}");
        let mut names = Vec::with_capacity(len1 as usize);
        for _ in 0..len1 {
            let entry_name = self.ds.read_string_zero_terminated()?;
            self.ds.print_unknown(4, "parsePage - 10")?;
            names.push(entry_name);
        }

        let len2 = self.ds.read_u16()?;
        trace!("len2 = {len2}");
        let mut graphics = Vec::with_capacity(len2 as usize);
        for _ in 0..len2 {
            graphics.push(self.parse_record()?);
        }

        let len3 = self.ds.read_u16()?;
        trace!("len3 = {len3}");
        let mut instances = Vec::with_capacity(len3 as usize);
        for i in 0..len3 {
            let structure = if i == 0 {
                // Stand-in for the not yet understood "very long" prefix
                // form: 47 opaque bytes followed by a part instance body.
                self.ds.print_unknown(47, "parsePage - 11")?;
                crate::io::olb::structure_type::Structure::PartInst
            } else {
                let type_prefix = prefix::read_type_prefix(&mut self.ds)?;
                self.byte_offset = type_prefix.byte_offset;
                type_prefix.structure
            };

            prefix::read_preamble(&mut self.ds, true)?;
            instances.push(self.parse_structure(structure)?);
        }

        self.ds.print_unknown(10, "parsePage - 12")?;

        let len_x = self.ds.read_u16()?;
        trace!("lenX = {len_x}");
        let mut connections = Vec::with_capacity(len_x as usize);
        for _ in 0..len_x {
            connections.push(self.parse_record()?);
        }

        self.expect_eof()?;

        Ok(Page {
            name,
            page_size,
            created,
            modified,
            width,
            height,
            pin_to_pin,
            horizontal: GridReference {
                count: horizontal_count,
                width: horizontal_width,
                alphabetic: horizontal_char,
                ascending: horizontal_ascending,
            },
            vertical: GridReference {
                count: vertical_count,
                width: vertical_width,
                alphabetic: vertical_char,
                ascending: vertical_ascending,
            },
            is_metric,
            border_displayed,
            border_printed,
            grid_ref_displayed,
            grid_ref_printed,
            title_block_displayed,
            title_block_printed,
            ansi_grid_refs,
            names,
            graphics,
            instances,
            connections,
        })
    }
}
