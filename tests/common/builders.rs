//! Test stream builders.
//!
//! `StreamBuilder` assembles stream bytes in reader order: prefixes,
//! preambles, records and whole streams.  `LibraryTree` lays out a minimal
//! extracted container tree on disk and lets tests add packages, symbols
//! and views to it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// The preamble magic.
pub const MAGIC: [u8; 4] = [0xFF, 0xE4, 0x5C, 0x39];

/// Structure tag bytes used by the builders.
pub mod tags {
    pub const PROPERTIES: u8 = 0x01;
    pub const STH_IN_PAGES0: u8 = 0x02;
    pub const GEO_DEFINITION: u8 = 0x04;
    pub const SYMBOL_DISPLAY_PROP: u8 = 0x07;
    pub const SYMBOL_PIN_SCALAR: u8 = 0x08;
    pub const SYMBOL_PIN_BUS: u8 = 0x09;
    pub const PIN_IDX_MAPPING: u8 = 0x0A;
    pub const PART_INST: u8 = 0x0D;
    pub const T0X10: u8 = 0x10;
    pub const WIRE_SCALAR: u8 = 0x14;
    pub const ALIAS: u8 = 0x15;
    pub const BUS_ENTRY: u8 = 0x17;
    pub const T0X1F: u8 = 0x1F;
    pub const GLOBAL_SYMBOL: u8 = 0x21;
}

/// Primitive tag bytes.
pub mod prims {
    pub const RECT: u8 = 40;
    pub const LINE: u8 = 41;
    pub const ELLIPSE: u8 = 43;
    pub const POLYLINE: u8 = 45;
}

/// Byte-stream assembler.
#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    data: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    // -- scalars -----------------------------------------------------------

    pub fn u8(mut self, v: u8) -> Self {
        self.data.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.data.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.data.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i16(mut self, v: i16) -> Self {
        self.data.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32(mut self, v: i32) -> Self {
        self.data.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn zeros(mut self, n: usize) -> Self {
        self.data.extend(std::iter::repeat(0u8).take(n));
        self
    }

    pub fn zstr(mut self, s: &str) -> Self {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(0x00);
        self
    }

    // -- prefixes and preambles -------------------------------------------

    /// Preamble with an empty lock region.
    pub fn preamble(self) -> Self {
        self.raw(&MAGIC).u32(0)
    }

    /// Preamble without the optional length field.
    pub fn preamble_bare(self) -> Self {
        self.raw(&MAGIC)
    }

    /// Short prefix with no name/value pairs.
    pub fn short_prefix(self, tag: u8) -> Self {
        self.u8(tag).u32(0x0B).zeros(4).u8(tag).i16(0)
    }

    /// Standard prefix: tag, byte offset, reserved zeros, short form.
    pub fn std_prefix(self, tag: u8, byte_offset: u32) -> Self {
        self.u8(tag).u32(byte_offset).zeros(4).short_prefix(tag)
    }

    /// Long prefix: tag, two reserved bytes, six zeros, short form.
    pub fn long_prefix(self, tag: u8) -> Self {
        self.u8(tag).zeros(2).zeros(6).short_prefix(tag)
    }

    /// Primitive prefix: kind, 0x00, kind.
    pub fn prim_prefix(self, kind: u8) -> Self {
        self.u8(kind).u8(0x00).u8(kind)
    }

    // -- primitive bodies --------------------------------------------------

    /// Rect body: 4 corners, line style/width, fill/hatch style.
    pub fn rect_body(self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.i32(x1)
            .i32(y1)
            .i32(x2)
            .i32(y2)
            .u32(0) // LineStyle::Solid
            .u32(3) // LineWidth::Default
            .u32(0) // FillStyle::None
            .u32(0xFFFF_FFFF) // HatchStyle::NotValid
    }

    /// Line body: 4 coordinates, line style/width.
    pub fn line_body(self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.i32(x1).i32(y1).i32(x2).i32(y2).u32(0).u32(3)
    }

    // -- record bodies -----------------------------------------------------

    /// Properties body; `convert_name` selects viewNumber 2.
    pub fn properties_body(self, reference: &str, name: &str, convert_name: Option<&str>) -> Self {
        let mut b = self.zstr(reference).zeros(3);
        match convert_name {
            None => b = b.u16(1),
            Some(convert) => b = b.u16(2).zstr(convert),
        }
        b.zstr(name).zeros(29)
    }

    /// T0x1f body.
    pub fn t0x1f_body(self, name: &str, ref_des: &str, footprint: &str) -> Self {
        self.zstr(name)
            .zstr("")
            .zstr(ref_des)
            .zstr("")
            .zstr(footprint)
            .zeros(2)
    }

    /// Scalar/bus pin body.
    pub fn pin_body(
        self,
        name: &str,
        start_x: i32,
        start_y: i32,
        hotpt_x: i32,
        hotpt_y: i32,
        pin_shape: u16,
        port_type: u32,
    ) -> Self {
        self.zstr(name)
            .i32(start_x)
            .i32(start_y)
            .i32(hotpt_x)
            .i32(hotpt_y)
            .u16(pin_shape)
            .zeros(2)
            .u32(port_type)
            .zeros(6)
    }

    /// SymbolDisplayProp body.
    pub fn display_prop_body(self, name_idx: u32, x: i16, y: i16, packed: u16, color: u8) -> Self {
        self.u32(name_idx)
            .i16(x)
            .i16(y)
            .u16(packed)
            .u8(color)
            .u8(0xCC) // visibility modifier
            .u8(0x01) // visibility selector: value only
            .u8(0x00)
    }

    /// Empty geometry-specification body (name header, zero primitives).
    pub fn geometry_header(self, name: &str, count: u16) -> Self {
        self.zstr(name).zeros(3).u8(0x30).zeros(3).u16(count)
    }

    /// Properties2 body.
    pub fn properties2_body(
        self,
        name: &str,
        ref_des: &str,
        footprint: &str,
        section_count: u16,
    ) -> Self {
        self.zstr(name)
            .zeros(3)
            .zstr(ref_des)
            .zeros(3)
            .zstr(footprint)
            .u16(section_count)
    }

    /// GeneralProperties body; `flags` packs pin bits 2..0 and the
    /// implementation type in bits 5..3.
    pub fn general_properties_body(
        self,
        implementation_path: &str,
        implementation: &str,
        ref_des_prefix: &str,
        part_value: &str,
        flags: u8,
    ) -> Self {
        self.zstr(implementation_path)
            .zstr(implementation)
            .zstr(ref_des_prefix)
            .zstr(part_value)
            .u8(flags)
            .zeros(1)
    }
}

/// A full Properties record in the conditional-preamble flow.
pub fn properties_record(reference: &str, name: &str, convert_name: Option<&str>) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::PROPERTIES, 0)
        .preamble()
        .properties_body(reference, name, convert_name)
        .build()
}

/// A full T0x1f record in the conditional-preamble flow.
pub fn t0x1f_record(name: &str, ref_des: &str, footprint: &str) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::T0X1F, 0)
        .preamble()
        .t0x1f_body(name, ref_des, footprint)
        .build()
}

/// A geometry record holding one rect (generation C framing).
pub fn rect_geometry_record(name: &str, x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::GEO_DEFINITION, 0)
        .preamble()
        .geometry_header(name, 1)
        .prim_prefix(prims::RECT)
        .rect_body(x1, y1, x2, y2)
        .build()
}

/// A minimal package stream: one view, one rect, package properties.
pub fn package_stream(name: &str) -> Vec<u8> {
    let mut data = StreamBuilder::new().u16(1).build();
    data.extend(properties_record("U?", name, None));
    data.extend(StreamBuilder::new().u16(1).build());
    data.extend(rect_geometry_record(name, 0, 0, 100, 50));
    data.extend(t0x1f_record(name, "U", "DIP8"));
    data
}

/// A global-symbol stream with the given pin records appended.
pub fn global_symbol_stream(name: &str, pins: &[Vec<u8>]) -> Vec<u8> {
    let mut data = StreamBuilder::new()
        .std_prefix(tags::GLOBAL_SYMBOL, 0)
        .preamble()
        .geometry_header(name, 0)
        .build();
    data.extend(StreamBuilder::new().u16(pins.len() as u16).build());
    for pin in pins {
        data.extend_from_slice(pin);
    }
    data
}

/// A scalar-pin record in the conditional-preamble flow.
pub fn scalar_pin_record(
    name: &str,
    start_x: i32,
    start_y: i32,
    hotpt_x: i32,
    hotpt_y: i32,
    pin_shape: u16,
    port_type: u32,
) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::SYMBOL_PIN_SCALAR, 0)
        .preamble()
        .pin_body(name, start_x, start_y, hotpt_x, hotpt_y, pin_shape, port_type)
        .build()
}

/// A directory stream with the given entries.
pub fn directory_stream(last_modified: u32, entries: &[(&str, u16, u16)]) -> Vec<u8> {
    let mut b = StreamBuilder::new()
        .u32(last_modified)
        .u16(entries.len() as u16);
    for (name, component_type, version) in entries {
        b = b
            .zstr(name)
            .u16(*component_type)
            .zeros(14)
            .u16(*version)
            .i16(60)
            .zeros(2);
    }
    b.build()
}

/// A `Library` stream with the given fonts and strings.
pub fn symbols_library_stream(fonts: &[&str], strings: &[&str]) -> Vec<u8> {
    let mut b = StreamBuilder::new()
        .zstr("OrCAD Capture")
        .u32(1_600_000_000)
        .u32(1_600_000_060)
        .u16(fonts.len() as u16);
    for font in fonts {
        b = b.i32(-12).i32(0).u16(0).u16(400).u8(0).zeros(1).zstr(font);
    }
    b = b.u32(strings.len() as u32);
    for s in strings {
        b = b.zstr(s);
    }
    b.build()
}

// ---------------------------------------------------------------------------
// Container tree builder
// ---------------------------------------------------------------------------

/// An extracted container tree on disk.
pub struct LibraryTree {
    root: PathBuf,
}

impl LibraryTree {
    /// Lay out the required streams of a minimal library under `root`.
    pub fn minimal(root: &Path) -> Self {
        let tree = Self {
            root: root.to_path_buf(),
        };

        fs::create_dir_all(root.join("Cells")).unwrap();
        fs::create_dir_all(root.join("ExportBlocks")).unwrap();
        fs::create_dir_all(root.join("Graphics")).unwrap();
        fs::create_dir_all(root.join("Packages")).unwrap();
        fs::create_dir_all(root.join("Parts")).unwrap();
        fs::create_dir_all(root.join("Symbols")).unwrap();
        fs::create_dir_all(root.join("Views")).unwrap();

        tree.write("Library.bin", &symbols_library_stream(&[], &[]));
        tree.write("Cache.bin", &[]);
        tree.write("ExportBlocks Directory.bin", &directory_stream(0, &[]));
        tree.write("Graphics Directory.bin", &directory_stream(0, &[]));
        tree.write("Packages Directory.bin", &directory_stream(0, &[]));
        tree.write("Parts Directory.bin", &directory_stream(0, &[]));
        tree.write("Symbols Directory.bin", &directory_stream(0, &[]));
        tree.write("Views Directory.bin", &directory_stream(0, &[]));
        tree.write("Graphics/$Types$.bin", &[]);
        tree.write("Symbols/$Types$.bin", &[]);

        tree
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a stream at a path relative to the root.
    pub fn write(&self, rel: &str, data: &[u8]) -> &Self {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
        self
    }

    /// Add a view folder with a schematic stream and optional extras.
    pub fn add_view(&self, name: &str, schematic: &[u8]) -> &Self {
        self.write(&format!("Views/{name}/Schematic.bin"), schematic)
    }
}

/// A schematic stream listing the given pages.
pub fn schematic_stream(name: &str, pages: &[&str]) -> Vec<u8> {
    let mut b = StreamBuilder::new()
        .zeros(4)
        .zstr(name)
        .zeros(4)
        .u16(pages.len() as u16);
    for page in pages {
        b = b.zstr(page).zeros(4);
    }
    b.build()
}
