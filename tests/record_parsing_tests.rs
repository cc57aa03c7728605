//! Byte-level tests of the record readers: prefixes, preambles, bodies,
//! invariants and the future-data machinery.

mod common;

use common::*;

use orcadrust::error::OlbError;
use orcadrust::io::olb::reader::StreamContext;
use orcadrust::io::olb::structure_type::Structure;
use orcadrust::io::olb::DataStream;
use orcadrust::library::{StringTable, SymbolsLibrary, TextFont};
use orcadrust::structures::Record;
use orcadrust::types::{Color, FileFormatVersion, LineStyle, LineWidth, PinShape, PortType};

fn ctx(data: Vec<u8>) -> StreamContext<'static> {
    StreamContext::new(DataStream::new(data), FileFormatVersion::C)
}

fn sym_lib(fonts: usize, strings: &[&str]) -> SymbolsLibrary {
    SymbolsLibrary {
        text_fonts: (0..fonts)
            .map(|i| TextFont {
                name: format!("Arial {i}"),
                ..Default::default()
            })
            .collect(),
        str_lst: StringTable::new(strings.iter().map(|s| s.to_string()).collect()),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn properties_with_one_view_omits_convert_name() {
    let mut ctx = ctx(properties_record("U?", "NAND2", None));
    let record = ctx.parse_record_conditional().unwrap();

    match record {
        Record::Properties(p) => {
            assert_eq!(p.reference, "U?");
            assert_eq!(p.name, "NAND2");
            assert_eq!(p.view_number, 1);
            assert_eq!(p.convert_name, None);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn properties_with_two_views_includes_convert_name() {
    let mut ctx = ctx(properties_record("U?", "NAND2", Some("NAND2.Convert")));
    let record = ctx.parse_record_conditional().unwrap();

    match record {
        Record::Properties(p) => {
            assert_eq!(p.view_number, 2);
            assert_eq!(p.convert_name.as_deref(), Some("NAND2.Convert"));
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn properties_with_invalid_view_number_fails() {
    let data = StreamBuilder::new()
        .std_prefix(tags::PROPERTIES, 0)
        .preamble()
        .zstr("U?")
        .zeros(3)
        .u16(3) // viewNumber may only be 1 or 2
        .zstr("NAND2")
        .zeros(29)
        .build();

    let err = ctx(data).parse_record_conditional().unwrap_err();
    match err {
        OlbError::InvariantViolated { what, .. } => assert!(what.contains("viewNumber")),
        other => panic!("unexpected error {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Pins
// ---------------------------------------------------------------------------

#[test]
fn scalar_pin_carries_coordinates_shape_and_port_type() {
    let mut ctx = ctx(scalar_pin_record("IN", 100, 0, 100, 10, 0, 4));
    let record = ctx.parse_record_conditional().unwrap();

    match record {
        Record::SymbolPinScalar(pin) => {
            assert_eq!(pin.name, "IN");
            assert_eq!(pin.start_x, 100);
            assert_eq!(pin.start_y, 0);
            assert_eq!(pin.hotpt_x, 100);
            assert_eq!(pin.hotpt_y, 10);
            assert_eq!(pin.pin_shape, PinShape::Line);
            assert_eq!(pin.port_type, PortType::Passive);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn pin_with_unknown_port_type_fails() {
    let mut ctx = ctx(scalar_pin_record("IN", 0, 0, 0, 0, 0, 0x99));
    let err = ctx.parse_record_conditional().unwrap_err();
    assert!(matches!(
        err,
        OlbError::UnknownEnumValue {
            kind: "PortType",
            raw: 0x99,
            ..
        }
    ));
}

fn pin_idx_mapping_record(separators: &[u8]) -> Vec<u8> {
    let mut b = StreamBuilder::new()
        .std_prefix(tags::PIN_IDX_MAPPING, 0)
        .preamble()
        .zstr("U1")
        .zstr("U?")
        .u16(separators.len() as u16);
    for (i, sep) in separators.iter().enumerate() {
        b = b.zstr(&format!("{}", i + 1)).u8(*sep);
    }
    b.build()
}

#[test]
fn pin_idx_mapping_accepts_observed_separators() {
    let mut ctx = ctx(pin_idx_mapping_record(&[0x7F, 0xAA, 0xFF]));
    let record = ctx.parse_record_conditional().unwrap();

    match record {
        Record::PinIdxMapping(m) => {
            assert_eq!(m.unit_ref, "U1");
            assert_eq!(m.ref_des, "U?");
            assert_eq!(m.pin_map.len(), 3);
            assert_eq!(m.pin_map[0].name, "1");
            assert_eq!(m.pin_map[0].property, 0x7F);
            assert_eq!(m.pin_map[2].property, 0xFF);
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn pin_idx_mapping_rejects_unknown_separator() {
    let mut ctx = ctx(pin_idx_mapping_record(&[0x7F, 0x7F, 0x42]));
    let err = ctx.parse_record_conditional().unwrap_err();
    match err {
        OlbError::InvariantViolated { what, .. } => assert!(what.contains("pin separator")),
        other => panic!("unexpected error {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Display properties
// ---------------------------------------------------------------------------

fn display_prop_record(name_idx: u32, packed: u16) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::SYMBOL_DISPLAY_PROP, 0)
        .preamble()
        .display_prop_body(name_idx, 10, -20, packed, 4)
        .build()
}

#[test]
fn display_prop_accepts_valid_packed_word() {
    let lib = sym_lib(3, &["VALUE"]);
    let mut ctx = StreamContext::new(
        DataStream::new(display_prop_record(1, 0x0002)),
        FileFormatVersion::C,
    )
    .with_library(Some(&lib));

    let record = ctx.parse_record_conditional().unwrap();
    match record {
        Record::SymbolDisplayProp(p) => {
            assert_eq!(p.name_idx, 1);
            assert_eq!(p.text_font_idx, 2);
            assert_eq!(p.rotation, orcadrust::types::Rotation::Deg0);
            assert_eq!(p.color, Color::Red);
            assert_eq!(p.x, 10);
            assert_eq!(p.y, -20);
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn display_prop_rejects_reserved_bits() {
    let lib = sym_lib(3, &["VALUE"]);
    let mut ctx = StreamContext::new(
        DataStream::new(display_prop_record(1, 0x0103)),
        FileFormatVersion::C,
    )
    .with_library(Some(&lib));

    let err = ctx.parse_record_conditional().unwrap_err();
    match err {
        OlbError::InvariantViolated { what, .. } => assert!(what.contains("reserved bits")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn display_prop_rotation_comes_from_top_bits() {
    let lib = sym_lib(3, &["VALUE"]);
    let mut ctx = StreamContext::new(
        DataStream::new(display_prop_record(1, 0x8001)),
        FileFormatVersion::C,
    )
    .with_library(Some(&lib));

    match ctx.parse_record_conditional().unwrap() {
        Record::SymbolDisplayProp(p) => {
            assert_eq!(p.rotation, orcadrust::types::Rotation::Deg180);
            assert_eq!(p.text_font_idx, 1);
        }
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn display_prop_rejects_font_index_beyond_table() {
    let lib = sym_lib(3, &["VALUE"]);
    let mut ctx = StreamContext::new(
        DataStream::new(display_prop_record(1, 0x0004)),
        FileFormatVersion::C,
    )
    .with_library(Some(&lib));

    let err = ctx.parse_record_conditional().unwrap_err();
    match err {
        OlbError::InvariantViolated { what, .. } => assert!(what.contains("textFontIdx")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn display_prop_rejects_string_index_beyond_table() {
    let lib = sym_lib(3, &["VALUE"]);
    let mut ctx = StreamContext::new(
        DataStream::new(display_prop_record(9, 0x0001)),
        FileFormatVersion::C,
    )
    .with_library(Some(&lib));

    let err = ctx.parse_record_conditional().unwrap_err();
    assert!(matches!(err, OlbError::InvariantViolated { .. }));
}

// ---------------------------------------------------------------------------
// Wires and aliases
// ---------------------------------------------------------------------------

fn alias_record(name: &str) -> Vec<u8> {
    StreamBuilder::new()
        .std_prefix(tags::ALIAS, 0)
        .preamble()
        .i32(50)
        .i32(60)
        .u32(1) // Color::Blue
        .u32(1) // Rotation::Deg90
        .u16(0)
        .zeros(2)
        .zstr(name)
        .build()
}

fn wire_scalar_record(byte_offset: u32, middle: &[u8]) -> Vec<u8> {
    let mut b = StreamBuilder::new()
        .std_prefix(tags::WIRE_SCALAR, byte_offset)
        .preamble()
        .u32(7) // dbId
        .zeros(4)
        .u32(2) // Color::Green
        .i32(0)
        .i32(0)
        .i32(300)
        .i32(0)
        .zeros(1);
    b = b.raw(middle);
    b.zeros(2).u32(3).u32(0).build()
}

#[test]
fn wire_scalar_with_narrow_prefix_reads_no_alias_block() {
    let mut ctx = ctx(wire_scalar_record(0x10, &[]));
    match ctx.parse_record().unwrap() {
        Record::WireScalar(w) => {
            assert_eq!(w.db_id, 7);
            assert_eq!(w.color, Color::Green);
            assert_eq!(w.end_x, 300);
            assert!(w.aliases.is_empty());
            assert_eq!(w.line_width, LineWidth::Default);
            assert_eq!(w.line_style, LineStyle::Solid);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn wire_scalar_at_gate_value_consumes_two_extra_bytes() {
    let mut ctx = ctx(wire_scalar_record(0x3D, &[0xAB, 0xCD]));
    match ctx.parse_record().unwrap() {
        Record::WireScalar(w) => assert!(w.aliases.is_empty()),
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn wire_scalar_above_gate_value_reads_nested_aliases() {
    let mut middle = StreamBuilder::new().u16(1).build();
    middle.extend(alias_record("NET1"));

    let mut ctx = ctx(wire_scalar_record(0x50, &middle));
    match ctx.parse_record().unwrap() {
        Record::WireScalar(w) => {
            assert_eq!(w.aliases.len(), 1);
            match &w.aliases[0] {
                Record::Alias(a) => {
                    assert_eq!(a.name, "NET1");
                    assert_eq!(a.loc_x, 50);
                    assert_eq!(a.color, Color::Blue);
                }
                other => panic!("unexpected nested record {other:?}"),
            }
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

// ---------------------------------------------------------------------------
// Future data
// ---------------------------------------------------------------------------

fn bus_entry_record(trailing: usize, byte_offset_delta: i64) -> Vec<u8> {
    // preamble (8) + color (4) + 4 coordinates (16) + trailing
    let body_len = 8 + 4 + 16 + trailing;
    let byte_offset = (body_len as i64 + byte_offset_delta) as u32;
    StreamBuilder::new()
        .std_prefix(tags::BUS_ENTRY, byte_offset)
        .preamble()
        .u32(0)
        .i32(10)
        .i32(20)
        .i32(30)
        .i32(40)
        .zeros(trailing)
        .build()
}

#[test]
fn bus_entry_drains_declared_extent() {
    let mut ctx = ctx(bus_entry_record(6, 0));
    match ctx.parse_record().unwrap() {
        Record::BusEntry(b) => {
            assert_eq!(b.start_x, 10);
            assert_eq!(b.end_y, 40);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
    assert!(ctx.futures.is_empty());
}

#[test]
fn bus_entry_with_wrong_extent_fails_checkpoint() {
    // Declared end is four bytes short of the coordinates' actual end.
    let mut ctx = ctx(bus_entry_record(0, -4));
    let err = ctx.parse_record().unwrap_err();
    assert!(matches!(err, OlbError::CheckpointMisaligned { .. }));
}

fn sth_in_pages0_record(trailing: usize) -> Vec<u8> {
    // preamble (8) + name (5) + some_str (1) + color (4) + count (2)
    // + one line primitive (3 + 24) + trailing
    let body_len = 8 + 5 + 1 + 4 + 2 + 3 + 24 + trailing;
    StreamBuilder::new()
        .std_prefix(tags::STH_IN_PAGES0, body_len as u32)
        .preamble()
        .zstr("INST")
        .zstr("")
        .u32(0)
        .u16(1)
        .prim_prefix(prims::LINE)
        .line_body(0, 0, 10, 10)
        .raw(&{
            let mut tail = Vec::new();
            for i in 0..trailing {
                tail.push(i as u8);
            }
            tail
        })
        .build()
}

#[test]
fn sth_in_pages0_reads_bbox_when_eight_bytes_remain() {
    let mut data = sth_in_pages0_record(0);
    // Replace the empty tail with an 8-byte bounding box.
    let bbox = StreamBuilder::new().i16(-5).i16(-5).i16(5).i16(5).build();
    data.extend_from_slice(&bbox);
    // Patch the declared extent accordingly: byte_offset sits right after
    // the leading tag byte of the standard prefix.
    let body_len = 8 + 5 + 1 + 4 + 2 + 3 + 24 + 8;
    data[1..5].copy_from_slice(&(body_len as u32).to_le_bytes());

    let mut ctx = ctx(data);
    match ctx.parse_record().unwrap() {
        Record::SthInPages0(s) => {
            assert_eq!(s.name, "INST");
            assert_eq!(s.primitives.len(), 1);
            let bbox = s.bbox.expect("eight remaining bytes are a bbox");
            assert_eq!((bbox.x1, bbox.y1, bbox.x2, bbox.y2), (-5, -5, 5, 5));
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn sth_in_pages0_skips_other_trailing_sizes() {
    let mut ctx = ctx(sth_in_pages0_record(5));
    match ctx.parse_record().unwrap() {
        Record::SthInPages0(s) => assert!(s.bbox.is_none()),
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

// ---------------------------------------------------------------------------
// Opaque records and wrappers
// ---------------------------------------------------------------------------

#[test]
fn t0x10_consumes_its_sixteen_bytes() {
    let data = StreamBuilder::new()
        .std_prefix(tags::T0X10, 0)
        .preamble()
        .zeros(16)
        .build();
    let mut ctx = ctx(data);
    assert!(matches!(ctx.parse_record().unwrap(), Record::T0x10(_)));
    ctx.expect_eof().unwrap();
}

#[test]
fn graphic_box_inst_wraps_a_long_prefixed_record() {
    let data = StreamBuilder::new()
        .std_prefix(0x25, 0)
        .preamble()
        .zeros(11)
        .u32(99) // dbId
        .i16(1) // locY
        .i16(2) // locX
        .i16(30) // y2
        .i16(40) // x2
        .i16(0) // x1
        .i16(0) // y1
        .u16(0) // color
        .zeros(5)
        .long_prefix(tags::T0X10)
        .preamble()
        .zeros(16)
        .build();

    let mut ctx = ctx(data);
    match ctx.parse_record().unwrap() {
        Record::GraphicBoxInst(g) => {
            assert_eq!(g.db_id, 99);
            assert_eq!(g.loc_x, 2);
            assert_eq!(g.x2, 40);
            let shape = g.shape.expect("wrapped record");
            assert_eq!(shape.structure(), Structure::T0x10);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

// ---------------------------------------------------------------------------
// Symbol vectors
// ---------------------------------------------------------------------------

#[test]
fn symbol_vector_reads_group_and_fixed_tail() {
    let data = StreamBuilder::new()
        .raw(&[0x13, 0x37]) // leading garbage skipped by the reader
        .preamble()
        .i16(5)
        .i16(-5)
        .u16(1)
        .prim_prefix(prims::LINE)
        .line_body(0, 0, 20, 0)
        .preamble()
        .zstr("GND")
        .raw(&[
            0x00, 0x00, 0x00, 0x00, 0x32, 0x00, 0x32, 0x00, 0x00, 0x00, 0x02, 0x00,
        ])
        .build();

    let mut ctx = ctx(data);
    match ctx.parse_structure(Structure::SymbolVector).unwrap() {
        Record::SymbolVector(v) => {
            assert_eq!(v.name, "GND");
            assert_eq!(v.loc_x, 5);
            assert_eq!(v.loc_y, -5);
            assert_eq!(v.primitives.len(), 1);
        }
        other => panic!("unexpected record {other:?}"),
    }
    ctx.expect_eof().unwrap();
}

#[test]
fn symbol_vector_rejects_wrong_tail() {
    let data = StreamBuilder::new()
        .preamble()
        .i16(0)
        .i16(0)
        .u16(0)
        .preamble()
        .zstr("X")
        .zeros(12) // wrong fixed tail
        .build();

    let mut ctx = ctx(data);
    let err = ctx.parse_structure(Structure::SymbolVector).unwrap_err();
    assert!(matches!(err, OlbError::MagicMismatch { .. }));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn unknown_structure_tag_is_reported_with_offset() {
    let mut ctx = ctx(vec![0xEE, 0x00, 0x00, 0x00, 0x00]);
    let err = ctx.parse_record().unwrap_err();
    assert!(matches!(
        err,
        OlbError::UnknownStructure { tag: 0xEE, offset: 0 }
    ));
}

#[test]
fn mismatched_prefix_tag_pair_is_fatal() {
    // Standard prefix announcing WireScalar whose short form repeats Alias.
    let mut data = StreamBuilder::new().u8(tags::WIRE_SCALAR).u32(0).zeros(4).build();
    data.extend(
        StreamBuilder::new()
            .u8(tags::ALIAS)
            .u32(0x0B)
            .zeros(4)
            .u8(tags::ALIAS)
            .i16(0)
            .build(),
    );

    let mut ctx = ctx(data);
    let err = ctx.parse_record().unwrap_err();
    assert!(matches!(err, OlbError::TagMismatch { .. }));
}

#[test]
fn truncated_record_reports_truncated_stream() {
    let data = StreamBuilder::new()
        .std_prefix(tags::T0X10, 0)
        .preamble()
        .zeros(4) // record needs 16
        .build();
    let mut ctx = ctx(data);
    let err = ctx.parse_record().unwrap_err();
    assert!(matches!(err, OlbError::TruncatedStream { .. }));
}
