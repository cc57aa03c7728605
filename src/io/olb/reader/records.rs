//! Record readers and the central dispatcher.
//!
//! Every reader follows the same skeleton: the caller has consumed the
//! prefix and (conditionally) the preamble; the reader consumes the body in
//! order, dispatches nested children back through [`parse_structure`]
//! (StreamContext::parse_structure), and drains any declared trailing
//! region before returning.

use log::{debug, trace};

use crate::error::{OlbError, Result};
use crate::io::olb::prefix;
use crate::io::olb::structure_type::Structure;
use crate::notification::NotificationType;
use crate::structures::{
    Alias, BusEntry, ErcSymbol, GeneralProperties, GraphicBoxInst, GraphicCommentTextInst,
    PartInst, PinFlags, PinIdxMapping, PinMapEntry, Properties, Properties2, Record, SthInPages0,
    SymbolBBox, SymbolDisplayProp, SymbolPinBus, SymbolPinScalar, T0x10, T0x1f, WireScalar,
};
use crate::structures::display_prop::PropVisibility;
use crate::types::{
    Color, ImplementationType, LineStyle, LineWidth, PinShape, PortType, Rotation,
};

use super::context::StreamContext;

/// Structures whose standard-prefix `byte_offset` reliably declares the
/// record's end and whose readers drain up to it.
fn declares_future(structure: Structure) -> bool {
    matches!(structure, Structure::SthInPages0 | Structure::BusEntry)
}

impl StreamContext<'_> {
    // -----------------------------------------------------------------------
    // Record entry points
    // -----------------------------------------------------------------------

    /// Read one record: standard prefix, preamble, body.
    ///
    /// This is the page-level flow, where every record sits behind a
    /// preamble regardless of its kind.
    pub fn parse_record(&mut self) -> Result<Record> {
        let type_prefix = prefix::read_type_prefix(&mut self.ds)?;
        self.byte_offset = type_prefix.byte_offset;

        let declared = declares_future(type_prefix.structure) && type_prefix.byte_offset > 0;
        if declared {
            let pos = self.ds.current_offset();
            self.futures.push(pos, pos + type_prefix.byte_offset as u64);
        }

        prefix::read_preamble(&mut self.ds, true)?;
        let record = self.parse_structure(type_prefix.structure)?;

        if declared {
            let actual = self.ds.current_offset();
            self.futures.pop_expect(actual)?;
        }

        Ok(record)
    }

    /// Read one record whose preamble presence depends on its kind.
    ///
    /// This is the package- and symbol-stream flow; the requirement table
    /// lives on [`Structure`].
    pub fn parse_record_conditional(&mut self) -> Result<Record> {
        let type_prefix = prefix::read_type_prefix(&mut self.ds)?;
        self.byte_offset = type_prefix.byte_offset;

        let declared = declares_future(type_prefix.structure) && type_prefix.byte_offset > 0;
        if declared {
            let pos = self.ds.current_offset();
            self.futures.push(pos, pos + type_prefix.byte_offset as u64);
        }

        prefix::read_conditional_preamble(&mut self.ds, type_prefix.structure, true)?;
        let record = self.parse_structure(type_prefix.structure)?;

        if declared {
            let actual = self.ds.current_offset();
            self.futures.pop_expect(actual)?;
        }

        Ok(record)
    }

    /// Read one record behind a long (outer) prefix and a preamble.
    pub fn parse_record_long(&mut self) -> Result<Record> {
        let structure = prefix::read_type_prefix_long(&mut self.ds)?;
        prefix::read_preamble(&mut self.ds, true)?;
        self.parse_structure(structure)
    }

    /// Central dispatcher: map a structure tag to its reader.
    ///
    /// The geometry-bearing symbol kinds carry a second preamble of their
    /// own; it is consumed here before their body.
    pub fn parse_structure(&mut self, structure: Structure) -> Result<Record> {
        debug!(
            "parse_structure {:?} @ {:#X}",
            structure,
            self.ds.current_offset()
        );

        let record = match structure {
            Structure::SthInPages0 => Record::SthInPages0(self.read_sth_in_pages0()?),
            Structure::Properties => Record::Properties(self.read_properties()?),
            Structure::PartInst => Record::PartInst(self.read_part_inst()?),
            Structure::T0x10 => Record::T0x10(self.read_t0x10()?),
            Structure::WireScalar => Record::WireScalar(self.read_wire_scalar()?),
            Structure::GeoDefinition => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::Geometry(self.parse_geometry_specification()?)
            }
            Structure::SymbolPinScalar => Record::SymbolPinScalar(self.read_symbol_pin_scalar()?),
            Structure::SymbolPinBus => Record::SymbolPinBus(self.read_symbol_pin_bus()?),
            Structure::T0x1f => Record::T0x1f(self.read_t0x1f()?),
            Structure::PinIdxMapping => Record::PinIdxMapping(self.read_pin_idx_mapping()?),
            Structure::GlobalSymbol => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::GlobalSymbol(self.parse_geometry_specification()?)
            }
            Structure::PortSymbol => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::PortSymbol(self.parse_geometry_specification()?)
            }
            Structure::OffPageSymbol => {
                Record::OffPageSymbol(self.parse_geometry_specification()?)
            }
            Structure::TitleBlockSymbol => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::TitleBlockSymbol(self.parse_geometry_specification()?)
            }
            Structure::SymbolDisplayProp => {
                Record::SymbolDisplayProp(self.read_symbol_display_prop()?)
            }
            Structure::Alias => Record::Alias(self.read_alias()?),
            Structure::GraphicBoxInst => Record::GraphicBoxInst(self.read_graphic_box_inst()?),
            Structure::GraphicCommentTextInst => {
                Record::GraphicCommentTextInst(self.read_graphic_comment_text_inst()?)
            }
            Structure::ErcSymbol => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::ErcSymbol(self.read_erc_symbol()?)
            }
            Structure::PinShapeSymbol => {
                prefix::read_preamble(&mut self.ds, true)?;
                Record::PinShapeSymbol(self.parse_geometry_specification()?)
            }
            Structure::BusEntry => Record::BusEntry(self.read_bus_entry()?),
            Structure::SymbolVector => Record::SymbolVector(self.read_symbol_vector()?),
        };

        Ok(record)
    }

    // -----------------------------------------------------------------------
    // Property records
    // -----------------------------------------------------------------------

    /// `ref zstr, 00 00 00, viewNumber u16, [convertName zstr], name zstr,
    /// 29 opaque bytes`.
    fn read_properties(&mut self) -> Result<Properties> {
        let reference = self.ds.read_string_zero_terminated()?;

        self.ds.assume_bytes(&[0x00, 0x00, 0x00], "readProperties - 0")?;

        let view_number = self.ds.read_u16()?;
        let convert_name = match view_number {
            // ".Normal" only.
            1 => None,
            // ".Normal" and ".Convert".
            2 => Some(self.ds.read_string_zero_terminated()?),
            _ => {
                return Err(OlbError::InvariantViolated {
                    what: format!("viewNumber is {view_number} but must be 1 or 2"),
                    offset: self.ds.current_offset(),
                })
            }
        };

        let name = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(29, "readProperties - 1")?;

        trace!("Properties name = {name}, reference = {reference}");

        Ok(Properties {
            reference,
            view_number,
            convert_name,
            name,
        })
    }

    /// `name zstr, 00 00 00, refDes zstr, 00 00 00, footprint zstr,
    /// sectionCount u16`.
    pub fn read_properties2(&mut self) -> Result<Properties2> {
        let name = self.ds.read_string_zero_terminated()?;

        self.ds.assume_bytes(&[0x00, 0x00, 0x00], "readProperties2 - 0")?;

        let ref_des = self.ds.read_string_zero_terminated()?;

        self.ds.assume_bytes(&[0x00, 0x00, 0x00], "readProperties2 - 1")?;

        let footprint = self.ds.read_string_zero_terminated()?;

        let section_count = self.ds.read_u16()?;

        Ok(Properties2 {
            name,
            ref_des,
            footprint,
            section_count,
        })
    }

    /// Part-level properties: implementation strings and the packed
    /// pin-visibility byte (`00xx xxxxb`; implementation type in bits 5..3,
    /// pin flags in bits 2..0).
    pub fn read_general_properties(&mut self) -> Result<GeneralProperties> {
        let implementation_path = self.ds.read_string_zero_terminated()?;
        let implementation = self.ds.read_string_zero_terminated()?;
        let ref_des_prefix = self.ds.read_string_zero_terminated()?;
        let part_value = self.ds.read_string_zero_terminated()?;

        let properties = self.ds.read_u8()?;
        if properties & 0xC0 != 0 {
            return Err(OlbError::InvariantViolated {
                what: format!("expected 00xx xxxxb but got {properties:#04X}"),
                offset: self.ds.current_offset().saturating_sub(1),
            });
        }

        let pin_flags = PinFlags::from_bits_truncate(properties & 0x07);
        let implementation_type: ImplementationType =
            self.ds.to_enum(((properties >> 3) & 0x07) as u32)?;

        self.ds.print_unknown(1, "readGeneralProperties - 0")?;

        Ok(GeneralProperties {
            implementation_path,
            implementation,
            ref_des_prefix,
            part_value,
            pin_flags,
            implementation_type,
        })
    }

    // -----------------------------------------------------------------------
    // Pin records
    // -----------------------------------------------------------------------

    fn read_symbol_pin_scalar(&mut self) -> Result<SymbolPinScalar> {
        let name = self.ds.read_string_zero_terminated()?;

        let start_x = self.ds.read_i32()?;
        let start_y = self.ds.read_i32()?;
        let hotpt_x = self.ds.read_i32()?;
        let hotpt_y = self.ds.read_i32()?;

        let raw = self.ds.read_u16()?;
        let pin_shape: PinShape = self.ds.to_enum(raw as u32)?;

        self.ds.print_unknown(2, "readSymbolPinScalar - 0")?;

        let raw = self.ds.read_u32()?;
        let port_type: PortType = self.ds.to_enum(raw)?;

        self.ds.print_unknown(6, "readSymbolPinScalar - 1")?;

        trace!("SymbolPinScalar {name} at ({start_x}, {start_y})");

        Ok(SymbolPinScalar {
            name,
            start_x,
            start_y,
            hotpt_x,
            hotpt_y,
            pin_shape,
            port_type,
        })
    }

    fn read_symbol_pin_bus(&mut self) -> Result<SymbolPinBus> {
        let name = self.ds.read_string_zero_terminated()?;

        let start_x = self.ds.read_i32()?;
        let start_y = self.ds.read_i32()?;
        let hotpt_x = self.ds.read_i32()?;
        let hotpt_y = self.ds.read_i32()?;

        let raw = self.ds.read_u16()?;
        let pin_shape: PinShape = self.ds.to_enum(raw as u32)?;

        self.ds.print_unknown(2, "readSymbolPinBus - 0")?;

        let raw = self.ds.read_u32()?;
        let port_type: PortType = self.ds.to_enum(raw)?;

        self.ds.print_unknown(6, "readSymbolPinBus - 1")?;

        Ok(SymbolPinBus {
            name,
            start_x,
            start_y,
            hotpt_x,
            hotpt_y,
            pin_shape,
            port_type,
        })
    }

    /// `unitRef zstr, refDes zstr, pinCount u16, pinCount x (pinName zstr,
    /// separator u8)`.  The separator takes only 0x7F, 0xAA or 0xFF.
    fn read_pin_idx_mapping(&mut self) -> Result<PinIdxMapping> {
        let unit_ref = self.ds.read_string_zero_terminated()?;
        let ref_des = self.ds.read_string_zero_terminated()?;

        let pin_count = self.ds.read_u16()?;

        let mut pin_map = Vec::with_capacity(pin_count as usize);
        for _ in 0..pin_count {
            let name = self.ds.read_string_zero_terminated()?;
            let property = self.ds.read_u8()?;

            trace!("pin separator = {property:#04X}");

            if !matches!(property, 0x7F | 0xAA | 0xFF) {
                return Err(OlbError::InvariantViolated {
                    what: format!(
                        "pin separator must be 0x7F, 0xAA or 0xFF but is {property:#04X}"
                    ),
                    offset: self.ds.current_offset().saturating_sub(1),
                });
            }

            pin_map.push(PinMapEntry { name, property });
        }

        Ok(PinIdxMapping {
            unit_ref,
            ref_des,
            pin_map,
        })
    }

    // -----------------------------------------------------------------------
    // Display properties
    // -----------------------------------------------------------------------

    /// `nameIdx u32, x i16, y i16, packed u16, color u8, visibility pair,
    /// assert 00`.  The packed word holds the text font index in its low
    /// byte, six reserved zero bits, and the rotation in its top two bits.
    fn read_symbol_display_prop(&mut self) -> Result<SymbolDisplayProp> {
        let name_idx = self.ds.read_u32()?;

        // The index must resolve against the global string table.
        let name = self.lookup_string(name_idx)?;
        trace!("display prop name = {name}");

        let x = self.ds.read_i16()?;
        let y = self.ds.read_i16()?;

        let packed = self.ds.read_u16()?;

        let text_font_idx = (packed & 0xFF) as u8;
        if let Some(font_count) = self.text_font_count() {
            if text_font_idx as usize > font_count {
                return Err(OlbError::InvariantViolated {
                    what: format!(
                        "textFontIdx {text_font_idx} exceeds font table size {font_count}"
                    ),
                    offset: self.ds.current_offset(),
                });
            }
        }

        let reserved = (packed >> 8) & 0x3F;
        if reserved != 0 {
            return Err(OlbError::InvariantViolated {
                what: format!("reserved bits {reserved:#04X} in packed display word"),
                offset: self.ds.current_offset(),
            });
        }

        // Top two bits; always a valid rotation.
        let rotation: Rotation = self.ds.to_enum((packed >> 14) as u32)?;

        let raw = self.ds.read_u8()?;
        let color: Color = self.ds.to_enum(raw as u32)?;

        // Visibility pair, e.g. `CC 01` for value-only.
        let modifier = self.ds.read_u8()?;
        let selector = self.ds.read_u8()?;
        let visibility = match PropVisibility::from_selector(selector) {
            Some(v) => v,
            None => {
                self.ds.notes().notify(
                    NotificationType::UnexpectedValue,
                    format!("display visibility pair {modifier:#04X} {selector:#04X}"),
                );
                PropVisibility::default()
            }
        };

        self.ds.assume_bytes(&[0x00], "readSymbolDisplayProp - 1")?;

        Ok(SymbolDisplayProp {
            name_idx,
            x,
            y,
            text_font_idx,
            rotation,
            color,
            visibility,
        })
    }

    // -----------------------------------------------------------------------
    // Package records
    // -----------------------------------------------------------------------

    /// Package properties: five strings and a trailing unit count.
    fn read_t0x1f(&mut self) -> Result<T0x1f> {
        let name = self.ds.read_string_zero_terminated()?;

        let unknown_str0 = self.ds.read_string_zero_terminated()?;
        trace!("readT0x1f unknownStr0 = {unknown_str0}");

        let ref_des = self.ds.read_string_zero_terminated()?;

        let unknown_str1 = self.ds.read_string_zero_terminated()?;
        trace!("readT0x1f unknownStr1 = {unknown_str1}");

        let pcb_footprint = self.ds.read_string_zero_terminated()?;

        // Also called "Section Count".
        self.ds.print_unknown(2, "readT0x1f - 0 - unit count")?;

        Ok(T0x1f {
            name,
            ref_des,
            pcb_footprint,
        })
    }

    // -----------------------------------------------------------------------
    // Page-level records
    // -----------------------------------------------------------------------

    /// Wire body, with the `byte_offset`-gated alias block in the middle.
    fn read_wire_scalar(&mut self) -> Result<WireScalar> {
        let db_id = self.ds.read_u32()?;
        trace!("WireScalar dbId = {db_id}");

        self.ds.print_unknown(4, "readWireScalar - 0")?;

        let raw = self.ds.read_u32()?;
        let color: Color = self.ds.to_enum(raw)?;

        let start_x = self.ds.read_i32()?;
        let start_y = self.ds.read_i32()?;
        let end_x = self.ds.read_i32()?;
        let end_y = self.ds.read_i32()?;

        self.ds.print_unknown(1, "readWireScalar - 1")?;

        let byte_offset = self.byte_offset;
        trace!("WireScalar byte_offset = {byte_offset:#X}");

        let mut aliases = Vec::new();
        if byte_offset == 0x3D {
            self.ds.print_unknown(2, "readWireScalar - 2")?;
        } else if byte_offset > 0x3D {
            let len = self.ds.read_u16()?;
            for _ in 0..len {
                aliases.push(self.parse_record()?);
            }
        }

        self.ds.print_unknown(2, "readWireScalar - 3")?;

        let raw = self.ds.read_u32()?;
        let line_width: LineWidth = self.ds.to_enum(raw)?;
        let raw = self.ds.read_u32()?;
        let line_style: LineStyle = self.ds.to_enum(raw)?;

        Ok(WireScalar {
            db_id,
            color,
            start_x,
            start_y,
            end_x,
            end_y,
            aliases,
            line_width,
            line_style,
        })
    }

    fn read_alias(&mut self) -> Result<Alias> {
        let loc_x = self.ds.read_i32()?;
        let loc_y = self.ds.read_i32()?;

        let raw = self.ds.read_u32()?;
        let color: Color = self.ds.to_enum(raw)?;

        let raw = self.ds.read_u32()?;
        let rotation: Rotation = self.ds.to_enum(raw)?;

        let text_font_idx = self.ds.read_u16()?;

        self.ds.print_unknown(2, "readAlias - 0")?;

        let name = self.ds.read_string_zero_terminated()?;

        Ok(Alias {
            loc_x,
            loc_y,
            color,
            rotation,
            text_font_idx,
            name,
        })
    }

    /// `color u32, startX/startY/endX/endY i32`, then the rest of the
    /// declared extent is skipped.
    fn read_bus_entry(&mut self) -> Result<BusEntry> {
        let raw = self.ds.read_u32()?;
        let color: Color = self.ds.to_enum(raw)?;

        let start_x = self.ds.read_i32()?;
        let start_y = self.ds.read_i32()?;
        let end_x = self.ds.read_i32()?;
        let end_y = self.ds.read_i32()?;

        if self.futures.next_boundary().is_some() {
            self.read_until_next_future("readBusEntry trailing")?;
        }

        Ok(BusEntry {
            color,
            start_x,
            start_y,
            end_x,
            end_y,
        })
    }

    /// Placed part instance, including both attachment lists and the
    /// long-prefixed annex record.
    fn read_part_inst(&mut self) -> Result<PartInst> {
        self.ds.print_unknown(8, "readPartInst - 0")?;

        let pkg_name = self.ds.read_string_zero_terminated()?;
        let db_id = self.ds.read_u32()?;

        self.ds.print_unknown(8, "readPartInst - 1")?;

        let loc_x = self.ds.read_i16()?;
        let loc_y = self.ds.read_i16()?;

        let raw = self.ds.read_u16()?;
        let color: Color = self.ds.to_enum(raw as u32)?;

        self.ds.print_unknown(2, "readPartInst - 2")?;

        let len = self.ds.read_u16()?;
        let mut records = Vec::with_capacity(len as usize);
        for _ in 0..len {
            records.push(self.parse_record()?);
        }

        self.ds.print_unknown(1, "readPartInst - 3")?;

        let reference = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(14, "readPartInst - 4")?;

        let len2 = self.ds.read_u16()?;
        let mut records2 = Vec::with_capacity(len2 as usize);
        for _ in 0..len2 {
            records2.push(self.parse_record()?);
        }

        let extra = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(2, "readPartInst - 5")?;
        self.ds.print_unknown(18, "readPartInst - 6")?;

        let annex = self.parse_record_long()?;

        Ok(PartInst {
            pkg_name,
            db_id,
            loc_x,
            loc_y,
            color,
            records,
            reference,
            records2,
            extra,
            annex: Some(Box::new(annex)),
        })
    }

    fn read_t0x10(&mut self) -> Result<T0x10> {
        self.ds.print_unknown(16, "readT0x10 - 0")?;
        Ok(T0x10)
    }

    fn read_graphic_comment_text_inst(&mut self) -> Result<GraphicCommentTextInst> {
        self.ds.print_unknown(34, "readGraphicCommentTextInst - 0")?;
        Ok(GraphicCommentTextInst)
    }

    /// Placed rectangle; wraps its shape record behind a long prefix.
    fn read_graphic_box_inst(&mut self) -> Result<GraphicBoxInst> {
        self.ds.print_unknown(11, "readGraphicBoxInst - 0")?;

        let db_id = self.ds.read_u32()?;

        let loc_y = self.ds.read_i16()?;
        let loc_x = self.ds.read_i16()?;

        let y2 = self.ds.read_i16()?;
        let x2 = self.ds.read_i16()?;

        let x1 = self.ds.read_i16()?;
        let y1 = self.ds.read_i16()?;

        let raw = self.ds.read_u16()?;
        let color: Color = self.ds.to_enum(raw as u32)?;

        self.ds.print_unknown(5, "readGraphicBoxInst - 1")?;

        let shape = self.parse_record_long()?;

        Ok(GraphicBoxInst {
            db_id,
            loc_x,
            loc_y,
            x1,
            y1,
            x2,
            y2,
            color,
            shape: Some(Box::new(shape)),
        })
    }

    /// Instance wrapper with its own primitive list and an ambiguous tail:
    /// exactly eight remaining bytes are a bounding box, anything else is
    /// skipped to the next checkpoint.
    fn read_sth_in_pages0(&mut self) -> Result<SthInPages0> {
        let name = self.ds.read_string_zero_terminated()?;
        let some_str = self.ds.read_string_zero_terminated()?;

        self.futures.checkpoint(self.ds.current_offset());

        let raw = self.ds.read_u32()?;
        let color: Color = self.ds.to_enum(raw)?;

        let len = self.ds.read_u16()?;
        let mut primitives = Vec::with_capacity(len as usize);
        for _ in 0..len {
            let kind = prefix::read_prefix_primitive(&mut self.ds)?;
            primitives.push(self.read_primitive(kind)?);
        }

        let offset = self.ds.current_offset();
        let bbox = if self.futures.remaining(offset) == Some(8) {
            // Probably coordinates.
            let x1 = self.ds.read_i16()?;
            let y1 = self.ds.read_i16()?;
            let x2 = self.ds.read_i16()?;
            let y2 = self.ds.read_i16()?;
            Some(SymbolBBox { x1, y1, x2, y2 })
        } else {
            if self.futures.next_boundary().is_some() {
                self.read_until_next_future("StructSthInPages0 trailing")?;
            }
            None
        };

        self.futures.checkpoint(self.ds.current_offset());

        Ok(SthInPages0 {
            name,
            some_str,
            color,
            primitives,
            bbox,
        })
    }

    /// ERC marker: name, opaque block, primitive list, then its bounding
    /// box behind a preamble.
    fn read_erc_symbol(&mut self) -> Result<ErcSymbol> {
        let name = self.ds.read_string_zero_terminated()?;

        self.ds.print_unknown(3, "readERCSymbol - 0")?;
        self.ds.print_unknown(4, "readERCSymbol - 1")?;

        let len = self.ds.read_u16()?;
        let mut geometry = crate::structures::GeometrySpecification {
            name: name.clone(),
            ..Default::default()
        };
        for _ in 0..len {
            let kind = prefix::read_prefix_primitive(&mut self.ds)?;
            let primitive = self.read_primitive(kind)?;
            geometry.push(primitive);
        }

        prefix::read_preamble(&mut self.ds, true)?;
        let bbox = self.read_symbol_bbox()?;

        Ok(ErcSymbol {
            name,
            geometry,
            bbox,
        })
    }

    /// Four 16-bit corners and a trailing opaque word.
    pub(super) fn read_symbol_bbox(&mut self) -> Result<SymbolBBox> {
        let x1 = self.ds.read_i16()?;
        let y1 = self.ds.read_i16()?;
        let x2 = self.ds.read_i16()?;
        let y2 = self.ds.read_i16()?;

        self.ds.print_unknown(4, "readSymbolBBox - 0")?;

        Ok(SymbolBBox { x1, y1, x2, y2 })
    }
}
