//! Geometry primitive readers.
//!
//! Primitive bodies are fixed-layout.  The differences between format
//! generations sit in the list loop of [`parse_geometry_specification`]
//! (StreamContext::parse_geometry_specification): generation A appends
//! eight opaque bytes after every primitive, generation B re-reads a type
//! prefix between primitives, and generations B and C re-read the preamble.

use log::trace;

use crate::error::{OlbError, Result};
use crate::io::olb::prefix;
use crate::io::olb::primitive_type::Primitive;
use crate::primitives::{
    Arc, Bezier, Bitmap, CommentText, Ellipse, GraphicPrimitive, Line, Point, Polygon, Polyline,
    Rect, SymbolVector,
};
use crate::structures::GeometrySpecification;
use crate::types::{FileFormatVersion, FillStyle, HatchStyle, LineStyle, LineWidth};

use super::context::StreamContext;

impl StreamContext<'_> {
    /// Read the primitive body for `kind`.
    pub fn read_primitive(&mut self, kind: Primitive) -> Result<GraphicPrimitive> {
        trace!("read_primitive {:?} @ {:#X}", kind, self.ds.current_offset());

        Ok(match kind {
            Primitive::Rect => GraphicPrimitive::Rect(self.read_rect()?),
            Primitive::Line => GraphicPrimitive::Line(self.read_line()?),
            Primitive::Arc => GraphicPrimitive::Arc(self.read_arc()?),
            Primitive::Ellipse => GraphicPrimitive::Ellipse(self.read_ellipse()?),
            Primitive::Polygon => GraphicPrimitive::Polygon(self.read_polygon()?),
            Primitive::Polyline => GraphicPrimitive::Polyline(self.read_polyline()?),
            Primitive::CommentText => GraphicPrimitive::CommentText(self.read_comment_text()?),
            Primitive::Bitmap => GraphicPrimitive::Bitmap(self.read_bitmap()?),
            Primitive::SymbolVector => GraphicPrimitive::SymbolVector(self.read_symbol_vector()?),
            Primitive::Bezier => GraphicPrimitive::Bezier(self.read_bezier()?),
        })
    }

    fn read_line_styles(&mut self) -> Result<(LineStyle, LineWidth)> {
        let raw = self.ds.read_u32()?;
        let style: LineStyle = self.ds.to_enum(raw)?;
        let raw = self.ds.read_u32()?;
        let width: LineWidth = self.ds.to_enum(raw)?;
        Ok((style, width))
    }

    fn read_fill_styles(&mut self) -> Result<(FillStyle, HatchStyle)> {
        let raw = self.ds.read_u32()?;
        let fill: FillStyle = self.ds.to_enum(raw)?;
        let raw = self.ds.read_u32()?;
        let hatch: HatchStyle = self.ds.to_enum(raw)?;
        Ok((fill, hatch))
    }

    fn read_rect(&mut self) -> Result<Rect> {
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;
        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;

        let (line_style, line_width) = self.read_line_styles()?;
        let (fill_style, hatch_style) = self.read_fill_styles()?;

        Ok(Rect {
            x1,
            y1,
            x2,
            y2,
            line_style: Some(line_style),
            line_width: Some(line_width),
            fill_style: Some(fill_style),
            hatch_style: Some(hatch_style),
        })
    }

    fn read_line(&mut self) -> Result<Line> {
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;
        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;

        let (line_style, line_width) = self.read_line_styles()?;

        Ok(Line {
            x1,
            y1,
            x2,
            y2,
            line_style: Some(line_style),
            line_width: Some(line_width),
        })
    }

    fn read_arc(&mut self) -> Result<Arc> {
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;
        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;

        let start_x = self.ds.read_i32()?;
        let start_y = self.ds.read_i32()?;
        let end_x = self.ds.read_i32()?;
        let end_y = self.ds.read_i32()?;

        let (line_style, line_width) = self.read_line_styles()?;

        Ok(Arc {
            x1,
            y1,
            x2,
            y2,
            start_x,
            start_y,
            end_x,
            end_y,
            line_style: Some(line_style),
            line_width: Some(line_width),
        })
    }

    fn read_ellipse(&mut self) -> Result<Ellipse> {
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;
        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;

        let (line_style, line_width) = self.read_line_styles()?;
        let (fill_style, hatch_style) = self.read_fill_styles()?;

        Ok(Ellipse {
            x1,
            y1,
            x2,
            y2,
            line_style: Some(line_style),
            line_width: Some(line_width),
            fill_style: Some(fill_style),
            hatch_style: Some(hatch_style),
        })
    }

    fn read_points(&mut self, count: u16) -> Result<Vec<Point>> {
        let mut points = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let x = self.ds.read_i16()?;
            let y = self.ds.read_i16()?;
            points.push(Point::new(x, y));
        }
        Ok(points)
    }

    fn read_polygon(&mut self) -> Result<Polygon> {
        let (line_style, line_width) = self.read_line_styles()?;
        let (fill_style, hatch_style) = self.read_fill_styles()?;

        let count = self.ds.read_u16()?;
        let points = self.read_points(count)?;

        Ok(Polygon {
            line_style: Some(line_style),
            line_width: Some(line_width),
            fill_style: Some(fill_style),
            hatch_style: Some(hatch_style),
            points,
        })
    }

    fn read_polyline(&mut self) -> Result<Polyline> {
        let (line_style, line_width) = self.read_line_styles()?;

        let count = self.ds.read_u16()?;
        if count < 2 {
            return Err(OlbError::InvariantViolated {
                what: format!("polyline with {count} point(s)"),
                offset: self.ds.current_offset(),
            });
        }
        let points = self.read_points(count)?;

        Ok(Polyline {
            line_style: Some(line_style),
            line_width: Some(line_width),
            points,
        })
    }

    fn read_bezier(&mut self) -> Result<Bezier> {
        let (line_style, line_width) = self.read_line_styles()?;

        let count = self.ds.read_u16()?;
        // 4 points for the first cubic segment, 3 for each further one.
        if count < 4 || (count - 4) % 3 != 0 {
            return Err(OlbError::InvariantViolated {
                what: format!("bezier with {count} point(s)"),
                offset: self.ds.current_offset(),
            });
        }
        let points = self.read_points(count)?;

        Ok(Bezier {
            line_style: Some(line_style),
            line_width: Some(line_width),
            points,
        })
    }

    fn read_bitmap(&mut self) -> Result<Bitmap> {
        let loc_x = self.ds.read_i32()?;
        let loc_y = self.ds.read_i32()?;

        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;

        let data_size = self.ds.read_u32()?;
        let data = self.ds.read_raw(data_size as usize)?;

        Ok(Bitmap {
            loc_x,
            loc_y,
            x1,
            y1,
            x2,
            y2,
            data,
        })
    }

    fn read_comment_text(&mut self) -> Result<CommentText> {
        let loc_x = self.ds.read_i32()?;
        let loc_y = self.ds.read_i32()?;

        let x2 = self.ds.read_i32()?;
        let y2 = self.ds.read_i32()?;
        let x1 = self.ds.read_i32()?;
        let y1 = self.ds.read_i32()?;

        let text_font_idx = self.ds.read_u16()?;
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

        let text = self.ds.read_string_zero_terminated()?;

        Ok(CommentText {
            loc_x,
            loc_y,
            x1,
            y1,
            x2,
            y2,
            text_font_idx,
            text,
        })
    }

    /// Named primitive group with its own preamble framing and a fixed
    /// twelve-byte tail.
    pub(super) fn read_symbol_vector(&mut self) -> Result<SymbolVector> {
        prefix::discard_until_preamble(&mut self.ds)?;
        prefix::read_preamble(&mut self.ds, true)?;

        let loc_x = self.ds.read_i16()?;
        let loc_y = self.ds.read_i16()?;

        let repetition = self.ds.read_u16()?;

        let mut primitives = Vec::with_capacity(repetition as usize);
        for i in 0..repetition {
            if i > 0 {
                prefix::read_preamble(&mut self.ds, true)?;
            }

            let kind = prefix::read_prefix_primitive(&mut self.ds)?;
            primitives.push(self.read_primitive(kind)?);
        }

        prefix::read_preamble(&mut self.ds, true)?;
        let name = self.ds.read_string_zero_terminated()?;

        self.ds.assume_bytes(
            &[0x00, 0x00, 0x00, 0x00, 0x32, 0x00, 0x32, 0x00, 0x00, 0x00, 0x02, 0x00],
            "readSymbolVector - 2",
        )?;

        Ok(SymbolVector {
            loc_x,
            loc_y,
            name,
            primitives,
        })
    }

    /// Named bag of primitives with generation-dependent list framing.
    pub fn parse_geometry_specification(&mut self) -> Result<GeometrySpecification> {
        let name = self.ds.read_string_zero_terminated()?;

        self.ds.assume_bytes(&[0x00, 0x00, 0x00], "parseGeometrySpecification - 0")?;
        self.ds.assume_bytes(&[0x30], "parseGeometrySpecification - 1")?;
        self.ds.assume_bytes(&[0x00, 0x00, 0x00], "parseGeometrySpecification - 2")?;

        let geometry_count = self.ds.read_u16()?;
        trace!("geometryCount = {geometry_count}");

        let mut spec = GeometrySpecification {
            name,
            ..Default::default()
        };

        for i in 0..geometry_count {
            if i > 0 {
                if self.version == FileFormatVersion::B {
                    let type_prefix = prefix::read_type_prefix(&mut self.ds)?;
                    self.byte_offset = type_prefix.byte_offset;
                }

                if self.version >= FileFormatVersion::B {
                    prefix::read_preamble(&mut self.ds, true)?;
                }
            }

            let kind = prefix::read_prefix_primitive(&mut self.ds)?;
            let primitive = self.read_primitive(kind)?;
            spec.push(primitive);

            if self.version == FileFormatVersion::A {
                self.ds.print_unknown(8, "parseGeometrySpecification - 3.5")?;
            }
        }

        Ok(spec)
    }
}
