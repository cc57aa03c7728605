//! Comment text primitive.

/// A free-standing text block.
///
/// `text` is the literal content; unlike the XML export there is no HTML
/// escaping in the binary form.  `text_font_idx` indexes the containing
/// library's text-font table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentText {
    pub loc_x: i32,
    pub loc_y: i32,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub text_font_idx: u16,
    pub text: String,
}
