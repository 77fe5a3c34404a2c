//! 5x7 ID text font.
//!
//! Glyphs are stored column-major: one byte per column, bit `n` set means the pixel on font scan
//! line `n` (0 = top) is lit. The shapes follow the lettering of the factory PT-430b EPROM.

use crate::layout::{CHAR_WIDTH, NARROW_CHAR_WIDTH, TEXT_BITMAP_HEIGHT};

const GLYPH_COUNT: usize = 39;

#[rustfmt::skip]
static FONT_5X7: [[u8; CHAR_WIDTH]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x01, 0x01], // F
    [0x3E, 0x41, 0x41, 0x51, 0x32], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x04, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x26, 0x49, 0x49, 0x49, 0x32], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x7F, 0x20, 0x18, 0x20, 0x7F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x03, 0x04, 0x78, 0x04, 0x03], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0 (slashed)
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
];

/// One 5x7 character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    columns: &'static [u8; CHAR_WIDTH],
    narrow: bool,
}

impl Glyph {
    /// Whether the pixel at (`column`, `line`) is lit. Out-of-range coordinates are unlit.
    pub fn pixel(&self, column: usize, line: usize) -> bool {
        column < CHAR_WIDTH
            && line < TEXT_BITMAP_HEIGHT
            && (self.columns[column] >> line) & 1 != 0
    }

    /// `1` and `I` are set one pixel narrower than the other characters.
    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    /// Number of columns drawn for this glyph.
    pub fn width(&self) -> usize {
        if self.narrow {
            NARROW_CHAR_WIDTH
        } else {
            CHAR_WIDTH
        }
    }
}

fn glyph_index(ch: char) -> Option<usize> {
    match ch.to_ascii_uppercase() {
        ' ' => Some(0),
        c @ 'A'..='Z' => Some(c as usize - 'A' as usize + 1),
        c @ '0'..='9' => Some(c as usize - '0' as usize + 27),
        '-' => Some(37),
        ':' => Some(38),
        _ => None,
    }
}

/// Look up the glyph for `ch`. Returns `None` for characters outside the font.
///
/// Lowercase letters share the uppercase bitmaps, but only `1` and uppercase `I` are set narrow;
/// `i` keeps the full cell.
pub fn glyph(ch: char) -> Option<Glyph> {
    let index = glyph_index(ch)?;
    Some(Glyph {
        columns: &FONT_5X7[index],
        narrow: matches!(ch, '1' | 'I'),
    })
}
