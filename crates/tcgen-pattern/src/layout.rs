//! Address map and geometry of the PT-430b pattern EPROM.
//!
//! Each pattern occupies a 2 KiB block selected by A11/A12. Within a block:
//!
//! ```text
//! 0x000-0x07F  initial line (lines 1-140 of the field repeat it)
//! 0x080-0x77F  ID text area: 7 font scan lines x (even, odd) field x 128 pixels
//! 0x780-0x7FF  "line 16" pattern shown until vertical sync resets the counter
//! ```

/// 27C64: 8 KiB.
pub const EPROM_SIZE: usize = 0x2000;

/// Bytes per pattern block.
pub const PATTERN_SIZE: usize = 0x800;

/// A0-A6 count pixels.
pub const PIXELS_PER_LINE: usize = 128;

pub const INITIAL_OFFSET: usize = 0x000;
pub const TEXT_OFFSET: usize = 0x080;
pub const LINE_16_OFFSET: usize = 0x780;

/// Distance between consecutive font scan lines in the text area.
pub const TEXT_LINE_STRIDE: usize = 0x100;
/// Distance between the even and odd field copies of one font scan line.
pub const FIELD_STRIDE: usize = 0x080;
pub const FIELDS: usize = 2;

// --- Colour bars ---

pub const BAR_WIDTH: usize = 16;
pub const NUM_BARS: usize = 8;
/// The pulse sits this many pixels into the magenta bar.
pub const PULSE_OFFSET: usize = 8;
pub const MAGENTA_BAR: usize = 4;
/// Bar index replaced by the solid white bar of the pulse & bar pattern.
pub const WHITE_BAR: usize = 6;

// --- ID text ---

pub const CHAR_WIDTH: usize = 5;
/// Width of `1` and `I`.
pub const NARROW_CHAR_WIDTH: usize = 4;
pub const CHAR_GAP: usize = 2;
pub const CHAR_ADVANCE: usize = CHAR_WIDTH + CHAR_GAP;
pub const TEXT_BITMAP_HEIGHT: usize = 7;
pub const TEXT_BITMAP_WIDTH: usize = PIXELS_PER_LINE;
/// One bar width each side keeps the ID readable between the white bar (left) and blue (right).
pub const TEXT_KEEPOUT: usize = BAR_WIDTH;
pub const MAX_TEXT_LEN: usize = 14;

const _: () = assert!(LINE_16_OFFSET == TEXT_OFFSET + TEXT_BITMAP_HEIGHT * TEXT_LINE_STRIDE);
const _: () = assert!(EPROM_SIZE == 4 * PATTERN_SIZE);
