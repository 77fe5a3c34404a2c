//! ID text validation and rendering.

use tracing::warn;

use crate::error::{PatternError, Result};
use crate::font::{glyph, Glyph};
use crate::layout::{
    CHAR_ADVANCE, CHAR_GAP, MAX_TEXT_LEN, PIXELS_PER_LINE, TEXT_BITMAP_HEIGHT, TEXT_BITMAP_WIDTH,
    TEXT_KEEPOUT,
};

/// Pixels of the ID text, one row per font scan line.
#[derive(Clone, PartialEq, Eq)]
pub struct TextOverlayMask {
    rows: [[bool; TEXT_BITMAP_WIDTH]; TEXT_BITMAP_HEIGHT],
}

impl TextOverlayMask {
    pub const WIDTH: usize = TEXT_BITMAP_WIDTH;
    pub const HEIGHT: usize = TEXT_BITMAP_HEIGHT;

    pub fn new() -> Self {
        Self {
            rows: [[false; TEXT_BITMAP_WIDTH]; TEXT_BITMAP_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(false);
        }
    }

    /// Whether (`line`, `pixel`) is text. Out-of-range coordinates are never set.
    pub fn is_set(&self, line: usize, pixel: usize) -> bool {
        self.rows
            .get(line)
            .and_then(|row| row.get(pixel))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; TEXT_BITMAP_WIDTH]> {
        self.rows.iter()
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().flatten().all(|&p| !p)
    }

    pub fn count_set(&self) -> usize {
        self.rows.iter().flatten().filter(|&&p| p).count()
    }

    /// Set a pixel given a signed column; anything left of 0 or past the line is dropped.
    fn plot(&mut self, line: usize, x: i32) {
        let Ok(x) = usize::try_from(x) else {
            return;
        };
        if let Some(px) = self.rows[line].get_mut(x) {
            *px = true;
        }
    }
}

impl Default for TextOverlayMask {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextOverlayMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TextOverlayMask {{")?;
        for row in &self.rows {
            let line: String = row.iter().map(|&p| if p { 'X' } else { '.' }).collect();
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

/// Characters accepted in ID text: letters (either case), digits, space, `-` and `:`.
pub fn is_valid_char(c: char) -> bool {
    c == ' ' || c == '-' || c == ':' || c.is_ascii_alphanumeric()
}

/// Check user supplied ID text before rendering.
pub fn validate_text(text: &str) -> Result<()> {
    let len = text.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(PatternError::TextTooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    if let Some((position, ch)) = text.chars().enumerate().find(|&(_, c)| !is_valid_char(c)) {
        return Err(PatternError::UnsupportedChar { ch, position });
    }
    Ok(())
}

/// First [`MAX_TEXT_LEN`] characters of `text`.
pub fn truncate_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

struct Placement {
    x: i32,
    glyph: Glyph,
}

/// Horizontal layout of the text: where each drawn glyph starts.
///
/// Glyphs sit on a 7 pixel grid (5 pixel cell + 2 pixel gap) centred between the keep-out bars.
/// `1` and uppercase `I` are drawn 4 pixels wide and pull themselves and everything after them one pixel
/// left, cumulatively, matching the spacing of the factory EPROM lettering.
fn layout(text: &str) -> Vec<Placement> {
    let chars: Vec<char> = text.chars().collect();
    let glyphs: Vec<Option<Glyph>> = chars.iter().map(|&c| glyph(c)).collect();

    let drawn = chars
        .iter()
        .zip(&glyphs)
        .filter(|&(&c, g)| c != ' ' && g.is_some())
        .count() as i32;
    let narrow = glyphs.iter().flatten().filter(|g| g.is_narrow()).count() as i32;

    let advance = CHAR_ADVANCE as i32;
    let width = drawn * advance - CHAR_GAP as i32 - narrow;
    let usable = (PIXELS_PER_LINE - 2 * TEXT_KEEPOUT) as i32;
    let start = TEXT_KEEPOUT as i32 + (usable - width) / 2 + 1;

    let mut placements = Vec::with_capacity(chars.len());
    let mut cursor = start;
    let mut shift = 0;
    for (&c, g) in chars.iter().zip(glyphs) {
        if c == ' ' {
            cursor += advance;
            continue;
        }
        let Some(glyph) = g else {
            continue;
        };
        if glyph.is_narrow() {
            shift += 1;
        }
        placements.push(Placement {
            x: cursor - shift,
            glyph,
        });
        cursor += advance;
    }
    placements
}

/// Render `into` from scratch. Only the first [`MAX_TEXT_LEN`] characters are used.
pub fn render_text_into(text: &str, into: &mut TextOverlayMask) {
    into.clear();

    let kept = truncate_text(text);
    if kept.len() != text.len() {
        warn!(
            max = MAX_TEXT_LEN,
            "ID text truncated to {MAX_TEXT_LEN} characters: {kept:?}"
        );
    }

    let placements = layout(kept);
    for line in 0..TEXT_BITMAP_HEIGHT {
        for p in &placements {
            for column in 0..p.glyph.width() {
                if p.glyph.pixel(column, line) {
                    into.plot(line, p.x + column as i32);
                }
            }
        }
    }
}

/// Render ID text into a fresh 128x7 mask.
pub fn render_text(text: &str) -> TextOverlayMask {
    let mut mask = TextOverlayMask::new();
    render_text_into(text, &mut mask);
    mask
}
