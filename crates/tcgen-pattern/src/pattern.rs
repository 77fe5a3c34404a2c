use std::fmt;
use std::ops::Range;

use crate::color::Color;
use crate::layout::{
    BAR_WIDTH, INITIAL_OFFSET, LINE_16_OFFSET, MAGENTA_BAR, NUM_BARS, PATTERN_SIZE,
    PIXELS_PER_LINE, PULSE_OFFSET, TEXT_OFFSET, WHITE_BAR,
};

/// Bar order across the line, left to right.
///
/// The PT-430b starts its line with the black bar (the "last" bar of a standard EBU sequence);
/// the factory EPROM does the same.
const BAR_ORDER: [Color; NUM_BARS] = [
    Color::Black,
    Color::White,
    Color::Yellow,
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Generates one colour per pixel position of a line.
pub type PixelFn = fn(usize) -> Color;

/// Colour bar pattern: eight 16-pixel bars.
pub fn color_bar(pos: usize) -> Color {
    BAR_ORDER[(pos / BAR_WIDTH) % NUM_BARS]
}

/// Pulse & bar pattern: a single white pixel in the middle of the magenta bar position plus a
/// full-width white bar at the red bar position, black elsewhere.
pub fn pulse_and_bar(pos: usize) -> Color {
    const PULSE: usize = MAGENTA_BAR * BAR_WIDTH + PULSE_OFFSET;
    const BAR: Range<usize> = WHITE_BAR * BAR_WIDTH..(WHITE_BAR + 1) * BAR_WIDTH;

    if pos == PULSE || BAR.contains(&pos) {
        Color::White
    } else {
        Color::Black
    }
}

fn solid_red(_pos: usize) -> Color {
    Color::Red
}

/// The four patterns selectable on the front panel, in EPROM address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFamily {
    /// A11=0, A12=0.
    ColorBars,
    /// A11=1, A12=0.
    SplitFieldRed,
    /// A11=0, A12=1.
    PulseAndBar,
    /// A11=1, A12=1. Unused by the panel; left black.
    Black,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 4] = [
        PatternFamily::ColorBars,
        PatternFamily::SplitFieldRed,
        PatternFamily::PulseAndBar,
        PatternFamily::Black,
    ];

    pub fn index(self) -> usize {
        match self {
            PatternFamily::ColorBars => 0,
            PatternFamily::SplitFieldRed => 1,
            PatternFamily::PulseAndBar => 2,
            PatternFamily::Black => 3,
        }
    }

    /// First EPROM address of the pattern block.
    pub fn base(self) -> usize {
        self.index() * PATTERN_SIZE
    }

    /// Address range of the whole 2 KiB block.
    pub fn block(self) -> Range<usize> {
        self.base()..self.base() + PATTERN_SIZE
    }

    pub fn name(self) -> &'static str {
        match self {
            PatternFamily::ColorBars => "Color Bars",
            PatternFamily::SplitFieldRed => "Split Field Red",
            PatternFamily::PulseAndBar => "Pulse & Bar",
            PatternFamily::Black => "Color Black",
        }
    }

    /// State of the (A11, A12) select lines for this block.
    pub fn select_lines(self) -> (u8, u8) {
        let base = self.base();
        (((base >> 11) & 1) as u8, ((base >> 12) & 1) as u8)
    }

    /// Pattern behind the initial line and the ID text area.
    ///
    /// `None` means the block is never written and keeps the black fill of the image.
    pub fn background(self) -> Option<PixelFn> {
        match self {
            PatternFamily::ColorBars | PatternFamily::SplitFieldRed | PatternFamily::PulseAndBar => {
                Some(color_bar)
            }
            PatternFamily::Black => None,
        }
    }

    /// Pattern of the line-16 region. `None` leaves the region black.
    pub fn line16(self) -> Option<PixelFn> {
        match self {
            PatternFamily::ColorBars => Some(color_bar),
            PatternFamily::SplitFieldRed => Some(solid_red),
            PatternFamily::PulseAndBar => Some(pulse_and_bar),
            PatternFamily::Black => None,
        }
    }

    /// Human readable description of what a region of this block holds.
    pub fn describe(self, region: Region) -> &'static str {
        match (self, region) {
            (PatternFamily::Black, Region::Main) => "Color Black (no ID overlay)",
            (PatternFamily::Black, _) => "Color Black",
            (_, Region::Initial) => "Color Bars",
            (_, Region::Main) => "Color Bars with ID overlay",
            (PatternFamily::ColorBars, Region::Line16) => "Color Bars",
            (PatternFamily::SplitFieldRed, Region::Line16) => "Red",
            (PatternFamily::PulseAndBar, Region::Line16) => "Pulse & Bar",
        }
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern {} - {}", self.index() + 1, self.name())
    }
}

/// Sub-regions of a pattern block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Initial,
    Main,
    Line16,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Initial, Region::Main, Region::Line16];

    /// Offsets relative to the start of the pattern block.
    pub fn offsets(self) -> Range<usize> {
        match self {
            Region::Initial => INITIAL_OFFSET..INITIAL_OFFSET + PIXELS_PER_LINE,
            Region::Main => TEXT_OFFSET..LINE_16_OFFSET,
            Region::Line16 => LINE_16_OFFSET..PATTERN_SIZE,
        }
    }

    /// Absolute EPROM address range of this region within `family`'s block.
    pub fn addresses(self, family: PatternFamily) -> Range<usize> {
        let offsets = self.offsets();
        family.base() + offsets.start..family.base() + offsets.end
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Initial => "Initial Pattern",
            Region::Main => "Main Pattern",
            Region::Line16 => "Line 16",
        }
    }
}
