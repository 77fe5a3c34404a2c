#![forbid(unsafe_code)]

//! Test-card EPROM image generation for the PRACTEL PT-430b colour bar generator.
//!
//! The PT-430b reads its video from a 27C64 (8 KiB) EPROM. Address lines A0-A6 count the 128
//! pixels of a line, A7-A10 select the scan line within a pattern and A11/A12 are driven by the
//! front panel pattern switch. This crate builds that image deterministically:
//!
//! - [`font`]: the fixed 5x7 glyph table.
//! - [`text`]: validation and rendering of the ID text into a [`TextOverlayMask`].
//! - [`pattern`]: per-pixel colour generators and the four [`PatternFamily`] blocks.
//! - [`image`]: the [`EpromImage`] composer.
//!
//! Serialization (Intel HEX, raw binary) lives outside this crate.

pub mod color;
pub mod error;
pub mod font;
pub mod image;
pub mod layout;
pub mod pattern;
pub mod text;

pub use color::Color;
pub use error::{PatternError, Result};
pub use font::{glyph, Glyph};
pub use image::{compose, EpromImage};
pub use layout::{EPROM_SIZE, MAX_TEXT_LEN, PIXELS_PER_LINE, TEXT_BITMAP_HEIGHT};
pub use pattern::{color_bar, pulse_and_bar, PatternFamily, Region};
pub use text::{is_valid_char, render_text, truncate_text, validate_text, TextOverlayMask};
