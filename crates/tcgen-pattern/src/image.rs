use tracing::debug;

use crate::color::Color;
use crate::error::{PatternError, Result};
use crate::layout::{
    EPROM_SIZE, FIELDS, FIELD_STRIDE, PIXELS_PER_LINE, TEXT_BITMAP_HEIGHT, TEXT_LINE_STRIDE,
    TEXT_OFFSET,
};
use crate::pattern::{PatternFamily, PixelFn, Region};
use crate::text::{render_text, TextOverlayMask};

/// The complete 8 KiB EPROM contents.
#[derive(Clone, PartialEq, Eq)]
pub struct EpromImage {
    bytes: Vec<u8>,
}

impl EpromImage {
    /// An image with every byte black.
    ///
    /// The buffer is reserved fallibly so an allocation failure surfaces as an error before any
    /// byte is written.
    pub fn blank() -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(EPROM_SIZE)
            .map_err(|_| PatternError::Allocation { bytes: EPROM_SIZE })?;
        bytes.resize(EPROM_SIZE, Color::Black.value());
        Ok(Self { bytes })
    }

    /// Lay out all four pattern blocks with `mask` overlaid on the text areas.
    pub fn with_overlay(mask: &TextOverlayMask) -> Result<Self> {
        let mut image = Self::blank()?;
        for family in PatternFamily::ALL {
            image.paint(family, mask);
        }
        Ok(image)
    }

    fn paint(&mut self, family: PatternFamily, mask: &TextOverlayMask) {
        let block = &mut self.bytes[family.block()];

        // The black block is never written; it keeps the fill from `blank`.
        let Some(background) = family.background() else {
            debug!(base = family.base(), "{family}: left at black fill");
            return;
        };
        debug!(base = family.base(), "{family}: painting");

        fill_line(&mut block[Region::Initial.offsets()], background);

        // Each font scan line is stored twice: even field, then odd field.
        for line in 0..TEXT_BITMAP_HEIGHT {
            for field in 0..FIELDS {
                let start = TEXT_OFFSET + line * TEXT_LINE_STRIDE + field * FIELD_STRIDE;
                let row = &mut block[start..start + PIXELS_PER_LINE];
                fill_line(row, background);
                for (pixel, byte) in row.iter_mut().enumerate() {
                    if mask.is_set(line, pixel) {
                        *byte = Color::White.value();
                    }
                }
            }
        }

        if let Some(line16) = family.line16() {
            fill_line(&mut block[Region::Line16.offsets()], line16);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes of one 2 KiB pattern block.
    pub fn block(&self, family: PatternFamily) -> &[u8] {
        &self.bytes[family.block()]
    }

    pub fn region(&self, family: PatternFamily, region: Region) -> &[u8] {
        &self.bytes[region.addresses(family)]
    }

    /// One copy of font scan line `line` (0..7) of the text area; `field` 0 is even, 1 is odd.
    pub fn text_line(&self, family: PatternFamily, line: usize, field: usize) -> &[u8] {
        let start = family.base() + TEXT_OFFSET + line * TEXT_LINE_STRIDE + field * FIELD_STRIDE;
        &self.bytes[start..start + PIXELS_PER_LINE]
    }
}

impl AsRef<[u8]> for EpromImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for EpromImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpromImage")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Write one 128 pixel line from a generator.
fn fill_line(row: &mut [u8], pixel: PixelFn) {
    for (pos, byte) in row.iter_mut().enumerate() {
        *byte = pixel(pos).value();
    }
}

/// Render `text` and build the EPROM image around it.
///
/// Returns the image together with the mask used for the overlay so callers can dump it.
pub fn compose(text: &str) -> Result<(EpromImage, TextOverlayMask)> {
    let mask = render_text(text);
    let image = EpromImage::with_overlay(&mask)?;
    debug!(
        text_pixels = mask.count_set(),
        "composed {} byte EPROM image",
        image.len()
    );
    Ok((image, mask))
}
