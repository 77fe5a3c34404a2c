use tcgen_pattern::layout::{FIELDS, TEXT_BITMAP_HEIGHT};
use tcgen_pattern::{
    color_bar, compose, Color, EpromImage, PatternFamily, Region, TextOverlayMask, EPROM_SIZE,
    PIXELS_PER_LINE,
};

const BLACK: u8 = Color::Black.value();
const WHITE: u8 = Color::White.value();

fn bar_line() -> Vec<u8> {
    (0..PIXELS_PER_LINE).map(|p| color_bar(p).value()).collect()
}

#[test]
fn image_is_always_8k() {
    for text in ["", " ", "A", "VK3DG GEELONG", "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "::--::"] {
        let (image, _) = compose(text).unwrap();
        assert_eq!(image.len(), EPROM_SIZE, "{text:?}");
        assert_eq!(image.as_bytes().len(), 8192, "{text:?}");
    }
}

#[test]
fn black_block_is_untouched() {
    for text in ["", "88888888888888", "VK3DG GEELONG"] {
        let (image, _) = compose(text).unwrap();
        let block = image.block(PatternFamily::Black);
        assert_eq!(block.len(), 0x800);
        assert!(block.iter().all(|&b| b == BLACK), "{text:?}");
        assert!(image.as_bytes()[0x1800..=0x1FFF].iter().all(|&b| b == BLACK));
    }
}

#[test]
fn empty_text_leaves_pure_patterns() {
    let (image, mask) = compose("").unwrap();
    assert!(mask.is_blank());

    let bars = bar_line();
    for family in [
        PatternFamily::ColorBars,
        PatternFamily::SplitFieldRed,
        PatternFamily::PulseAndBar,
    ] {
        for line in 0..TEXT_BITMAP_HEIGHT {
            for field in 0..FIELDS {
                assert_eq!(
                    image.text_line(family, line, field),
                    &bars[..],
                    "{family} line {line} field {field}"
                );
            }
        }
    }
}

#[test]
fn text_area_is_pattern_or_white_and_fields_match() {
    let (image, mask) = compose("VK3DG GEELONG").unwrap();
    assert!(!mask.is_blank());

    for family in [
        PatternFamily::ColorBars,
        PatternFamily::SplitFieldRed,
        PatternFamily::PulseAndBar,
    ] {
        for line in 0..TEXT_BITMAP_HEIGHT {
            let even = image.text_line(family, line, 0);
            let odd = image.text_line(family, line, 1);
            assert_eq!(even, odd, "{family} line {line}");
            for pixel in 0..PIXELS_PER_LINE {
                let expected = if mask.is_set(line, pixel) {
                    WHITE
                } else {
                    color_bar(pixel).value()
                };
                assert_eq!(even[pixel], expected, "{family} line {line} pixel {pixel}");
            }
        }
    }
}

#[test]
fn blank_mask_matches_empty_text() {
    let image = EpromImage::with_overlay(&TextOverlayMask::new()).unwrap();
    let (composed, _) = compose("").unwrap();
    assert_eq!(image, composed);
}

#[test]
fn red_and_pulse_blocks_differ_only_in_line16() {
    let (image, _) = compose("PT-430").unwrap();
    for region in [Region::Initial, Region::Main] {
        assert_eq!(
            image.region(PatternFamily::ColorBars, region),
            image.region(PatternFamily::SplitFieldRed, region)
        );
        assert_eq!(
            image.region(PatternFamily::ColorBars, region),
            image.region(PatternFamily::PulseAndBar, region)
        );
    }
    assert_ne!(
        image.region(PatternFamily::SplitFieldRed, Region::Line16),
        image.region(PatternFamily::PulseAndBar, Region::Line16)
    );
}

#[test]
fn image_encodes_to_intel_hex() {
    let (image, _) = compose("VK3DG GEELONG").unwrap();
    let hex = tcgen_ihex::encode(image.as_bytes());
    let lines: Vec<&str> = hex.lines().collect();
    assert_eq!(lines.len(), EPROM_SIZE / 16 + 1);
    // First record: the black bar of the color bar line. 0x10 + 16 * 0xF0 = 0xF10 -> 0xF0.
    assert_eq!(lines[0], ":10000000F0F0F0F0F0F0F0F0F0F0F0F0F0F0F0F0F0");
    assert_eq!(lines[lines.len() - 1], ":00000001FF");
    assert!(lines[lines.len() - 2].starts_with(":101FF000"));
}
