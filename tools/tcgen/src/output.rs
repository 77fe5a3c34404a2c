//! Output file naming and the text formats written next to the EPROM image.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tcgen_pattern::{EpromImage, PatternFamily, Region, TextOverlayMask, MAX_TEXT_LEN};
use time::macros::format_description;
use time::OffsetDateTime;

const DUMP_BYTES_PER_LINE: usize = 16;
const LABEL_TITLE: &str = "PT-430 COLORBAR-GEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Hex,
    Bin,
    Dump,
    CharBitmap,
    Label,
}

impl OutputKind {
    fn file_suffix(self) -> &'static str {
        match self {
            OutputKind::Hex => ".hex",
            OutputKind::Bin => ".bin",
            OutputKind::Dump => ".dump",
            OutputKind::CharBitmap => "_id.txt",
            OutputKind::Label => "_eprom_label.html",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputKind::Hex => "Intel HEX file",
            OutputKind::Bin => "binary file",
            OutputKind::Dump => "raw hex dump",
            OutputKind::CharBitmap => "character bitmap",
            OutputKind::Label => "EPROM label",
        })
    }
}

/// Paths of every file derived from the `--output` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub hex: PathBuf,
    pub bin: PathBuf,
    pub dump: PathBuf,
    pub char_bitmap: PathBuf,
    pub label: PathBuf,
}

impl OutputPaths {
    /// `dir/name.ext` becomes `dir/name.hex`, `dir/name.bin`, `dir/name.dump`, `dir/name_id.txt`
    /// and `dir/name_eprom_label.html`. A bare file name stays in the current directory.
    pub fn from_output(output: &Path) -> Result<Self> {
        let stem = output
            .file_stem()
            .ok_or_else(|| anyhow!("output path has no file name: {}", output.display()))?;
        let dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let path_for = |kind: OutputKind| {
            let mut name = OsString::from(stem);
            name.push(kind.file_suffix());
            dir.join(name)
        };

        Ok(Self {
            hex: path_for(OutputKind::Hex),
            bin: path_for(OutputKind::Bin),
            dump: path_for(OutputKind::Dump),
            char_bitmap: path_for(OutputKind::CharBitmap),
            label: path_for(OutputKind::Label),
        })
    }
}

/// Write `bytes` to `path` via a temporary file and rename.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp_name = path.file_name().map(OsString::from).unwrap_or_default();
    tmp_name.push(format!(".tmp.{}", std::process::id()));
    let tmp_path = parent.join(tmp_name);
    {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }

    match fs::rename(&tmp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            // Windows refuses to rename over an existing file.
            if cfg!(windows) && path.exists() {
                fs::remove_file(path)?;
                fs::rename(&tmp_path, path)
            } else {
                let _ = fs::remove_file(&tmp_path);
                Err(err)
            }
        }
    }
}

fn region_starting_at(addr: usize) -> Option<(PatternFamily, Region)> {
    PatternFamily::ALL.into_iter().find_map(|family| {
        Region::ALL
            .into_iter()
            .find(|region| region.addresses(family).start == addr)
            .map(|region| (family, region))
    })
}

/// Annotated hex dump used to compare against a read-back of a factory EPROM.
pub fn write_dump<W: Write>(image: &EpromImage, mut w: W) -> io::Result<()> {
    let bytes = image.as_bytes();

    writeln!(w, "// PRACTEL PT-430b 27C64-150 buffer dump")?;
    writeln!(w, "// Size: {} bytes (0x{:04X})", bytes.len(), bytes.len())?;
    writeln!(w, "// Format: Raw hex dump, {DUMP_BYTES_PER_LINE} bytes per line")?;
    writeln!(w, "//")?;
    writeln!(w, "// Address Pattern Layout:")?;
    for family in PatternFamily::ALL {
        let block = family.block();
        let (a11, a12) = family.select_lines();
        writeln!(
            w,
            "// 0x{:04X}-0x{:04X}: {family} (A11={a11}, A12={a12})",
            block.start,
            block.end - 1
        )?;
        for region in Region::ALL {
            let addrs = region.addresses(family);
            writeln!(
                w,
                "//   - 0x{:04X}-0x{:04X}: {} = {}",
                addrs.start,
                addrs.end - 1,
                region.name(),
                family.describe(region)
            )?;
        }
        writeln!(w, "//")?;
    }
    writeln!(w, "// Addr   0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F")?;
    writeln!(w, "//-------------------------------------------------------")?;

    for (row, chunk) in bytes.chunks(DUMP_BYTES_PER_LINE).enumerate() {
        let addr = row * DUMP_BYTES_PER_LINE;
        if let Some((family, region)) = region_starting_at(addr) {
            let addrs = region.addresses(family);
            writeln!(w)?;
            writeln!(
                w,
                "// (0x{:04X}-0x{:04X}) {family} {} [{}]",
                addrs.start,
                addrs.end - 1,
                region.name(),
                family.describe(region)
            )?;
            writeln!(w)?;
        }

        write!(w, "    {addr:04X}: ")?;
        for b in chunk {
            write!(w, "{b:02X} ")?;
        }
        write!(w, "  |")?;
        for &b in chunk {
            let c = if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            };
            write!(w, "{c}")?;
        }
        writeln!(w, "|")?;
    }
    w.flush()
}

/// Picture of the rendered ID text: `X` for text pixels, `-` for background.
pub fn write_char_bitmap<W: Write>(mask: &TextOverlayMask, text: &str, mut w: W) -> io::Result<()> {
    writeln!(w, "Character bitmap for text: \"{text}\"")?;
    writeln!(
        w,
        "Dimensions: {} x {}",
        TextOverlayMask::WIDTH,
        TextOverlayMask::HEIGHT
    )?;
    writeln!(
        w,
        "'X' represents a white id text pixel, '-' represents pattern background"
    )?;
    writeln!(w)?;

    write!(w, "Pixels : ")?;
    for pixel in 0..TextOverlayMask::WIDTH {
        write!(w, "{} ", if pixel % 16 == 15 { '|' } else { '-' })?;
    }
    writeln!(w)?;
    writeln!(w)?;

    for (line, row) in mask.rows().enumerate() {
        write!(w, "Line {:2}: ", line + 1)?;
        for &set in row {
            write!(w, "{}", if set { "X " } else { "- " })?;
        }
        writeln!(w)?;
    }
    w.flush()
}

/// `text` centred in a [`MAX_TEXT_LEN`] character field.
fn centred_label_text(text: &str) -> String {
    let len = text.chars().count().min(MAX_TEXT_LEN);
    let padding = (MAX_TEXT_LEN - len) / 2;
    let mut out: String = " ".repeat(padding);
    out.extend(text.chars().take(MAX_TEXT_LEN - padding));
    while out.chars().count() < MAX_TEXT_LEN {
        out.push(' ');
    }
    out
}

/// Small HTML label to stick on the programmed EPROM window.
pub fn write_label<W: Write>(text: &str, date: &str, mut w: W) -> io::Result<()> {
    let id = centred_label_text(text);

    writeln!(w, "<html>")?;
    writeln!(w, "<head>")?;
    writeln!(w, "<style>")?;
    writeln!(
        w,
        "body {{ font-family: Helvetica, sans-serif; font-size: 4pt; text-align: center;}}"
    )?;
    writeln!(
        w,
        ".label {{ border: 1px solid black; padding: 2px; text-align: center; display: inline-block; }}"
    )?;
    writeln!(w, "</style>")?;
    writeln!(w, "</head>")?;
    writeln!(w, "<body>")?;
    writeln!(w, "<div class=\"label\">")?;
    writeln!(w, "<b>{LABEL_TITLE}</b><br>")?;
    writeln!(w, "ID: <b>{id}</b><br>")?;
    writeln!(w, "Date: {date}")?;
    writeln!(w, "</div>")?;
    writeln!(w, "</body>")?;
    writeln!(w, "</html>")?;
    w.flush()
}

/// Today's date as `YYYY-MM-DD`, local time when the offset is known, UTC otherwise.
pub fn today() -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[year]-[month]-[day]"))
        .context("format label date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcgen_pattern::{compose, render_text};

    #[test]
    fn paths_replace_extension_and_keep_directory() {
        let paths = OutputPaths::from_output(Path::new("out/pattern.hex")).unwrap();
        assert_eq!(paths.hex, Path::new("out/pattern.hex"));
        assert_eq!(paths.bin, Path::new("out/pattern.bin"));
        assert_eq!(paths.dump, Path::new("out/pattern.dump"));
        assert_eq!(paths.char_bitmap, Path::new("out/pattern_id.txt"));
        assert_eq!(paths.label, Path::new("out/pattern_eprom_label.html"));
    }

    #[test]
    fn bare_file_name_goes_to_current_directory() {
        let paths = OutputPaths::from_output(Path::new("pattern")).unwrap();
        assert_eq!(paths.hex, Path::new("./pattern.hex"));
    }

    #[test]
    fn dotted_directory_is_not_treated_as_extension() {
        let paths = OutputPaths::from_output(Path::new("build.v2/pattern")).unwrap();
        assert_eq!(paths.bin, Path::new("build.v2/pattern.bin"));
    }

    #[test]
    fn dump_layout() {
        let (image, _) = compose("TEST").unwrap();
        let mut out = Vec::new();
        write_dump(&image, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("// PRACTEL PT-430b 27C64-150 buffer dump\n// Size: 8192 bytes (0x2000)\n"));
        assert!(text.contains("// 0x0800-0x0FFF: Pattern 2 - Split Field Red (A11=1, A12=0)\n"));
        assert!(text.contains("//   - 0x0F80-0x0FFF: Line 16 = Red\n"));
        assert!(text.contains("\n// (0x1780-0x17FF) Pattern 3 - Pulse & Bar Line 16 [Pulse & Bar]\n\n"));
        assert!(text.contains(
            "    0000: F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0 F0   |................|\n"
        ));
        assert!(text.contains("    1FF0: "));

        let data_lines = text.lines().filter(|l| l.starts_with("    ")).count();
        assert_eq!(data_lines, 8192 / 16);
        let banners = text.lines().filter(|l| l.starts_with("// (0x")).count();
        assert_eq!(banners, 12);
    }

    #[test]
    fn char_bitmap_rows() {
        let mask = render_text("H");
        let mut out = Vec::new();
        write_char_bitmap(&mask, "H", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Character bitmap for text: \"H\"");
        assert_eq!(lines[1], "Dimensions: 128 x 7");
        assert!(lines[4].starts_with("Pixels : - - "));
        assert_eq!(lines[4].matches('|').count(), 8);

        let rows: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with("Line")).collect();
        assert_eq!(rows.len(), 7);
        assert!(rows[0].starts_with("Line  1: "));
        // Line 1 of H lights columns 62 and 66.
        let cells: Vec<&str> = rows[0]["Line  1: ".len()..].split_whitespace().collect();
        assert_eq!(cells.len(), 128);
        let lit: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == "X")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lit, [62, 66]);
    }

    #[test]
    fn label_centres_id() {
        assert_eq!(centred_label_text("VK3DG"), "    VK3DG     ");
        assert_eq!(centred_label_text("ABCDEFGHIJKLMN"), "ABCDEFGHIJKLMN");
        assert_eq!(centred_label_text(""), " ".repeat(14));

        let mut out = Vec::new();
        write_label("VK3DG", "2025-05-16", &mut out).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.contains("<b>PT-430 COLORBAR-GEN</b><br>\n"));
        assert!(html.contains("ID: <b>    VK3DG     </b><br>\n"));
        assert!(html.contains("Date: 2025-05-16\n"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn today_is_iso_date() {
        let date = today().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[7..8], "-");
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.bin");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
