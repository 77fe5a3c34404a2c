//! PRACTEL PT-430b EPROM code generator.
//!
//! Takes an ID text, builds the 8 KiB pattern EPROM with `tcgen-pattern` and writes it out as
//! Intel HEX and raw binary, together with a printable EPROM label. Debug mode adds an annotated
//! hex dump and a picture of the rendered ID text for comparing against a factory EPROM.

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tcgen_pattern::{compose, truncate_text, validate_text, MAX_TEXT_LEN};
use tracing::{debug, warn};

use crate::output::{OutputKind, OutputPaths};

/// What to generate.
#[derive(Debug, Clone)]
pub struct GenerateOpts {
    /// ID text as given on the command line (before normalisation).
    pub text: String,
    /// Output file name; its extension is ignored.
    pub output: PathBuf,
    /// Also write the raw dump and ID bitmap files.
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub kind: OutputKind,
    pub path: PathBuf,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// ID text actually rendered.
    pub text: String,
    pub files: Vec<WrittenFile>,
}

/// Undo shell quoting leftovers and map `_` to space, so `-t VK3DG_GEELONG` works unquoted.
pub fn normalize_text(raw: &str) -> String {
    let mut text = raw;
    if text.len() >= 2 {
        for quote in ['"', '\''] {
            if let Some(inner) = text
                .strip_prefix(quote)
                .and_then(|t| t.strip_suffix(quote))
            {
                text = inner;
                break;
            }
        }
    }
    text.replace('_', " ")
}

/// Normalise, truncate and validate ID text from the command line.
pub fn prepare_text(raw: &str) -> Result<String> {
    let text = normalize_text(raw);
    if text.is_empty() {
        bail!("missing ID text");
    }

    let kept = truncate_text(&text);
    if kept.len() != text.len() {
        warn!("text truncated to {MAX_TEXT_LEN} characters: {kept:?}");
    }

    validate_text(kept).with_context(|| format!("invalid ID text {kept:?}"))?;
    Ok(kept.to_string())
}

/// Build the EPROM image and write every output file.
pub fn generate(opts: &GenerateOpts) -> Result<GenerateReport> {
    let text = prepare_text(&opts.text)?;
    let paths = OutputPaths::from_output(&opts.output)?;

    debug!("generating EPROM data for ID text {text:?}");
    let (image, mask) = compose(&text).context("pattern generation failed")?;

    let mut files = Vec::new();
    files.push(write_output(OutputKind::Hex, &paths.hex, |w| {
        tcgen_ihex::write_to(image.as_bytes(), w)
    })?);
    files.push(write_output(OutputKind::Bin, &paths.bin, |w| {
        w.extend_from_slice(image.as_bytes());
        Ok(())
    })?);

    if opts.debug {
        files.push(write_output(OutputKind::Dump, &paths.dump, |w| {
            output::write_dump(&image, w)
        })?);
        files.push(write_output(OutputKind::CharBitmap, &paths.char_bitmap, |w| {
            output::write_char_bitmap(&mask, &text, w)
        })?);
    }

    let date = output::today()?;
    files.push(write_output(OutputKind::Label, &paths.label, |w| {
        output::write_label(&text, &date, w)
    })?);

    Ok(GenerateReport { text, files })
}

fn write_output(
    kind: OutputKind,
    path: &Path,
    render: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
) -> Result<WrittenFile> {
    let mut buf = Vec::new();
    render(&mut buf).with_context(|| format!("render {kind}"))?;
    output::atomic_write(path, &buf)
        .with_context(|| format!("write {kind} {}", path.display()))?;
    debug!(bytes = buf.len(), "wrote {kind}: {}", path.display());

    Ok(WrittenFile {
        kind,
        path: path.to_path_buf(),
        bytes: buf.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_matching_quotes() {
        assert_eq!(normalize_text("\"VK3DG\""), "VK3DG");
        assert_eq!(normalize_text("'VK3DG'"), "VK3DG");
        assert_eq!(normalize_text("\"VK3DG'"), "\"VK3DG'");
        assert_eq!(normalize_text("\""), "\"");
        assert_eq!(normalize_text("\"\""), "");
    }

    #[test]
    fn normalize_maps_underscores_to_spaces() {
        assert_eq!(normalize_text("VK3DG_GEELONG"), "VK3DG GEELONG");
    }

    #[test]
    fn prepare_truncates_then_validates() {
        assert_eq!(
            prepare_text("ABCDEFGHIJKLMNOPQ").unwrap(),
            "ABCDEFGHIJKLMN"
        );
        // Characters past the limit are dropped before validation.
        assert_eq!(prepare_text("ABCDEFGHIJKLMN!").unwrap(), "ABCDEFGHIJKLMN");
    }

    #[test]
    fn prepare_rejects_bad_input() {
        assert!(prepare_text("").is_err());
        assert!(prepare_text("''").is_err());
        let err = prepare_text("AB.C").unwrap_err();
        assert!(format!("{err:#}").contains("position 2"), "{err:#}");
    }
}
