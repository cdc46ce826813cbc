//! Source font to web font conversion with mtime-based caching.

use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fontbake_font_woff::convert_to_woff;
use fontbake_font_woff2::convert_to_woff2;

use crate::{
    classify::FontClassification,
    discover::FontSource,
    io::{is_up_to_date, modified, read_font, write_output},
};

/// Web font container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebFormat {
    Woff2,
    Woff,
}

impl WebFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            WebFormat::Woff2 => "woff2",
            WebFormat::Woff => "woff",
        }
    }
}

/// Encodes sfnt data into a web font format.
pub trait FontEncoder: Sync {
    fn encode(&self, format: WebFormat, data: &[u8]) -> Result<Vec<u8>>;
}

/// Encoder backed by the WOFF2 and WOFF crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebFontEncoder;

impl FontEncoder for WebFontEncoder {
    fn encode(&self, format: WebFormat, data: &[u8]) -> Result<Vec<u8>> {
        match format {
            WebFormat::Woff2 => Ok(convert_to_woff2(data)?),
            WebFormat::Woff => Ok(convert_to_woff(data)?),
        }
    }
}

/// Counts of produced, reused and failed outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Output files written.
    pub converted: usize,
    /// Output files already up to date.
    pub skipped: usize,
    /// Source files that could not be converted.
    pub failed: usize,
}

impl AddAssign for ConversionSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.converted += rhs.converted;
        self.skipped += rhs.skipped;
        self.failed += rhs.failed;
    }
}

/// Web fonts available for one source after conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFont {
    pub woff2: PathBuf,
    pub woff: Option<PathBuf>,
}

/// Result of converting one source.
#[derive(Debug)]
pub struct FileOutcome {
    /// `None` when the source could not be converted.
    pub font: Option<ConvertedFont>,
    pub summary: ConversionSummary,
}

/// Converts sources into `<out_dir>/<relative_dir>/<canonical>.<ext>`.
pub struct Converter<'a, E: FontEncoder> {
    out_dir: &'a Path,
    legacy_woff: bool,
    encoder: &'a E,
}

impl<'a, E: FontEncoder> Converter<'a, E> {
    pub fn new(out_dir: &'a Path, legacy_woff: bool, encoder: &'a E) -> Self {
        Self { out_dir, legacy_woff, encoder }
    }

    /// Formats produced for a font. WOFF is legacy-only and never built for
    /// variable fonts.
    pub fn formats(&self, classification: &FontClassification) -> Vec<WebFormat> {
        if self.legacy_woff && !classification.is_variable {
            vec![WebFormat::Woff2, WebFormat::Woff]
        } else {
            vec![WebFormat::Woff2]
        }
    }

    /// Output path for a source in the given format.
    pub fn target_path(
        &self,
        source: &FontSource,
        classification: &FontClassification,
        format: WebFormat,
    ) -> PathBuf {
        self.out_dir
            .join(source.relative_dir())
            .join(format!("{}.{}", classification.canonical_name, format.extension()))
    }

    /// Convert one source, reusing outputs that are newer than it.
    ///
    /// Read and encode failures are logged and reported through the outcome.
    /// Write failures are returned as errors.
    pub fn convert(
        &self,
        source: &FontSource,
        classification: &FontClassification,
    ) -> Result<FileOutcome> {
        let mut summary = ConversionSummary::default();

        let source_mtime = match modified(source.path()) {
            Ok(mtime) => mtime,
            Err(e) => return Ok(Self::failed(source, e, summary)),
        };

        let targets: Vec<(WebFormat, PathBuf)> = self
            .formats(classification)
            .into_iter()
            .map(|format| (format, self.target_path(source, classification, format)))
            .collect();

        let stale: Vec<&(WebFormat, PathBuf)> = targets
            .iter()
            .filter(|(_, target)| {
                let fresh = is_up_to_date(target, source_mtime);
                if fresh {
                    log::debug!("{}: up to date", target.display());
                }
                !fresh
            })
            .collect();
        summary.skipped = targets.len() - stale.len();

        if !stale.is_empty() {
            let data = match read_font(source.path()) {
                Ok(data) => data,
                Err(e) => return Ok(Self::failed(source, e, summary)),
            };
            for (format, target) in stale {
                let encoded = match self.encoder.encode(*format, &data).with_context(|| {
                    format!("Failed to encode {} as {}", source.path().display(), format.extension())
                }) {
                    Ok(encoded) => encoded,
                    Err(e) => return Ok(Self::failed(source, e, summary)),
                };
                write_output(target, encoded)?;
                log::debug!("{} -> {}", source.relative_path().display(), target.display());
                summary.converted += 1;
            }
        }

        let mut woff2 = None;
        let mut woff = None;
        for (format, target) in targets {
            match format {
                WebFormat::Woff2 => woff2 = Some(target),
                WebFormat::Woff => woff = Some(target),
            }
        }

        let font = woff2.map(|woff2| ConvertedFont { woff2, woff });
        Ok(FileOutcome { font, summary })
    }

    fn failed(source: &FontSource, error: anyhow::Error, mut summary: ConversionSummary) -> FileOutcome {
        log::warn!("Skipping {}: {error:#}", source.relative_path().display());
        summary.failed += 1;
        FileOutcome { font: None, summary }
    }
}
