//! WOFF2 encoding of single TrueType/OpenType fonts.
//!
//! The sfnt is validated with `read-fonts` before it is handed to the
//! Brotli-based encoder, so corrupt input surfaces as a parse error naming
//! the problem instead of an opaque encoder failure.
//!
//! # Example
//!
//! ```no_run
//! use fontbake_font_woff2::convert_to_woff2;
//!
//! let ttf_data = std::fs::read("Inter-Regular.ttf").unwrap();
//! let woff2_data = convert_to_woff2(&ttf_data).unwrap();
//! std::fs::write("Inter-Regular.woff2", woff2_data).unwrap();
//! ```

use std::result;

use read_fonts::{FontRef, ReadError};
use ttf2woff2::{BrotliQuality, encode};

/// WOFF2 file signature (`wOF2`).
pub const WOFF2_SIGNATURE: &[u8; 4] = b"wOF2";

/// Font collection signature. Collections are not supported.
const TTC_SIGNATURE: &[u8; 4] = b"ttcf";

/// Errors that can occur during WOFF2 encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("font collections (ttcf) are not supported")]
    Collection,

    #[error("font has no tables")]
    Empty,

    #[error("WOFF2 encoding failed: {0}")]
    Encode(String),
}

pub type Result<T> = result::Result<T, Error>;

/// Converts raw TTF/OTF data into a WOFF2 file.
///
/// Glyph data is not altered; the sfnt tables are re-packaged and compressed.
pub fn convert_to_woff2(data: &[u8]) -> Result<Vec<u8>> {
    validate_sfnt(data)?;
    encode(data, BrotliQuality::default()).map_err(|e| Error::Encode(e.to_string()))
}

/// Checks that `data` is a single sfnt with at least one table.
pub fn validate_sfnt(data: &[u8]) -> Result<()> {
    if data.starts_with(TTC_SIGNATURE) {
        return Err(Error::Collection);
    }
    let font = FontRef::new(data)?;
    if font.table_directory.table_records().is_empty() {
        return Err(Error::Empty);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let result = convert_to_woff2(b"definitely not a font");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_rejects_collection() {
        let mut data = b"ttcf".to_vec();
        data.extend_from_slice(&[0; 32]);
        assert!(matches!(validate_sfnt(&data), Err(Error::Collection)));
    }

    #[test]
    fn test_validate_real_font() {
        assert!(validate_sfnt(font_test_data::CMAP12_FONT1).is_ok());
    }

    #[test]
    fn test_convert_writes_signature() {
        let woff2 = convert_to_woff2(font_test_data::CMAP12_FONT1).unwrap();
        assert!(woff2.starts_with(WOFF2_SIGNATURE));
    }
}
