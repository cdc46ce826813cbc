//! WOFF 1.0 encoding of single TrueType/OpenType fonts.
//!
//! Every sfnt table is zlib-compressed independently. Tables that do not get
//! smaller are stored as-is, which the format signals with
//! `comp_length == orig_length`. Table order, checksums and the sfnt flavor are
//! carried over unchanged, so decoders reconstruct the original font.
//!
//! # Example
//!
//! ```no_run
//! use fontbake_font_woff::convert_to_woff;
//!
//! let ttf_data = std::fs::read("Roboto-Bold.ttf").unwrap();
//! let woff_data = convert_to_woff(&ttf_data).unwrap();
//! std::fs::write("Roboto-Bold.woff", woff_data).unwrap();
//! ```

use std::{
    io::{self, Write},
    result,
};

use flate2::{Compression, write::ZlibEncoder};
use read_fonts::{FontRef, ReadError};

/// WOFF file signature (`wOFF`).
pub const WOFF_SIGNATURE: u32 = 0x774F_4646;

/// Size of the WOFF header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Size of one WOFF table directory entry in bytes.
pub const TABLE_ENTRY_SIZE: usize = 20;

const SFNT_HEADER_SIZE: usize = 12;
const SFNT_TABLE_RECORD_SIZE: usize = 16;

/// Errors that can occur during WOFF encoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("font has no tables")]
    Empty,

    #[error("table {0} is listed but its data is out of bounds")]
    MissingTable(String),

    #[error("font too large for WOFF ({0} bytes)")]
    TooLarge(usize),

    #[error("zlib compression failed: {0}")]
    Compress(#[from] io::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// One table as it will be laid out in the WOFF file.
#[derive(Debug)]
struct WoffTable {
    tag: [u8; 4],
    checksum: u32,
    orig_length: u32,
    data: Vec<u8>,
}

impl WoffTable {
    fn comp_length(&self) -> u32 {
        self.data.len() as u32
    }
}

/// Converts raw TTF/OTF data into a WOFF 1.0 file.
pub fn convert_to_woff(data: &[u8]) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let flavor = font.table_directory.sfnt_version();

    let mut tables = Vec::new();
    for record in font.table_directory.table_records() {
        let tag = record.tag();
        let raw = font
            .table_data(tag)
            .ok_or_else(|| Error::MissingTable(tag.to_string()))?;
        let raw = raw.as_bytes();
        tables.push(WoffTable {
            tag: tag.to_be_bytes(),
            checksum: record.checksum(),
            orig_length: raw.len() as u32,
            data: compress_table(raw)?,
        });
    }

    if tables.is_empty() {
        return Err(Error::Empty);
    }

    // The WOFF directory must be sorted by tag.
    tables.sort_by_key(|t| t.tag);

    let sfnt_size = SFNT_HEADER_SIZE
        + SFNT_TABLE_RECORD_SIZE * tables.len()
        + tables.iter().map(|t| padded(t.orig_length as usize)).sum::<usize>();

    let mut offset = HEADER_SIZE + TABLE_ENTRY_SIZE * tables.len();
    let mut offsets = Vec::with_capacity(tables.len());
    for table in &tables {
        offsets.push(offset);
        offset += padded(table.data.len());
    }
    let total_length = offset;

    if total_length > u32::MAX as usize || sfnt_size > u32::MAX as usize {
        return Err(Error::TooLarge(total_length.max(sfnt_size)));
    }

    let mut out = Vec::with_capacity(total_length);
    out.extend_from_slice(&WOFF_SIGNATURE.to_be_bytes());
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(total_length as u32).to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes()); // reserved
    out.extend_from_slice(&(sfnt_size as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // major version
    out.extend_from_slice(&0u16.to_be_bytes()); // minor version
    // No metadata or private data blocks.
    out.extend_from_slice(&[0u8; 20]);

    for (table, offset) in tables.iter().zip(&offsets) {
        out.extend_from_slice(&table.tag);
        out.extend_from_slice(&(*offset as u32).to_be_bytes());
        out.extend_from_slice(&table.comp_length().to_be_bytes());
        out.extend_from_slice(&table.orig_length.to_be_bytes());
        out.extend_from_slice(&table.checksum.to_be_bytes());
    }

    for table in &tables {
        out.extend_from_slice(&table.data);
        out.resize(padded(out.len()), 0);
    }

    debug_assert_eq!(out.len(), total_length);
    Ok(out)
}

/// Compresses a table, falling back to the raw bytes if zlib does not help.
fn compress_table(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(raw)?;
    let compressed = encoder.finish()?;

    if compressed.len() < raw.len() { Ok(compressed) } else { Ok(raw.to_vec()) }
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}
