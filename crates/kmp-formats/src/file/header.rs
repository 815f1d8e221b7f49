//! Container header

use crate::cursor::{ByteReader, FixedRecord, narrow};
use crate::error::{KmpError, Result};
use binrw::{BinRead, BinWrite};

/// File magic
pub const KMP_MAGIC: [u8; 4] = *b"RKMD";

/// Format version written by default
pub const DEFAULT_VERSION: u32 = 2520;

/// Fixed part of the header, before the offset table
///
/// | Offset | Size | Field          |
/// |--------|------|----------------|
/// | 0      | 4    | Magic `RKMD`   |
/// | 4      | 4    | File length    |
/// | 8      | 2    | Section count  |
/// | 10     | 2    | Header length  |
/// | 12     | 4    | Version        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(big)]
pub struct KmpHeader {
    /// Magic signature, always `RKMD`
    pub magic: [u8; 4],
    /// Total file length in bytes
    pub file_length: u32,
    /// Number of sections (and offsets)
    pub section_count: u16,
    /// Bytes from file start to the first section
    pub header_length: u16,
    /// Format version
    pub version: u32,
}

impl FixedRecord for KmpHeader {
    const SIZE: usize = 16;
}

impl KmpHeader {
    /// Header for `section_count` sections, with the file length still unknown
    pub fn new(version: u32, section_count: usize) -> Result<Self> {
        Ok(Self {
            magic: KMP_MAGIC,
            file_length: 0,
            section_count: narrow(section_count, "RKMD", 0, "section count")?,
            header_length: Self::length_for(section_count)?,
            version,
        })
    }

    /// Header length for a given section count: fixed part plus offset table
    pub fn length_for(section_count: usize) -> Result<u16> {
        let length = section_count
            .checked_mul(4)
            .and_then(|table| table.checked_add(Self::SIZE))
            .ok_or_else(|| KmpError::ValueOutOfRange {
                section: "RKMD".to_string(),
                row: 0,
                field: "header length".to_string(),
                value: section_count.to_string(),
            })?;
        narrow(length, "RKMD", 0, "header length")
    }

    /// Read the header, checking the magic before anything else
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.tell();
        let magic = reader.read_u8_array::<4>()?;
        if magic != KMP_MAGIC {
            return Err(KmpError::InvalidMagic(magic));
        }
        reader.seek(start);
        reader.read_record()
    }
}
