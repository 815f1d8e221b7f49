//! Two-pass container writer

use crate::cursor::{ByteWriter, FixedRecord, narrow};
use crate::error::{KmpError, Result};
use crate::file::header::KmpHeader;
use crate::section::Section;
use tracing::debug;

/// Byte offset of the file length field
const FILE_LENGTH_OFFSET: u64 = 4;

/// Writes a header with placeholder length and offsets, appends sections while
/// recording where each one starts, then back-patches the placeholders.
#[derive(Debug)]
pub struct Assembler {
    writer: ByteWriter,
    header: KmpHeader,
    offsets: Vec<u32>,
}

impl Assembler {
    /// Reserve the header and an offset table for `section_count` sections
    pub fn new(version: u32, section_count: usize) -> Result<Self> {
        let header = KmpHeader::new(version, section_count)?;

        let mut writer = ByteWriter::new();
        writer.write_record(&header)?;
        writer.write_u32_array(&vec![0; section_count])?;

        Ok(Self {
            writer,
            header,
            offsets: Vec::with_capacity(section_count),
        })
    }

    /// Append one section, recording its offset relative to the header end
    pub fn push(&mut self, section: &Section) -> Result<()> {
        let relative = self.writer.tell() - u64::from(self.header.header_length);
        let offset: u32 = narrow(relative, section.tag().as_str(), 0, "section offset")?;
        self.offsets.push(offset);
        section.write(&mut self.writer)
    }

    /// Offsets recorded so far
    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Back-patch file length and offset table, returning the finished bytes
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.offsets.len() != usize::from(self.header.section_count) {
            return Err(KmpError::ValueOutOfRange {
                section: "RKMD".to_string(),
                row: 0,
                field: "section count".to_string(),
                value: self.offsets.len().to_string(),
            });
        }

        let file_length: u32 = narrow(self.writer.len(), "RKMD", 0, "file length")?;
        self.writer.seek(FILE_LENGTH_OFFSET);
        self.writer.write_u32(file_length)?;
        self.writer.seek(KmpHeader::SIZE as u64);
        self.writer.write_u32_array(&self.offsets)?;
        self.writer.seek_end();

        debug!(
            file_length,
            sections = self.offsets.len(),
            "assembled KMP container"
        );
        Ok(self.writer.into_inner())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::section::{SectionTag, StartPoint};

    #[test]
    fn test_back_patch() {
        let mut assembler = Assembler::new(2520, 2).expect("Operation should succeed");
        assembler
            .push(&Section::StartPoints(vec![StartPoint::default()]))
            .expect("Operation should succeed");
        assembler
            .push(&Section::empty(SectionTag::Stgi))
            .expect("Operation should succeed");
        assert_eq!(assembler.offsets(), &[0, 36]);

        let data = assembler.finish().expect("Operation should succeed");
        assert_eq!(data.len(), 24 + 36 + 8);
        assert_eq!(&data[4..8], &(data.len() as u32).to_be_bytes());
        assert_eq!(&data[10..12], &24u16.to_be_bytes());
        assert_eq!(&data[16..20], &0u32.to_be_bytes());
        assert_eq!(&data[20..24], &36u32.to_be_bytes());
        assert_eq!(&data[24..28], b"KTPT");
        assert_eq!(&data[60..64], b"STGI");
        assert_eq!(StartPoint::SIZE + 8, 36);
    }

    #[test]
    fn test_missing_sections() {
        let assembler = Assembler::new(2520, 3).expect("Operation should succeed");
        assert!(assembler.finish().is_err());
    }

    #[test]
    fn test_offset_table_follows_fixed_header() {
        let mut assembler = Assembler::new(2520, 1).expect("Operation should succeed");
        assembler
            .push(&Section::empty(SectionTag::Ktpt))
            .expect("Operation should succeed");
        let data = assembler.finish().expect("Operation should succeed");

        assert_eq!(KmpHeader::SIZE, 16);
        assert_eq!(data.len(), 16 + 4 + 8);
        assert_eq!(&data[16..20], &0u32.to_be_bytes());
        assert_eq!(&data[20..24], b"KTPT");
    }

    #[test]
    fn test_too_many_sections() {
        let err = Assembler::new(2520, 20_000).expect_err("Test operation should fail");
        assert!(matches!(err, KmpError::ValueOutOfRange { ref field, .. } if field == "header length"));
    }
}
