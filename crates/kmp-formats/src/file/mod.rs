//! KMP container: header, offset table and sections
//!
//! ```text
//! +----------------------+ 0
//! | KmpHeader (16 bytes) |
//! | offsets (4 × count)  |
//! +----------------------+ header_length
//! | section 0            | header_length + offsets[0]
//! | section 1            | header_length + offsets[1]
//! | ...                  |
//! +----------------------+ file_length
//! ```

mod assembler;
mod header;

pub use assembler::Assembler;
pub use header::{DEFAULT_VERSION, KMP_MAGIC, KmpHeader};

use crate::cursor::ByteReader;
use crate::error::Result;
use crate::section::{Section, SectionTag};
use serde::Serialize;
use tracing::{debug, warn};

/// A decoded container
#[derive(Debug, Clone, PartialEq)]
pub struct KmpFile {
    /// Header as read (or as last built)
    pub header: KmpHeader,
    /// Section offsets relative to the header end
    pub offsets: Vec<u32>,
    /// Sections in file order
    pub sections: Vec<Section>,
}

impl KmpFile {
    /// Container holding `sections`, sorted into canonical order
    ///
    /// The file length and offsets are placeholders until [`Self::build`].
    pub fn new(version: u32, mut sections: Vec<Section>) -> Result<Self> {
        sections.sort_by_key(|section| section.tag().canonical_index());
        Ok(Self {
            header: KmpHeader::new(version, sections.len())?,
            offsets: Vec::new(),
            sections,
        })
    }

    /// Decode a whole file
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let header = KmpHeader::read(&mut reader)?;

        if header.file_length as usize != data.len() {
            warn!(
                declared = header.file_length,
                actual = data.len(),
                "header file length disagrees with buffer size"
            );
        }

        let offsets = reader.read_u32_vec(usize::from(header.section_count))?;
        if offsets.windows(2).any(|pair| pair[0] > pair[1]) {
            warn!(?offsets, "section offsets are not in increasing order");
        }

        let base = u64::from(header.header_length);
        let sections = offsets
            .iter()
            .map(|&offset| {
                reader.seek(base + u64::from(offset));
                Section::read(&mut reader)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            version = header.version,
            sections = sections.len(),
            "parsed KMP container"
        );
        Ok(Self {
            header,
            offsets,
            sections,
        })
    }

    /// Encode all sections in their current order
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut assembler = Assembler::new(self.header.version, self.sections.len())?;
        for section in &self.sections {
            assembler.push(section)?;
        }
        assembler.finish()
    }

    /// First section with the given tag
    #[must_use]
    pub fn section(&self, tag: SectionTag) -> Option<&Section> {
        self.sections.iter().find(|section| section.tag() == tag)
    }

    /// Header, offsets and per-section entry counts
    #[must_use]
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            magic: String::from_utf8_lossy(&self.header.magic).into_owned(),
            file_length: self.header.file_length,
            section_count: self.header.section_count,
            header_length: self.header.header_length,
            version: self.header.version,
            sections: self
                .sections
                .iter()
                .zip(&self.offsets)
                .map(|(section, &offset)| SectionSummary {
                    tag: section.tag(),
                    offset,
                    entries: section.entry_count(),
                })
                .collect(),
        }
    }
}

/// Overview of a container, suitable for printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Magic text
    pub magic: String,
    /// Declared file length
    pub file_length: u32,
    /// Declared section count
    pub section_count: u16,
    /// Declared header length
    pub header_length: u16,
    /// Format version
    pub version: u32,
    /// One entry per section in file order
    pub sections: Vec<SectionSummary>,
}

/// One section in a [`FileSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    /// Section tag
    pub tag: SectionTag,
    /// Offset relative to the header end
    pub offset: u32,
    /// Entry count
    pub entries: usize,
}
