//! Error types for KMP parsing and building

use crate::bitfield::BitfieldError;
use crate::section::SectionTag;
use crate::sheet::SheetError;
use thiserror::Error;

/// Errors that can occur when decoding or encoding KMP data
#[derive(Error, Debug)]
pub enum KmpError {
    /// The first four bytes are not `RKMD`
    #[error("Invalid KMP magic: expected 'RKMD', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// A section tag outside the known vocabulary
    #[error("Unknown section tag: {0:?}")]
    UnknownSection(String),

    /// A read ran past the end of the buffer
    #[error("Unexpected end of data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEnd {
        /// Cursor position when the read started
        offset: u64,
        /// Bytes the read required
        needed: usize,
    },

    /// A value does not fit the bit-width of its packed sub-field
    #[error("{section} row {row}: field '{field}' value {value} does not fit in {width} bits")]
    FieldOverflow {
        /// Section being encoded
        section: SectionTag,
        /// Record index within the section
        row: usize,
        /// Field name
        field: &'static str,
        /// Offending value
        value: u32,
        /// Declared bit-width
        width: u32,
    },

    /// A value does not fit its declared numeric slot
    #[error("{section} row {row}: field '{field}' value {value} is out of range")]
    ValueOutOfRange {
        /// Section or sheet name
        section: String,
        /// Row index
        row: usize,
        /// Field or column name
        field: String,
        /// Offending value as written in the source
        value: String,
    },

    /// A path sheet has points but no group markers
    #[error("{section} has points but no group metadata (row {row} has no group id)")]
    MissingRequiredGroup {
        /// Group section that could not be built
        section: SectionTag,
        /// First row not covered by a group
        row: usize,
    },

    /// Group ranges do not partition the point list
    #[error(
        "{section} group {group} covers [{start}, {end}) which does not continue the partition of {points} points"
    )]
    InvalidGroupRange {
        /// Group section
        section: SectionTag,
        /// Group index
        group: usize,
        /// Range start
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Number of points in the matching point section
        points: usize,
    },

    /// First-camera markers are ambiguous or point outside the camera list
    #[error("CAME marker First{marker}: {reason}")]
    CameraMarker {
        /// Which marker (1 or 2)
        marker: u8,
        /// What is wrong with it
        reason: String,
    },

    /// Object reference cell is not a base-16 value
    #[error("GOBJ row {row}: invalid reference '{value}' (expected hex such as 0x0000)")]
    InvalidReference {
        /// Row index
        row: usize,
        /// Raw cell text
        value: String,
    },

    /// A route with no points cannot be flattened into rows
    #[error("POTI route {route} has no points")]
    EmptyRoute {
        /// Route index
        route: usize,
    },

    /// A required cell is empty
    #[error("{sheet} row {row}: column '{column}' is empty")]
    MissingValue {
        /// Sheet name
        sheet: String,
        /// Row index
        row: usize,
        /// Column name
        column: String,
    },

    /// A sheet lacks one of its columns
    #[error("{sheet}: missing column '{column}'")]
    MissingColumn {
        /// Sheet name
        sheet: String,
        /// Column name
        column: String,
    },

    /// Bitfield layout error
    #[error("Bitfield error: {0}")]
    Bitfield(BitfieldError),

    /// Tabular text error
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// `BinRW` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KmpError {
    /// Attach section/row/field context to a bitfield packing failure
    pub(crate) fn from_bitfield(
        error: BitfieldError,
        section: SectionTag,
        row: usize,
        fields: &[&'static str],
    ) -> Self {
        match error {
            BitfieldError::FieldOverflow { index, value, width } => Self::FieldOverflow {
                section,
                row,
                field: fields.get(index).copied().unwrap_or("bitfield"),
                value,
                width,
            },
            other => Self::Bitfield(other),
        }
    }
}

/// Type alias for KMP operation results
pub type Result<T> = std::result::Result<T, KmpError>;
