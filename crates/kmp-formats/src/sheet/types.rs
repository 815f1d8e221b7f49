use std::fmt;
use thiserror::Error;

/// Column type definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetType {
    /// 32-bit float with display width hint
    Float(usize),
    /// Signed decimal integer with byte width hint
    Dec(usize),
    /// Hexadecimal text with byte width hint
    Hex(usize),
}

impl SheetType {
    /// Parse a type specification like "FLOAT:4" or "HEX:2"
    pub fn parse(spec: &str) -> Result<Self, SheetError> {
        let (type_name, size) = spec
            .split_once(':')
            .ok_or_else(|| SheetError::InvalidTypeSpec(spec.to_string()))?;

        let size = size
            .parse::<usize>()
            .map_err(|_| SheetError::InvalidTypeSpec(spec.to_string()))?;

        match type_name.to_uppercase().as_str() {
            "FLOAT" => Ok(Self::Float(size)),
            "DEC" => Ok(Self::Dec(size)),
            "HEX" => Ok(Self::Hex(size)),
            other => Err(SheetError::UnknownType(other.to_string())),
        }
    }

    /// Format type specification for output
    #[must_use]
    pub fn to_spec(&self) -> String {
        match self {
            Self::Float(size) => format!("FLOAT:{size}"),
            Self::Dec(size) => format!("DEC:{size}"),
            Self::Hex(size) => format!("HEX:{size}"),
        }
    }

    /// Size hint for this type
    #[must_use]
    pub fn size_hint(&self) -> usize {
        match self {
            Self::Float(size) | Self::Dec(size) | Self::Hex(size) => *size,
        }
    }
}

/// Column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetField {
    /// Column label
    pub name: String,
    /// Column type with size hint
    pub field_type: SheetType,
}

impl SheetField {
    /// Create a new column
    pub fn new(name: impl Into<String>, field_type: SheetType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Parse a column specification like "Pos x!FLOAT:4"
    ///
    /// Labels may contain spaces and parentheses but not `!` or `|`.
    pub fn parse(spec: &str) -> Result<Self, SheetError> {
        let (name, field_type) = spec
            .split_once('!')
            .ok_or_else(|| SheetError::InvalidFieldSpec(spec.to_string()))?;
        if name.is_empty() || field_type.contains('!') {
            return Err(SheetError::InvalidFieldSpec(spec.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            field_type: SheetType::parse(field_type)?,
        })
    }

    /// Format column specification for output
    #[must_use]
    pub fn to_spec(&self) -> String {
        format!("{}!{}", self.name, self.field_type.to_spec())
    }
}

/// One cell
#[derive(Debug, Clone, PartialEq)]
pub enum SheetValue {
    /// Float cell
    Float(f32),
    /// Integer cell
    Dec(i64),
    /// Hex cell, kept as written so callers can report malformed text
    Hex(String),
    /// Empty cell
    Empty,
}

impl SheetValue {
    /// Parse a cell according to its column type
    pub fn parse(raw: &str, field_type: SheetType) -> Result<Self, SheetError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::Empty);
        }

        match field_type {
            SheetType::Float(_) => raw
                .parse::<f32>()
                .map(Self::Float)
                .map_err(|_| SheetError::InvalidFloatValue(raw.to_string())),
            SheetType::Dec(_) => raw
                .parse::<i64>()
                .map(Self::Dec)
                .map_err(|_| SheetError::InvalidDecValue(raw.to_string())),
            SheetType::Hex(_) => Ok(Self::Hex(raw.to_string())),
        }
    }

    /// Float value, if this is a float cell
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value, if this is a decimal cell
    #[must_use]
    pub fn as_dec(&self) -> Option<i64> {
        match self {
            Self::Dec(value) => Some(*value),
            _ => None,
        }
    }

    /// Hex text, if this is a hex cell
    #[must_use]
    pub fn as_hex(&self) -> Option<&str> {
        match self {
            Self::Hex(text) => Some(text),
            _ => None,
        }
    }

    /// Check if this cell is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for SheetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Display gives the shortest text that parses back to the same f32
            Self::Float(value) => write!(f, "{value}"),
            Self::Dec(value) => write!(f, "{value}"),
            Self::Hex(text) => f.write_str(text),
            Self::Empty => Ok(()),
        }
    }
}

/// Sheet text errors
#[derive(Debug, Error)]
pub enum SheetError {
    /// Invalid type specification format
    #[error("Invalid type specification: {0}")]
    InvalidTypeSpec(String),

    /// Unknown column type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Invalid column specification format
    #[error("Invalid field specification: {0}")]
    InvalidFieldSpec(String),

    /// Invalid float value
    #[error("Invalid float value: {0}")]
    InvalidFloatValue(String),

    /// Invalid decimal number value
    #[error("Invalid decimal value: {0}")]
    InvalidDecValue(String),

    /// Directive line that could not be understood
    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    /// Sheet directive not followed by a column header
    #[error("Sheet '{0}' has no header line")]
    MissingHeader(String),

    /// Header line is invalid
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Two sheets with the same name
    #[error("Duplicate sheet: {0}")]
    DuplicateSheet(String),

    /// Data line before any sheet directive
    #[error("Row outside of any sheet")]
    RowOutsideSheet,

    /// Row has wrong number of cells
    #[error("Field count mismatch: expected {expected}, got {actual}")]
    FieldCountMismatch {
        /// Expected number of cells
        expected: usize,
        /// Actual number of cells
        actual: usize,
    },

    /// Error with the line it occurred on
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number
        line: usize,
        /// Underlying error
        #[source]
        source: Box<SheetError>,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Attach a line number
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            already @ Self::AtLine { .. } => already,
            other => Self::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }
}
