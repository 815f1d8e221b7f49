use crate::sheet::document::Sheet;
use crate::sheet::workbook::Workbook;
use std::io::{BufWriter, Write};

/// Workbook text writer
pub struct WorkbookWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> WorkbookWriter<W> {
    /// Create a new writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write a complete workbook
    pub fn write_workbook(&mut self, workbook: &Workbook) -> Result<(), std::io::Error> {
        write!(self.writer, "{workbook}")?;
        self.writer.flush()
    }

    /// Write a single sheet
    pub fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), std::io::Error> {
        write!(self.writer, "{sheet}")?;
        self.writer.flush()
    }

    /// Write a comment line
    pub fn write_comment(&mut self, comment: &str) -> Result<(), std::io::Error> {
        writeln!(self.writer, "# {comment}")?;
        self.writer.flush()
    }

    /// Get the inner writer
    pub fn into_inner(self) -> Result<W, std::io::Error> {
        self.writer
            .into_inner()
            .map_err(std::io::IntoInnerError::into_error)
    }
}

/// Format a workbook to a string
#[must_use]
pub fn format(workbook: &Workbook) -> String {
    workbook.to_string()
}

/// Write a workbook to a file
pub fn write_to_file<P: AsRef<std::path::Path>>(
    path: P,
    workbook: &Workbook,
) -> Result<(), std::io::Error> {
    let file = std::fs::File::create(path)?;
    WorkbookWriter::new(file).write_workbook(workbook)
}
