use crate::sheet::document::Sheet;
use crate::sheet::schema::SheetSchema;
use crate::sheet::types::SheetError;
use crate::sheet::workbook::Workbook;
use std::io::{BufRead, BufReader, Read};

/// Workbook text reader
pub struct WorkbookReader<R> {
    reader: BufReader<R>,
}

/// Where the reader is inside the current sheet
enum State {
    /// Before the first `## sheet` directive
    Outside,
    /// After a sheet directive, waiting for its header line
    Header(String),
    /// Reading data rows
    Rows(Sheet),
}

impl<R: Read> WorkbookReader<R> {
    /// Create a new reader from any `Read` source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read and parse a complete workbook
    pub fn read_workbook(&mut self) -> Result<Workbook, SheetError> {
        let mut workbook = Workbook::new();
        let mut state = State::Outside;
        let mut line = String::new();
        let mut number = 0;

        while self.reader.read_line(&mut line)? > 0 {
            number += 1;
            state = Self::consume_line(&mut workbook, state, line.trim())
                .map_err(|e| e.at_line(number))?;
            line.clear();
        }

        Self::close(&mut workbook, state).map_err(|e| e.at_line(number))?;
        Ok(workbook)
    }

    fn consume_line(workbook: &mut Workbook, state: State, line: &str) -> Result<State, SheetError> {
        if line.is_empty() {
            return Ok(state);
        }

        if let Some(directive) = line.strip_prefix("##") {
            let (key, value) = parse_directive(directive)
                .ok_or_else(|| SheetError::InvalidDirective(line.to_string()))?;
            match key {
                "version" => {
                    let version = value
                        .parse::<u32>()
                        .map_err(|_| SheetError::InvalidDirective(line.to_string()))?;
                    workbook.set_version(version);
                    return Ok(state);
                }
                "sheet" => {
                    Self::close(workbook, state)?;
                    return Ok(State::Header(value.to_string()));
                }
                _ => return Ok(state),
            }
        }

        // Other comments
        if line.starts_with('#') {
            return Ok(state);
        }

        match state {
            State::Outside => Err(SheetError::RowOutsideSheet),
            State::Header(name) => {
                if !line.contains('!') {
                    return Err(SheetError::InvalidHeader(
                        "Header must contain column type specifications".to_string(),
                    ));
                }
                Ok(State::Rows(Sheet::new(name, SheetSchema::parse(line)?)))
            }
            State::Rows(mut sheet) => {
                let cells: Vec<&str> = line.split('|').collect();
                sheet.add_raw_row(&cells)?;
                Ok(State::Rows(sheet))
            }
        }
    }

    fn close(workbook: &mut Workbook, state: State) -> Result<(), SheetError> {
        match state {
            State::Outside => Ok(()),
            State::Header(name) => Err(SheetError::MissingHeader(name)),
            State::Rows(sheet) => workbook.add_sheet(sheet),
        }
    }
}

impl<'a> WorkbookReader<&'a [u8]> {
    /// Create a reader from a byte slice
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl WorkbookReader<std::fs::File> {
    /// Create a reader from a file path
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, std::io::Error> {
        let file = std::fs::File::open(path)?;
        Ok(Self::new(file))
    }
}

/// Parse a workbook from a string
pub fn parse(content: &str) -> Result<Workbook, SheetError> {
    WorkbookReader::from_bytes(content.as_bytes()).read_workbook()
}

/// Split `key = value` (also accepts `key: value`)
fn parse_directive(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let (key, value) = text.split_once('=').or_else(|| text.split_once(':'))?;
    Some((key.trim(), value.trim()))
}
