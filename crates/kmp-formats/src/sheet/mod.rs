//! Sheet workbook: the editable text form of a course
//!
//! A workbook is a sequence of named sheets, each a pipe-separated table in
//! the same spirit as BPSV:
//!
//! - `## version = N` sets the container version
//! - `## sheet = NAME` starts a sheet; the next line is its column header
//! - a column header is `Label!TYPE:size` cells joined by `|`, with types
//!   `FLOAT`, `DEC` and `HEX`
//! - every later line is a row; an empty cell is a null value
//! - other lines starting with `#` are comments, blank lines are ignored
//!
//! # Example
//!
//! ```
//! use kmp_formats::sheet::{SheetBuilder, SheetField, SheetType, SheetValue, Workbook, format, parse};
//!
//! let mut builder = SheetBuilder::new("STGI", vec![
//!     SheetField::new("Lap", SheetType::Dec(1)),
//!     SheetField::new("Speed Factor", SheetType::Float(4)),
//! ]);
//! builder
//!     .add_row(vec![SheetValue::Dec(3), SheetValue::Float(1.0)])
//!     .expect("Test operation should succeed");
//!
//! let mut workbook = Workbook::new();
//! workbook.set_version(2520);
//! workbook.add_sheet(builder.build()).expect("Test operation should succeed");
//!
//! let text = format(&workbook);
//! assert!(text.contains("Lap!DEC:1|Speed Factor!FLOAT:4"));
//! assert_eq!(parse(&text).expect("Test operation should succeed"), workbook);
//! ```

mod document;
mod reader;
mod row;
mod schema;
mod types;
mod workbook;
mod writer;

pub use document::{Sheet, SheetBuilder};
pub use reader::{WorkbookReader, parse};
pub use row::SheetRow;
pub use schema::SheetSchema;
pub use types::{SheetError, SheetField, SheetType, SheetValue};
pub use workbook::Workbook;
pub use writer::{WorkbookWriter, format, write_to_file};
