//! Codec for KMP race-course geometry files
#![allow(clippy::cast_possible_truncation)] // Bitfield values are range-checked before narrowing
#![allow(clippy::cast_possible_wrap)] // Binary format offsets
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::doc_markdown)] // Section tags don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::similar_names)] // Domain-specific naming patterns
#![allow(clippy::float_cmp)] // Binary format requirements
#![allow(clippy::derive_partial_eq_without_eq)] // Binary format structs
#![allow(clippy::redundant_closure_for_method_calls)] // Iterator chains
#![allow(clippy::use_self)] // Type clarity
//! KMP files describe one race course: start points, enemy/item/checkpoint
//! paths, placed objects, camera routes, areas and a few course-wide settings.
//! This crate reads and writes them symmetrically and converts them to and
//! from a pipe-separated text workbook that is convenient to edit by hand.
//!
//! # Layers
//!
//! - [`cursor`]: big-endian positioned reader and writer
//! - [`bitfield`]: packed sub-field words
//! - [`section`]: one record layout per section tag
//! - [`linker`]: path points and groups to and from flat rows
//! - [`file`]: container header, offset table and back-patching
//! - [`course`]: the rows-by-section model with [`decode`] and [`encode`]
//! - [`sheet`]: the text workbook
//!
//! # Example
//!
//! ```no_run
//! # fn run(bytes: &[u8]) -> kmp_formats::Result<()> {
//! let course = kmp_formats::decode(bytes)?;
//! let text = kmp_formats::sheet::format(&kmp_formats::course::to_workbook(&course)?);
//! let rebuilt = kmp_formats::course::from_workbook(&kmp_formats::sheet::parse(&text)?)?;
//! assert_eq!(kmp_formats::encode(&rebuilt)?, kmp_formats::encode(&course)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod bitfield;
pub mod course;
pub mod cursor;
pub mod error;
pub mod file;
pub mod linker;
pub mod section;
pub mod sheet;

pub use course::{Course, decode, encode};
pub use error::{KmpError, Result};
pub use file::KmpFile;
