//! # sheetsmith-xlsx
//!
//! XLSX (Office Open XML) package writer for sheetsmith.
//!
//! The pieces, leaves first:
//! - [`SharedStrings`] - deduplicated text table
//! - [`StyleRegistry`] - deduplicated cell styles and `styles.xml`
//! - [`merge_ranges`] - cell sets to rectangular `sqref` lists
//! - [`SheetSerializer`] - one worksheet part
//! - [`Package`] - parts, relationships, validation and the zip container
//! - [`XlsxWriter`] - runs the whole pass for a workbook
//!
//! ```rust
//! use sheetsmith_core::{Cell, Workbook};
//! use sheetsmith_xlsx::XlsxWriter;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Sheet1").unwrap();
//! sheet.set_cell("A1", Cell::text("Hello")).unwrap();
//! sheet.set_cell("B1", Cell::integer(42)).unwrap();
//!
//! let bytes = XlsxWriter::to_bytes(&workbook).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

pub mod error;
pub mod options;
pub mod package;
pub mod ranges;
pub mod shared_strings;
pub mod sheet;
pub mod styles;
pub mod writer;

mod xml;

pub use error::{XlsxError, XlsxResult};
pub use options::{Compression, DocumentProperties, LargeNumberHandling, WriterOptions};
pub use package::{Package, PackagePart, Relationship, RelationshipCounter, TargetMode};
pub use ranges::{merge_ranges, sqref};
pub use shared_strings::SharedStrings;
pub use sheet::{SerializedSheet, SheetSerializer};
pub use styles::StyleRegistry;
pub use writer::XlsxWriter;
