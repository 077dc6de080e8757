//! # sheetsmith-core
//!
//! Workbook model for the sheetsmith xlsx writer.
//!
//! This crate provides the types the writer consumes:
//! - [`Cell`] and [`CellValue`] - Typed cell values with style and metadata
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//! - [`Style`] - Cell formatting (number format, font, border, fill, alignment)
//! - [`Workbook`], [`Worksheet`] - The document structure
//!
//! ## Example
//!
//! ```rust
//! use sheetsmith_core::{Cell, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Sheet1").unwrap();
//!
//! sheet.set_cell("A1", Cell::text("Hello")).unwrap();
//! sheet.set_cell("B1", Cell::integer(42)).unwrap();
//! sheet
//!     .set_cell_at(1, 0, Cell::text("Bold").with_style(Style::new().with_bold(true)))
//!     .unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod ignored_error;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    is_large_number, Cell, CellAddress, CellRange, CellType, CellValue,
    LARGE_NUMBER_NEGATIVE_LIMIT, LARGE_NUMBER_POSITIVE_LIMIT,
};
pub use error::{Error, Result};
pub use ignored_error::IgnoredErrors;
pub use workbook::{validate_sheet_name, Workbook, WorkbookSettings};
pub use worksheet::{FreezePanes, PageOrientation, PageSetup, Worksheet};

pub use style::{
    number_format, CellBorder, Color, Font, HorizontalAlign, PatternFill, PatternType, Style,
    VerticalAlign,
};

pub use chrono::NaiveDateTime;
pub use rust_decimal::Decimal;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
