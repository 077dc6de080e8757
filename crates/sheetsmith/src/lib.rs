//! # sheetsmith
//!
//! A Rust library for assembling Excel spreadsheets (.xlsx).
//!
//! ## Features
//!
//! - Typed cells: text, numbers, dates, formulas and booleans
//! - Cell styling (number formats, fonts, fills, borders, alignment)
//! - Hyperlinks, merged cells, column widths, freeze panes
//! - Deduplicated shared strings and styles
//! - Validated packages: nothing is written when a part or relationship
//!   would dangle
//!
//! ## Example
//!
//! ```rust
//! use sheetsmith::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Sheet1").unwrap();
//!
//! sheet.set_cell("A1", Cell::text("Hello")).unwrap();
//! sheet.set_cell("B1", Cell::integer(42)).unwrap();
//! sheet.set_cell("C1", Cell::boolean(true)).unwrap();
//! sheet.set_cell("D1", Cell::formula("B1*2")).unwrap();
//!
//! let bytes = workbook.to_xlsx_bytes().unwrap();
//! assert!(!bytes.is_empty());
//!
//! // Save to file
//! // workbook.save("output.xlsx").unwrap();
//! ```

pub mod prelude;

// Re-export core types
pub use sheetsmith_core::{
    // Errors
    Error,
    Result,

    // Cell types
    Cell,
    CellAddress,
    CellRange,
    CellType,
    CellValue,
    Decimal,
    IgnoredErrors,
    NaiveDateTime,

    // Style types
    number_format,
    CellBorder,
    Color,
    Font,
    HorizontalAlign,
    PatternFill,
    PatternType,
    Style,
    VerticalAlign,

    // Main types
    FreezePanes,
    PageOrientation,
    PageSetup,
    Workbook,
    WorkbookSettings,
    Worksheet,

    // Constants
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use sheetsmith_xlsx::{
    Compression, DocumentProperties, LargeNumberHandling, WriterOptions, XlsxError, XlsxResult,
    XlsxWriter,
};

// Re-export the assembly building blocks
pub use sheetsmith_xlsx::{
    merge_ranges, package, sqref, Package, PackagePart, Relationship, SharedStrings,
    SheetSerializer, StyleRegistry,
};

use std::path::Path;

/// Extension trait for Workbook to add xlsx output
pub trait WorkbookSaveExt {
    /// Save the workbook to an .xlsx file
    fn save<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()>;

    /// Save with custom writer options
    fn save_with_options<P: AsRef<Path>>(&self, path: P, options: &WriterOptions)
        -> XlsxResult<()>;

    /// Render the workbook as .xlsx bytes
    fn to_xlsx_bytes(&self) -> XlsxResult<Vec<u8>>;
}

impl WorkbookSaveExt for Workbook {
    fn save<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        XlsxWriter::write_file(self, path)
    }

    fn save_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: &WriterOptions,
    ) -> XlsxResult<()> {
        XlsxWriter::write_file_with_options(self, path, options)
    }

    fn to_xlsx_bytes(&self) -> XlsxResult<Vec<u8>> {
        XlsxWriter::to_bytes(self)
    }
}
