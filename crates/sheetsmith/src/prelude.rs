//! Prelude module - common imports for sheetsmith users
//!
//! ```rust
//! use sheetsmith::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellRange,
    CellValue,
    IgnoredErrors,

    // Style types
    CellBorder,
    Color,
    Font,
    HorizontalAlign,
    PatternFill,
    Style,
    VerticalAlign,

    // Error types
    Error,
    Result,
    XlsxError,

    // Main types
    Workbook,
    // Extension traits
    WorkbookSaveExt,
    Worksheet,

    // I/O types
    LargeNumberHandling,
    WriterOptions,
    XlsxWriter,
};
