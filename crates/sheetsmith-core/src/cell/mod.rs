//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - A value plus its style, hyperlink and ignored errors
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")

mod address;
mod value;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use value::{CellType, CellValue};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::ignored_error::IgnoredErrors;
use crate::style::{number_format, Style};

/// Largest positive number written as a number before large-number handling applies
pub const LARGE_NUMBER_POSITIVE_LIMIT: Decimal = Decimal::from_parts(1215752191, 23, 0, false, 0);

/// Largest negative number written as a number before large-number handling applies
pub const LARGE_NUMBER_NEGATIVE_LIMIT: Decimal = Decimal::from_parts(1215752191, 23, 0, true, 0);

/// Check whether a number is beyond the large-number limits
pub fn is_large_number(n: &Decimal) -> bool {
    *n > LARGE_NUMBER_POSITIVE_LIMIT || *n < LARGE_NUMBER_NEGATIVE_LIMIT
}

/// A single cell in a worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The cell's value
    pub value: CellValue,
    /// The cell's style
    pub style: Style,
    /// Hyperlink target (URL), if any
    pub hyperlink: Option<String>,
    /// Error checks suppressed for this cell
    pub ignored_errors: IgnoredErrors,
}

impl Cell {
    /// Create a cell with a value and the default (General) style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style: Style::default(),
            hyperlink: None,
            ignored_errors: IgnoredErrors::empty(),
        }
    }

    /// Text cell, formatted as `@`
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::new(CellValue::Text(text.into())).with_number_format(number_format::TEXT)
    }

    /// Integer cell, formatted without decimal places
    pub fn integer(n: i64) -> Self {
        Self::new(CellValue::Number(Decimal::from(n)))
            .with_number_format(number_format::NUMBER_NO_DECIMAL_PLACES)
    }

    /// Decimal cell, formatted with two decimal places
    pub fn number(n: Decimal) -> Self {
        Self::new(CellValue::Number(n)).with_number_format(number_format::NUMBER_TWO_DECIMAL_PLACES)
    }

    /// Floating-point cell, formatted with two decimal places
    ///
    /// Fails for NaN, infinities and values outside the decimal range.
    pub fn from_f64(n: f64) -> Result<Self> {
        let value = Decimal::try_from(n)
            .map_err(|_| Error::UnsupportedCellValue(format!("{} is not a finite decimal", n)))?;
        Ok(Self::number(value))
    }

    /// Date/time cell, formatted as date and time
    pub fn date(value: NaiveDateTime) -> Self {
        Self::new(CellValue::Date(value)).with_number_format(number_format::DATE_AND_TIME)
    }

    /// Formula cell (e.g. `SUM(A1:A5)`)
    pub fn formula<S: Into<String>>(formula: S) -> Self {
        Self::new(CellValue::Formula(formula.into()))
    }

    /// Boolean cell
    pub fn boolean(b: bool) -> Self {
        Self::new(CellValue::Boolean(b))
    }

    /// The type of the cell's value
    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// Replace the cell's style
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace only the number format
    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.style = self.style.with_number_format(format);
        self
    }

    /// Attach a hyperlink
    pub fn with_hyperlink<S: Into<String>>(mut self, url: S) -> Self {
        self.hyperlink = Some(url.into());
        self
    }

    /// Suppress the given error checks
    pub fn with_ignored_errors(mut self, errors: IgnoredErrors) -> Self {
        self.ignored_errors |= errors;
        self
    }
}
