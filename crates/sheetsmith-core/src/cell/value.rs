//! Cell value types

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text, written through the shared-string table
    Text(String),

    /// Numeric value
    Number(Decimal),

    /// Date/time, written as a serial number
    Date(NaiveDateTime),

    /// Formula expression (a leading `=` is optional and stripped on write)
    Formula(String),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),
}

impl CellValue {
    /// The [`CellType`] of this value
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Text(_) => CellType::Text,
            CellValue::Number(_) => CellType::Number,
            CellValue::Date(_) => CellType::Date,
            CellValue::Formula(_) => CellType::Formula,
            CellValue::Boolean(_) => CellType::Boolean,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d),
            CellValue::Formula(text) => write!(f, "={}", text.trim_start_matches('=')),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// The kind of value held by a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    Text,
    Number,
    Date,
    Formula,
    Boolean,
}

impl CellType {
    /// Lowercase name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            CellType::Text => "text",
            CellType::Number => "number",
            CellType::Date => "date",
            CellType::Formula => "formula",
            CellType::Boolean => "boolean",
        }
    }
}
