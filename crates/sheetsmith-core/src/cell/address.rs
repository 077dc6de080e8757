//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "XFD1048576")
///
/// Rows and columns are stored 0-based; the A1 form is 1-based with
/// bijective base-26 column letters (A=1 .. Z=26, AA=27, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Only the canonical form is accepted: uppercase letters, a row without
    /// leading zeros, no `$` markers and no surrounding whitespace. Anything
    /// that parses prints back unchanged.
    ///
    /// # Examples
    /// ```
    /// use sheetsmith_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 2);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_uppercase())
            .ok_or_else(|| Error::InvalidAddress(format!("no row number in '{}'", s)))?;

        let (col_str, row_str) = s.split_at(split);
        if col_str.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }
        if row_str.starts_with('0') {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 without leading zeros in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(col_str)?;

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} exceeds {} in '{}'",
                row, MAX_ROWS, s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert uppercase column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        // XFD is three letters; anything longer is out of range and could overflow.
        if letters.len() > 3 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' out of range",
                letters
            )));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c as u32 - 'A' as u32 + 1);
        }

        if col > MAX_COLS as u32 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' out of range",
                letters
            )));
        }

        Ok((col - 1) as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = Self::column_to_letters(self.col);
        result.push_str(&(self.row + 1).to_string());
        result
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalized so `start` is top-left
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:B10 notation
    ///
    /// Corners follow [`CellAddress::parse`]; reversed corners are normalized.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((start, end)) => {
                let start = CellAddress::parse(start)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                let end = CellAddress::parse(end)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::new(start, end))
            }
            None => Ok(Self::single(CellAddress::parse(s)?)),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
        }
    }

    /// Format as A1:B10 string, or a bare address for a single cell
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u16,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);

        if self.current_col == self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.current_col += 1;
        }

        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_letter_boundaries() {
        // Each letter count rolls over to the next without a zero digit
        for (col, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (702, "AAA"), (16383, "XFD")] {
            assert_eq!(CellAddress::column_to_letters(col), letters);
            assert_eq!(CellAddress::letters_to_column(letters).unwrap(), col);
        }
    }

    #[test]
    fn test_letters_out_of_range() {
        for bad in ["XFE", "ZZZ", "AAAA", "", "a", "A1"] {
            assert!(
                matches!(CellAddress::letters_to_column(bad), Err(Error::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_sheet_corners() {
        assert_eq!(addr("A1"), CellAddress::new(0, 0));
        assert_eq!(addr("XFD1"), CellAddress::new(0, MAX_COLS - 1));
        assert_eq!(addr("A1048576"), CellAddress::new(MAX_ROWS - 1, 0));
        assert_eq!(addr("XFD1048576").to_string(), "XFD1048576");
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        let bad = [
            "", "A", "7", "A0", "A01", " A1", "A1 ", "a1", "aB3", "$A$1", "A$1", "A-1", "1A",
            "A1B", "A1:B2", "A1048577", "A4294967296", "XFE1", "ZZZZ1",
        ];
        for s in bad {
            assert!(
                matches!(CellAddress::parse(s), Err(Error::InvalidAddress(_))),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_range_text_form() {
        let range: CellRange = "D9:B2".parse().unwrap();
        assert_eq!((range.start, range.end), (addr("B2"), addr("D9")));
        assert_eq!(range.to_string(), "B2:D9");
        assert_eq!((range.row_count(), range.col_count()), (8, 3));

        let single = CellRange::parse("H8").unwrap();
        assert_eq!(single, CellRange::single(addr("H8")));
        assert_eq!(single.to_string(), "H8");

        for bad in ["A1:", ":B2", "A1:b2", "A1:B2:C3", " A1:B2"] {
            assert!(CellRange::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_overlaps() {
        let block = CellRange::parse("C3:E5").unwrap();
        assert!(block.overlaps(&CellRange::parse("E5:G7").unwrap()));
        assert!(block.overlaps(&CellRange::parse("A1:Z26").unwrap()));
        assert!(!block.overlaps(&CellRange::parse("F3:F5").unwrap()));
        assert!(!block.overlaps(&CellRange::parse("C6").unwrap()));
        assert!(block.contains(&addr("D4")));
        assert!(!block.contains(&addr("B4")));
    }

    #[test]
    fn test_cells_row_major() {
        let cells: Vec<String> = CellRange::parse("B7:C8")
            .unwrap()
            .cells()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(cells, vec!["B7", "C7", "B8", "C8"]);

        // Stepping past the last column of the sheet must not overflow
        let edge = CellRange::from_indices(0, MAX_COLS - 1, 2, MAX_COLS - 1);
        assert_eq!(edge.cells().count(), 3);
        assert_eq!(edge.cell_count(), 3);
    }

    proptest! {
        #[test]
        fn prop_address_round_trip(row in 0u32..MAX_ROWS, col in 0u16..MAX_COLS) {
            let address = CellAddress::new(row, col);
            let text = address.to_a1_string();
            let parsed = CellAddress::parse(&text).unwrap();
            prop_assert_eq!(parsed, address);
            prop_assert_eq!(parsed.to_a1_string(), text);
        }

        #[test]
        fn prop_parsed_text_prints_back(s in "[A-Z]{1,3}[1-9][0-9]{0,6}") {
            if let Ok(parsed) = CellAddress::parse(&s) {
                prop_assert_eq!(parsed.to_a1_string(), s);
            }
        }
    }
}
