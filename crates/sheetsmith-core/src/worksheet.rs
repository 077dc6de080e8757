//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely, keyed by `(row, col)`, so iteration is always
/// row-major regardless of insertion order.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: BTreeMap<(u32, u16), Cell>,
    /// Custom column widths (column index -> width in characters)
    column_widths: BTreeMap<u16, f64>,
    /// Merged regions
    merged_regions: Vec<CellRange>,
    /// Freeze pane settings
    freeze_panes: Option<FreezePanes>,
    /// Print settings
    page_setup: PageSetup,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    ///
    /// The name is validated when the sheet is added to a workbook.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            merged_regions: Vec::new(),
            freeze_panes: None,
            page_setup: PageSetup::default(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices (0-based)
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a mutable cell by row and column indices (0-based)
    pub fn cell_at_mut(&mut self, row: u32, col: u16) -> Option<&mut Cell> {
        self.cells.get_mut(&(row, col))
    }

    /// Set a cell by address string (e.g., "A1")
    pub fn set_cell(&mut self, address: &str, cell: Cell) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_at(addr.row, addr.col, cell)
    }

    /// Set a cell by row and column indices (0-based)
    pub fn set_cell_at(&mut self, row: u32, col: u16, cell: Cell) -> Result<()> {
        check_bounds(row, col)?;
        self.cells.insert((row, col), cell);
        Ok(())
    }

    /// Remove a cell, returning it if it existed
    pub fn remove_cell_at(&mut self, row: u32, col: u16) -> Option<Cell> {
        self.cells.remove(&(row, col))
    }

    /// Iterate over all cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.cells
            .iter()
            .map(|(&(row, col), cell)| (CellAddress::new(row, col), cell))
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest range containing every populated cell
    pub fn used_range(&self) -> Option<CellRange> {
        let mut keys = self.cells.keys();
        let &(first_row, first_col) = keys.next()?;

        let (mut min_col, mut max_col) = (first_col, first_col);
        let mut max_row = first_row;
        for &(row, col) in keys {
            min_col = min_col.min(col);
            max_col = max_col.max(col);
            max_row = max_row.max(row);
        }

        Some(CellRange::from_indices(first_row, min_col, max_row, max_col))
    }

    // === Columns ===

    /// Get a custom column width, if one was set
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        check_bounds(0, col)?;
        if !width.is_finite() || width < 0.0 {
            return Err(Error::InvalidColumnWidth(width));
        }
        self.column_widths.insert(col, width);
        Ok(())
    }

    /// All custom column widths, ordered by column
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        check_bounds(range.start.row, range.start.col)?;
        check_bounds(range.end.row, range.end.col)?;
        if range.cell_count() < 2 {
            return Err(Error::InvalidRange(format!(
                "cannot merge single cell {}",
                range
            )));
        }
        if self.merged_regions.iter().any(|existing| range.overlaps(existing)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    // === Freeze Panes ===

    /// Get freeze pane settings
    pub fn freeze_panes(&self) -> Option<&FreezePanes> {
        self.freeze_panes.as_ref()
    }

    /// Freeze the given number of top rows and left columns
    ///
    /// `(0, 0)` removes the freeze. The first scrollable cell must still be
    /// on the sheet.
    pub fn set_freeze_panes(&mut self, rows: u32, cols: u16) -> Result<()> {
        check_bounds(rows, cols)?;
        self.freeze_panes = (rows > 0 || cols > 0).then_some(FreezePanes { rows, cols });
        Ok(())
    }

    /// Freeze the first row (header row)
    pub fn freeze_top_row(&mut self) {
        let cols = self.freeze_panes.map_or(0, |p| p.cols);
        self.freeze_panes = Some(FreezePanes { rows: 1, cols });
    }

    /// Freeze the first column
    pub fn freeze_left_column(&mut self) {
        let rows = self.freeze_panes.map_or(0, |p| p.rows);
        self.freeze_panes = Some(FreezePanes { rows, cols: 1 });
    }

    // === Page Setup ===

    /// Print settings
    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    /// Set the print orientation
    pub fn set_orientation(&mut self, orientation: PageOrientation) {
        self.page_setup.orientation = orientation;
    }
}

fn check_bounds(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS || col >= MAX_COLS {
        return Err(Error::InvalidAddress(format!(
            "row {} / column {} outside the sheet",
            row, col
        )));
    }
    Ok(())
}

/// Freeze pane settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePanes {
    /// Number of frozen rows at the top
    pub rows: u32,
    /// Number of frozen columns at the left
    pub cols: u16,
}

impl FreezePanes {
    /// Top-left cell of the scrollable area
    pub fn top_left_cell(&self) -> CellAddress {
        CellAddress::new(self.rows, self.cols)
    }
}

/// Page setup for printing
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSetup {
    /// Orientation
    pub orientation: PageOrientation,
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// The `orientation` attribute value
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            PageOrientation::Portrait => "portrait",
            PageOrientation::Landscape => "landscape",
        }
    }
}
