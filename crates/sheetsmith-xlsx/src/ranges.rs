//! Collapsing cell sets into rectangular ranges
//!
//! Used wherever the format wants an `sqref` (a space-separated list of
//! ranges) for a set of cells, such as `<ignoredError>`.

use std::collections::{BTreeMap, HashSet};
use std::hash::BuildHasher;

use sheetsmith_core::{CellAddress, CellRange};

/// Cover a set of cells with non-overlapping rectangles
///
/// Cells in one row are collapsed into runs of consecutive columns, then
/// vertically adjacent rows with identical runs are stacked into rectangles.
/// The result covers exactly the input cells and is ordered by top-left
/// corner (row, then column), then width, then height, so it does not depend
/// on the set's iteration order.
pub fn merge_ranges<S: BuildHasher>(cells: &HashSet<CellAddress, S>) -> Vec<CellRange> {
    let mut rows: BTreeMap<u32, Vec<u16>> = BTreeMap::new();
    for addr in cells {
        rows.entry(addr.row).or_default().push(addr.col);
    }

    let mut ranges = Vec::new();
    // (runs, first row, last row) of the rectangle band being grown
    let mut band: Option<(Vec<(u16, u16)>, u32, u32)> = None;

    for (row, mut cols) in rows {
        cols.sort_unstable();
        let runs = column_runs(&cols);

        band = match band.take() {
            Some((band_runs, first, last)) if last + 1 == row && band_runs == runs => {
                Some((band_runs, first, row))
            }
            previous => {
                if let Some((band_runs, first, last)) = previous {
                    flush_band(&mut ranges, &band_runs, first, last);
                }
                Some((runs, row, row))
            }
        };
    }

    if let Some((band_runs, first, last)) = band {
        flush_band(&mut ranges, &band_runs, first, last);
    }

    ranges.sort_by_key(|r| (r.start.row, r.start.col, r.col_count(), r.row_count()));
    ranges
}

/// Space-separated A1 list of [`merge_ranges`] output
pub fn sqref<S: BuildHasher>(cells: &HashSet<CellAddress, S>) -> String {
    merge_ranges(cells)
        .iter()
        .map(CellRange::to_a1_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maximal runs of consecutive columns in a sorted, duplicate-free slice
fn column_runs(cols: &[u16]) -> Vec<(u16, u16)> {
    let mut runs: Vec<(u16, u16)> = Vec::new();
    for &col in cols {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == col => *end = col,
            _ => runs.push((col, col)),
        }
    }
    runs
}

fn flush_band(ranges: &mut Vec<CellRange>, runs: &[(u16, u16)], first: u32, last: u32) {
    ranges.extend(
        runs.iter()
            .map(|&(start, end)| CellRange::from_indices(first, start, last, end)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(addrs: &[&str]) -> HashSet<CellAddress> {
        addrs
            .iter()
            .map(|a| CellAddress::parse(a).unwrap())
            .collect()
    }

    #[test]
    fn test_empty() {
        assert!(merge_ranges(&HashSet::<CellAddress>::new()).is_empty());
        assert_eq!(sqref(&HashSet::<CellAddress>::new()), "");
    }

    #[test]
    fn test_single_cell() {
        assert_eq!(sqref(&set(&["C7"])), "C7");
    }

    #[test]
    fn test_row_run() {
        assert_eq!(sqref(&set(&["A1", "B1", "C1", "E1"])), "A1:C1 E1");
    }

    #[test]
    fn test_rectangle() {
        let cells = set(&["B2", "C2", "B3", "C3", "B4", "C4"]);
        assert_eq!(sqref(&cells), "B2:C4");
    }

    #[test]
    fn test_column_stack() {
        assert_eq!(sqref(&set(&["D1", "D2", "D3"])), "D1:D3");
    }

    #[test]
    fn test_row_gap_breaks_band() {
        assert_eq!(sqref(&set(&["A1", "A2", "A4"])), "A1:A2 A4");
    }

    #[test]
    fn test_different_runs_break_band() {
        // Row 2 has an extra cell, so rows 1-3 cannot stack
        let cells = set(&["A1", "B1", "A2", "B2", "C2", "A3", "B3"]);
        assert_eq!(sqref(&cells), "A1:B1 A2:C2 A3:B3");
    }

    #[test]
    fn test_ordering() {
        let cells = set(&["C1", "A3", "A1", "E5", "F5"]);
        assert_eq!(sqref(&cells), "A1 C1 A3 E5:F5");
    }

    fn covered(ranges: &[CellRange]) -> Vec<CellAddress> {
        let mut cells: Vec<CellAddress> = ranges.iter().flat_map(|r| r.cells()).collect();
        cells.sort();
        cells
    }

    proptest! {
        #[test]
        fn prop_exact_coverage(raw in prop::collection::vec((0u32..12, 0u16..12), 0..60)) {
            let cells: HashSet<CellAddress> =
                raw.iter().map(|&(r, c)| CellAddress::new(r, c)).collect();
            let ranges = merge_ranges(&cells);

            let mut expected: Vec<CellAddress> = cells.iter().copied().collect();
            expected.sort();

            // Equal sorted lists with no duplicates mean no overlap and no gaps
            prop_assert_eq!(covered(&ranges), expected);
        }

        #[test]
        fn prop_order_independent(raw in prop::collection::vec((0u32..8, 0u16..8), 0..40)) {
            let forward: HashSet<CellAddress> =
                raw.iter().map(|&(r, c)| CellAddress::new(r, c)).collect();
            let backward: HashSet<CellAddress, ahash::RandomState> =
                raw.iter().rev().map(|&(r, c)| CellAddress::new(r, c)).collect();

            prop_assert_eq!(merge_ranges(&forward), merge_ranges(&backward));
        }
    }
}
