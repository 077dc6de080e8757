//! Ignored-error flags
//!
//! Excel shows a green warning triangle for cells it thinks are suspicious
//! (numbers stored as text, formulas that differ from their neighbours, ...).
//! A worksheet can suppress these per cell range; each flag below maps to one
//! attribute of the `<ignoredError>` element.

use bitflags::bitflags;

bitflags! {
    /// Set of error checks to suppress for a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IgnoredErrors: u16 {
        const EVAL_ERROR = 1 << 0;
        const TWO_DIGIT_TEXT_YEAR = 1 << 1;
        const NUMBER_STORED_AS_TEXT = 1 << 2;
        const FORMULA = 1 << 3;
        const FORMULA_RANGE = 1 << 4;
        const UNLOCKED_FORMULA = 1 << 5;
        const EMPTY_CELL_REFERENCE = 1 << 6;
        const LIST_DATA_VALIDATION = 1 << 7;
        const CALCULATED_COLUMN = 1 << 8;
    }
}

impl IgnoredErrors {
    /// Attribute names of the `<ignoredError>` element, in flag order
    pub fn xml_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            (Self::EVAL_ERROR, "evalError"),
            (Self::TWO_DIGIT_TEXT_YEAR, "twoDigitTextYear"),
            (Self::NUMBER_STORED_AS_TEXT, "numberStoredAsText"),
            (Self::FORMULA, "formula"),
            (Self::FORMULA_RANGE, "formulaRange"),
            (Self::UNLOCKED_FORMULA, "unlockedFormula"),
            (Self::EMPTY_CELL_REFERENCE, "emptyCellReference"),
            (Self::LIST_DATA_VALIDATION, "listDataValidation"),
            (Self::CALCULATED_COLUMN, "calculatedColumn"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_attributes() {
        let flags = IgnoredErrors::NUMBER_STORED_AS_TEXT | IgnoredErrors::EVAL_ERROR;
        let attrs: Vec<_> = flags.xml_attributes().collect();
        assert_eq!(attrs, vec!["evalError", "numberStoredAsText"]);

        assert_eq!(IgnoredErrors::empty().xml_attributes().count(), 0);
    }
}
