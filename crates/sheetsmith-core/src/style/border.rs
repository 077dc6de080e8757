//! Cell border flags

use bitflags::bitflags;

bitflags! {
    /// Which edges of a cell get a thin border
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellBorder: u8 {
        const TOP = 1;
        const RIGHT = 2;
        const BOTTOM = 4;
        const LEFT = 8;

        const TOP_AND_BOTTOM = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthands() {
        assert_eq!(CellBorder::TOP_AND_BOTTOM, CellBorder::TOP | CellBorder::BOTTOM);
        assert!(CellBorder::ALL.contains(CellBorder::LEFT));
        assert!(CellBorder::default().is_empty());
    }
}
