//! Text alignment types

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlign {
    /// General alignment (text left, numbers right)
    #[default]
    General,
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlign {
    /// The `horizontal` attribute value
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            HorizontalAlign::General => "general",
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
            HorizontalAlign::Justify => "justify",
        }
    }
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlign {
    /// Bottom aligned (default)
    #[default]
    Bottom,
    Center,
    Top,
    Justify,
}

impl VerticalAlign {
    /// The `vertical` attribute value
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            VerticalAlign::Bottom => "bottom",
            VerticalAlign::Center => "center",
            VerticalAlign::Top => "top",
            VerticalAlign::Justify => "justify",
        }
    }
}
