//! Fill/background style types

use super::Color;

/// Pattern fill for a cell background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternFill {
    /// The pattern drawn over the background
    pub pattern_type: PatternType,
    /// Color of the pattern lines
    pub pattern_color: Option<Color>,
    /// Background color
    pub background_color: Option<Color>,
}

impl PatternFill {
    /// No fill (transparent)
    pub fn none() -> Self {
        Self::default()
    }

    /// Solid background color
    pub fn solid(color: Color) -> Self {
        Self {
            pattern_type: PatternType::Solid,
            pattern_color: None,
            background_color: Some(color),
        }
    }

    /// Pattern with explicit line and background colors
    pub fn pattern(pattern_type: PatternType, pattern_color: Color, background_color: Color) -> Self {
        Self {
            pattern_type,
            pattern_color: Some(pattern_color),
            background_color: Some(background_color),
        }
    }

    /// Set the background color
    ///
    /// A fill without a pattern becomes solid, so the color actually shows.
    pub fn with_background_color(mut self, color: Color) -> Self {
        if self.pattern_type == PatternType::None {
            self.pattern_type = PatternType::Solid;
        }
        self.background_color = Some(color);
        self
    }

    /// Check if this is "no fill"
    pub fn is_none(&self) -> bool {
        self.pattern_type == PatternType::None
    }
}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternType {
    /// No pattern
    #[default]
    None,
    /// Solid (100% foreground)
    Solid,
    /// 50% gray
    MediumGray,
    /// 75% gray
    DarkGray,
    /// 25% gray
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

impl PatternType {
    /// The `patternType` attribute value
    pub fn xlsx_name(&self) -> &'static str {
        match self {
            PatternType::None => "none",
            PatternType::Solid => "solid",
            PatternType::MediumGray => "mediumGray",
            PatternType::DarkGray => "darkGray",
            PatternType::LightGray => "lightGray",
            PatternType::DarkHorizontal => "darkHorizontal",
            PatternType::DarkVertical => "darkVertical",
            PatternType::DarkDown => "darkDown",
            PatternType::DarkUp => "darkUp",
            PatternType::DarkGrid => "darkGrid",
            PatternType::DarkTrellis => "darkTrellis",
            PatternType::LightHorizontal => "lightHorizontal",
            PatternType::LightVertical => "lightVertical",
            PatternType::LightDown => "lightDown",
            PatternType::LightUp => "lightUp",
            PatternType::LightGrid => "lightGrid",
            PatternType::LightTrellis => "lightTrellis",
            PatternType::Gray125 => "gray125",
            PatternType::Gray0625 => "gray0625",
        }
    }
}
