//! Cell styling types
//!
//! This module contains types for cell formatting:
//! - [`Style`] - Complete cell style
//! - [`Font`] - Font settings
//! - [`PatternFill`] - Background fill
//! - [`CellBorder`] - Cell border edges
//! - [`HorizontalAlign`], [`VerticalAlign`] - Text alignment
//! - [`Color`] - Color representation
//!
//! A [`Style`] is a plain value: it is compared field by field, and every
//! `with_*` method returns a new style instead of mutating a shared one.
//! Two cells with equal styles end up on the same `cellXfs` entry.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
pub mod number_format;

pub use alignment::{HorizontalAlign, VerticalAlign};
pub use border::CellBorder;
pub use color::Color;
pub use fill::{PatternFill, PatternType};
pub use font::Font;

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Number format code (see [`number_format`])
    pub number_format: String,
    /// Font settings
    pub font: Font,
    /// Border edges
    pub border: CellBorder,
    /// Fill/background settings
    pub fill: PatternFill,
    /// Horizontal alignment
    pub horizontal: HorizontalAlign,
    /// Vertical alignment
    pub vertical: VerticalAlign,
    /// Wrap text onto multiple lines
    pub wrap_text: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            number_format: number_format::GENERAL.to_string(),
            font: Font::default(),
            border: CellBorder::empty(),
            fill: PatternFill::default(),
            horizontal: HorizontalAlign::default(),
            vertical: VerticalAlign::default(),
            wrap_text: false,
        }
    }
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number format code
    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = format.into();
        self
    }

    /// Replace the font
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set font to bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.font.underline = underline;
        self
    }

    /// Set font name
    pub fn with_font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = name.into();
        self
    }

    /// Set font size in points
    pub fn with_font_size(mut self, size: u16) -> Self {
        self.font.size = size;
        self
    }

    /// Set text color
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set border edges
    pub fn with_border(mut self, border: CellBorder) -> Self {
        self.border = border;
        self
    }

    /// Replace the fill
    pub fn with_fill(mut self, fill: PatternFill) -> Self {
        self.fill = fill;
        self
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlign) -> Self {
        self.horizontal = align;
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlign) -> Self {
        self.vertical = align;
        self
    }

    /// Enable text wrapping
    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Whether any alignment property differs from the default
    pub fn has_alignment(&self) -> bool {
        self.horizontal != HorizontalAlign::default()
            || self.vertical != VerticalAlign::default()
            || self.wrap_text
    }
}
