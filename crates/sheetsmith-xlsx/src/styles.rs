//! Style registry and `xl/styles.xml` writer

use ahash::AHashMap;
use log::trace;

use crate::xml::{escape, SPREADSHEETML_NS, XML_DECLARATION};
use sheetsmith_core::number_format::{self, FIRST_CUSTOM_ID};
use sheetsmith_core::{CellBorder, Color, Font, PatternFill, PatternType, Style};

/// Deduplicating table of cell styles
///
/// Index `i` is the `cellXfs` index written as a cell's `s` attribute. The
/// default style always sits at index 0, and an index never changes once
/// handed out.
#[derive(Debug)]
pub struct StyleRegistry {
    /// Unique styles, position is the xf index
    styles: Vec<Style>,
    /// Reverse lookup
    index: AHashMap<Style, u32>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// Create a registry holding only the default style
    pub fn new() -> Self {
        let default = Style::default();
        let mut index = AHashMap::new();
        index.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            index,
        }
    }

    /// Register a style, returning its xf index
    ///
    /// Equal styles (field by field) share an index.
    pub fn register(&mut self, style: &Style) -> u32 {
        if let Some(&idx) = self.index.get(style) {
            return idx;
        }

        let idx = self.styles.len() as u32;
        self.styles.push(style.clone());
        self.index.insert(style.clone(), idx);
        trace!("cell style {} registered", idx);
        idx
    }

    /// Number of registered styles, default included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Always false: the default style is pre-registered
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Look up a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Whether `index` refers to a registered style
    pub fn contains_index(&self, index: u32) -> bool {
        (index as usize) < self.styles.len()
    }

    /// Render the `styleSheet` part
    pub fn to_styles_xml(&self) -> String {
        // Build component tables
        let mut font_ids: AHashMap<&Font, u32> = AHashMap::new();
        let mut fonts: Vec<&Font> = Vec::new();

        let mut fill_ids: AHashMap<PatternFill, u32> = AHashMap::new();
        // Excel requires the first two fills to be: none and gray125
        let mut fills: Vec<PatternFill> = vec![
            PatternFill::none(),
            PatternFill {
                pattern_type: PatternType::Gray125,
                pattern_color: None,
                background_color: None,
            },
        ];
        fill_ids.insert(fills[0], 0);
        fill_ids.insert(fills[1], 1);

        let mut border_ids: AHashMap<CellBorder, u32> = AHashMap::new();
        let mut borders: Vec<CellBorder> = vec![CellBorder::empty()];
        border_ids.insert(CellBorder::empty(), 0);

        // Custom number formats
        let mut numfmt_ids: AHashMap<&str, u32> = AHashMap::new();
        let mut numfmts: Vec<(u32, &str)> = Vec::new();
        let mut next_numfmt_id = FIRST_CUSTOM_ID;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let font_id = *font_ids.entry(&style.font).or_insert_with(|| {
                fonts.push(&style.font);
                fonts.len() as u32 - 1
            });

            let fill_id = *fill_ids.entry(style.fill).or_insert_with(|| {
                fills.push(style.fill);
                fills.len() as u32 - 1
            });

            let border_id = *border_ids.entry(style.border).or_insert_with(|| {
                borders.push(style.border);
                borders.len() as u32 - 1
            });

            let code = style.number_format.as_str();
            let num_fmt_id = match number_format::builtin_id(code) {
                Some(id) => id,
                None => *numfmt_ids.entry(code).or_insert_with(|| {
                    let id = next_numfmt_id;
                    next_numfmt_id += 1;
                    numfmts.push((id, code));
                    id
                }),
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        // Write XML
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!("\n<styleSheet xmlns=\"{}\">", SPREADSHEETML_NS));

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(*border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>"#,
        );

        xml.push_str("\n</styleSheet>");
        xml
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    format!("<{tag} rgb=\"{}\"/>", color.to_argb_hex())
}

fn write_font(font: &Font) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if font.underline {
        s.push_str("<u/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if let Some(color) = &font.color {
        s.push_str(&write_color("color", color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape(&font.name)));
    s.push_str("</font>");
    s
}

// A solid fill paints with fgColor, so the background color goes there.
fn write_fill(fill: &PatternFill) -> String {
    let pattern = fill.pattern_type.xlsx_name();
    let mut colors = String::new();

    match fill.pattern_type {
        PatternType::None => {}
        PatternType::Solid => {
            if let Some(bg) = &fill.background_color {
                colors.push_str(&write_color("fgColor", bg));
            }
            colors.push_str("<bgColor indexed=\"64\"/>");
        }
        _ => {
            if let Some(fg) = &fill.pattern_color {
                colors.push_str(&write_color("fgColor", fg));
            }
            if let Some(bg) = &fill.background_color {
                colors.push_str(&write_color("bgColor", bg));
            }
        }
    }

    if colors.is_empty() {
        format!("<fill><patternFill patternType=\"{}\"/></fill>", pattern)
    } else {
        format!(
            "<fill><patternFill patternType=\"{}\">{}</patternFill></fill>",
            pattern, colors
        )
    }
}

fn write_border_edge(tag: &str, present: bool) -> String {
    if present {
        format!("<{tag} style=\"thin\"><color indexed=\"64\"/></{tag}>")
    } else {
        format!("<{tag}/>")
    }
}

fn write_border(border: CellBorder) -> String {
    let mut s = String::from("<border>");
    s.push_str(&write_border_edge("left", border.contains(CellBorder::LEFT)));
    s.push_str(&write_border_edge("right", border.contains(CellBorder::RIGHT)));
    s.push_str(&write_border_edge("top", border.contains(CellBorder::TOP)));
    s.push_str(&write_border_edge("bottom", border.contains(CellBorder::BOTTOM)));
    s.push_str("<diagonal/>");
    s.push_str("</border>");
    s
}

fn write_alignment(style: &Style) -> String {
    if !style.has_alignment() {
        return String::new();
    }

    let default = Style::default();
    let mut s = String::from("<alignment");
    if style.horizontal != default.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", style.horizontal.xlsx_name()));
    }
    if style.vertical != default.vertical {
        s.push_str(&format!(" vertical=\"{}\"", style.vertical.xlsx_name()));
    }
    if style.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if ids.border_id != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if style.has_alignment() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    let alignment_xml = write_alignment(style);
    if alignment_xml.is_empty() {
        s.push_str("/>");
    } else {
        s.push('>');
        s.push_str(&alignment_xml);
        s.push_str("</xf>");
    }
    s
}
