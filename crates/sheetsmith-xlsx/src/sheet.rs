//! Worksheet part writer (`xl/worksheets/sheetN.xml`)

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::error::{XlsxError, XlsxResult};
use crate::options::{LargeNumberHandling, WriterOptions};
use crate::package::{rel_types, Relationship, RelationshipCounter};
use crate::ranges;
use crate::shared_strings::SharedStrings;
use crate::styles::StyleRegistry;
use crate::xml::{escape, invalid_char, RELATIONSHIPS_NS, SPREADSHEETML_NS, XML_DECLARATION};
use sheetsmith_core::{
    is_large_number, Cell, CellAddress, CellValue, FreezePanes, IgnoredErrors, Worksheet,
};

type AddressSet = HashSet<CellAddress, ahash::RandomState>;

/// Output of [`SheetSerializer::serialize`]
#[derive(Debug, Clone)]
pub struct SerializedSheet {
    /// The worksheet part
    pub xml: String,
    /// External hyperlink relationships, sourced from this sheet's part
    pub hyperlinks: Vec<Relationship>,
    /// Highest `s` attribute written into `xml`
    pub max_style_index: u32,
}

impl SerializedSheet {
    /// Check that every style index in the sheet exists in `styles`
    ///
    /// A sheet must be packaged with the registry it was serialized against.
    pub fn check_styles(&self, styles: &StyleRegistry) -> XlsxResult<()> {
        if styles.contains_index(self.max_style_index) {
            Ok(())
        } else {
            Err(XlsxError::StructuralIntegrity(format!(
                "sheet references cell style {} but only {} are registered",
                self.max_style_index,
                styles.len()
            )))
        }
    }
}

/// Writes one worksheet, feeding the workbook-wide string and style tables
pub struct SheetSerializer;

impl SheetSerializer {
    /// Serialize a worksheet
    ///
    /// Text lands in `strings`, styles in `styles`; both only grow, so
    /// indices written here stay valid for the rest of the workbook.
    pub fn serialize(
        worksheet: &Worksheet,
        sheet_index: usize,
        strings: &mut SharedStrings,
        styles: &mut StyleRegistry,
        options: &WriterOptions,
    ) -> XlsxResult<SerializedSheet> {
        let mut content = String::with_capacity(512 + worksheet.cell_count() * 48);
        content.push_str(XML_DECLARATION);
        content.push_str(&format!(
            "\n<worksheet xmlns=\"{}\" xmlns:r=\"{}\">",
            SPREADSHEETML_NS, RELATIONSHIPS_NS
        ));

        let dimension = worksheet
            .used_range()
            .map_or_else(|| "A1".to_string(), |r| r.to_a1_string());
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));

        write_sheet_views(&mut content, sheet_index, worksheet.freeze_panes());
        content.push_str("\n    <sheetFormatPr defaultRowHeight=\"15\"/>");
        write_cols(&mut content, worksheet);

        // Cells grouped by the set of errors they suppress, keyed by flag bits
        let mut ignored: BTreeMap<u16, AddressSet> = BTreeMap::new();
        let mut hyperlink_refs: Vec<(CellAddress, &str)> = Vec::new();
        let mut max_style_index = 0;

        content.push_str("\n    <sheetData>");
        let mut current_row: Option<u32> = None;
        for (addr, cell) in worksheet.iter_cells() {
            if current_row != Some(addr.row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", addr.row + 1));
                current_row = Some(addr.row);
            }

            let style_id = styles.register(&cell.style);
            max_style_index = max_style_index.max(style_id);

            let mut suppressed = cell.ignored_errors;
            write_cell(&mut content, addr, style_id, cell, strings, options, &mut suppressed)?;

            if !suppressed.is_empty() {
                ignored.entry(suppressed.bits()).or_default().insert(addr);
            }
            if let Some(url) = &cell.hyperlink {
                check_text(addr, "hyperlink", url)?;
                hyperlink_refs.push((addr, url.as_str()));
            }
        }
        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");

        let merged_regions = worksheet.merged_regions();
        if !merged_regions.is_empty() {
            content.push_str(&format!(
                "\n    <mergeCells count=\"{}\">",
                merged_regions.len()
            ));
            for range in merged_regions {
                content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
            }
            content.push_str("\n    </mergeCells>");
        }

        let mut hyperlinks = Vec::with_capacity(hyperlink_refs.len());
        if !hyperlink_refs.is_empty() {
            let mut ids = RelationshipCounter::new();
            content.push_str("\n    <hyperlinks>");
            for (addr, url) in hyperlink_refs {
                let rel = Relationship::external(ids.next_id(), rel_types::HYPERLINK, url);
                content.push_str(&format!(
                    "\n        <hyperlink ref=\"{}\" r:id=\"{}\"/>",
                    addr, rel.id
                ));
                hyperlinks.push(rel);
            }
            content.push_str("\n    </hyperlinks>");
        }

        content.push_str(
            "\n    <pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
        );
        content.push_str(&format!(
            "\n    <pageSetup orientation=\"{}\"/>",
            worksheet.page_setup().orientation.xlsx_name()
        ));

        write_ignored_errors(&mut content, &ignored);

        content.push_str("\n</worksheet>");

        debug!(
            "serialized sheet {} '{}': {} cells, {} hyperlinks",
            sheet_index + 1,
            worksheet.name(),
            worksheet.cell_count(),
            hyperlinks.len()
        );

        Ok(SerializedSheet {
            xml: content,
            hyperlinks,
            max_style_index,
        })
    }
}

fn write_cell(
    content: &mut String,
    addr: CellAddress,
    style_id: u32,
    cell: &Cell,
    strings: &mut SharedStrings,
    options: &WriterOptions,
    suppressed: &mut IgnoredErrors,
) -> XlsxResult<()> {
    let style_attr = if style_id != 0 {
        format!(" s=\"{}\"", style_id)
    } else {
        String::new()
    };

    match &cell.value {
        CellValue::Text(s) => {
            check_text(addr, "text", s)?;
            let idx = strings.intern_str(s);
            content.push_str(&format!(
                "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                addr, style_attr, idx
            ));
        }
        CellValue::Number(n) => {
            let literal = number_literal(n);
            if options.large_number_handling == LargeNumberHandling::StoreAsText
                && is_large_number(n)
            {
                warn!("{} at {} exceeds Excel's precision, storing as text", literal, addr);
                let idx = strings.intern_str(&literal);
                *suppressed |= IgnoredErrors::NUMBER_STORED_AS_TEXT;
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                    addr, style_attr, idx
                ));
            } else {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    addr, style_attr, literal
                ));
            }
        }
        CellValue::Date(dt) => {
            let serial = date_serial(dt).ok_or_else(|| {
                XlsxError::UnsupportedCellValue(format!(
                    "date {} at {} is outside 1900-01-01..9999-12-31",
                    dt, addr
                ))
            })?;
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><v>{}</v></c>",
                addr, style_attr, serial
            ));
        }
        CellValue::Formula(text) => {
            check_text(addr, "formula", text)?;
            let formula = text.strip_prefix('=').unwrap_or(text);
            content.push_str(&format!(
                "\n            <c r=\"{}\"{}><f>{}</f></c>",
                addr,
                style_attr,
                escape(formula)
            ));
        }
        CellValue::Boolean(b) => {
            content.push_str(&format!(
                "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                addr,
                style_attr,
                if *b { 1 } else { 0 }
            ));
        }
    }

    Ok(())
}

fn check_text(addr: CellAddress, kind: &str, s: &str) -> XlsxResult<()> {
    match invalid_char(s) {
        Some(c) => Err(XlsxError::UnsupportedCellValue(format!(
            "{} at {} contains U+{:04X}, which XML cannot represent",
            kind, addr, c as u32
        ))),
        None => Ok(()),
    }
}

/// Plain decimal literal without trailing zeros or exponent
fn number_literal(n: &Decimal) -> String {
    n.normalize().to_string()
}

/// OLE automation date: days since 1899-12-30, time as the fraction
fn date_serial(dt: &NaiveDateTime) -> Option<f64> {
    if !(1900..=9999).contains(&dt.year()) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = dt.date().signed_duration_since(epoch).num_days();
    let seconds = dt.time().num_seconds_from_midnight() as f64
        + dt.time().nanosecond() as f64 / 1_000_000_000.0;

    Some(days as f64 + seconds / 86_400.0)
}

fn write_sheet_views(content: &mut String, sheet_index: usize, panes: Option<&FreezePanes>) {
    let selected = if sheet_index == 0 {
        " tabSelected=\"1\""
    } else {
        ""
    };

    let Some(panes) = panes else {
        content.push_str(&format!(
            "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\"/>\n    </sheetViews>",
            selected
        ));
        return;
    };

    let active_pane = match (panes.rows > 0, panes.cols > 0) {
        (true, true) => "bottomRight",
        (true, false) => "bottomLeft",
        _ => "topRight",
    };

    let mut pane = String::from("<pane");
    if panes.cols > 0 {
        pane.push_str(&format!(" xSplit=\"{}\"", panes.cols));
    }
    if panes.rows > 0 {
        pane.push_str(&format!(" ySplit=\"{}\"", panes.rows));
    }
    pane.push_str(&format!(
        " topLeftCell=\"{}\" activePane=\"{}\" state=\"frozen\"/>",
        panes.top_left_cell(),
        active_pane
    ));

    content.push_str(&format!(
        "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\">\n            {}\n            <selection pane=\"{}\"/>\n        </sheetView>\n    </sheetViews>",
        selected, pane, active_pane
    ));
}

/// Custom widths, with runs of equal widths on adjacent columns in one `<col>`
fn write_cols(content: &mut String, worksheet: &Worksheet) {
    let widths = worksheet.custom_column_widths();
    if widths.is_empty() {
        return;
    }

    // (first col, last col, width), 0-based
    let mut groups: Vec<(u16, u16, f64)> = Vec::new();
    for (&col, &width) in widths {
        match groups.last_mut() {
            Some((_, last, w)) if *last + 1 == col && *w == width => *last = col,
            _ => groups.push((col, col, width)),
        }
    }

    content.push_str("\n    <cols>");
    for (first, last, width) in groups {
        content.push_str(&format!(
            "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
            first + 1,
            last + 1,
            width
        ));
    }
    content.push_str("\n    </cols>");
}

fn write_ignored_errors(content: &mut String, groups: &BTreeMap<u16, AddressSet>) {
    if groups.is_empty() {
        return;
    }

    content.push_str("\n    <ignoredErrors>");
    for (&bits, cells) in groups {
        let flags = IgnoredErrors::from_bits_truncate(bits);
        let attrs: String = flags
            .xml_attributes()
            .map(|name| format!(" {}=\"1\"", name))
            .collect();
        content.push_str(&format!(
            "\n        <ignoredError sqref=\"{}\"{}/>",
            ranges::sqref(cells),
            attrs
        ));
    }
    content.push_str("\n    </ignoredErrors>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_core::{CellRange, PageOrientation, Style};
    use std::str::FromStr;

    fn serialize(ws: &Worksheet) -> (SerializedSheet, SharedStrings, StyleRegistry) {
        serialize_with(ws, &WriterOptions::default())
    }

    fn serialize_with(
        ws: &Worksheet,
        options: &WriterOptions,
    ) -> (SerializedSheet, SharedStrings, StyleRegistry) {
        let mut strings = SharedStrings::new();
        let mut styles = StyleRegistry::new();
        let sheet = SheetSerializer::serialize(ws, 0, &mut strings, &mut styles, options).unwrap();
        (sheet, strings, styles)
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_sheet() {
        let (sheet, strings, _) = serialize(&Worksheet::new("Empty"));
        assert!(sheet.xml.contains("<dimension ref=\"A1\"/>"));
        assert!(sheet.xml.contains("<sheetData>\n    </sheetData>"));
        assert!(!sheet.xml.contains("<ignoredErrors>"));
        assert!(sheet.hyperlinks.is_empty());
        assert!(strings.is_empty());
    }

    #[test]
    fn test_cell_types() {
        let mut ws = Worksheet::new("Types");
        ws.set_cell("A1", Cell::text("Hello")).unwrap();
        ws.set_cell("B1", Cell::integer(42)).unwrap();
        ws.set_cell("C1", Cell::new(CellValue::Number(Decimal::new(1500, 3))))
            .unwrap();
        ws.set_cell("A2", Cell::formula("=SUM(B1:C1)")).unwrap();
        ws.set_cell("B2", Cell::boolean(true)).unwrap();
        ws.set_cell("C2", Cell::boolean(false)).unwrap();

        let (sheet, strings, _) = serialize(&ws);
        let xml = &sheet.xml;

        // "@" and "0" formats from the factories become styles 1 and 2
        assert!(xml.contains("<c r=\"A1\" s=\"1\" t=\"s\"><v>0</v></c>"));
        assert!(xml.contains("<c r=\"B1\" s=\"2\"><v>42</v></c>"));
        assert!(xml.contains("<c r=\"C1\"><v>1.5</v></c>"));
        assert!(xml.contains("<c r=\"A2\"><f>SUM(B1:C1)</f></c>"));
        assert!(xml.contains("<c r=\"B2\" t=\"b\"><v>1</v></c>"));
        assert!(xml.contains("<c r=\"C2\" t=\"b\"><v>0</v></c>"));
        assert!(xml.contains("<dimension ref=\"A1:C2\"/>"));
        assert_eq!(strings.get(0), Some("Hello"));
    }

    #[test]
    fn test_formula_escaping() {
        let mut ws = Worksheet::new("F");
        ws.set_cell("A1", Cell::formula("IF(B1<3,\"a&b\",\"\")")).unwrap();

        let (sheet, _, _) = serialize(&ws);
        assert!(sheet
            .xml
            .contains("<f>IF(B1&lt;3,&quot;a&amp;b&quot;,&quot;&quot;)</f>"));
    }

    #[test]
    fn test_date_serial() {
        assert_eq!(date_serial(&datetime(1900, 3, 1, 0, 0)), Some(61.0));
        assert_eq!(date_serial(&datetime(2024, 1, 15, 0, 0)), Some(45306.0));
        assert_eq!(date_serial(&datetime(2024, 1, 15, 18, 0)), Some(45306.75));
        assert_eq!(date_serial(&datetime(1899, 12, 31, 0, 0)), None);
        assert_eq!(date_serial(&datetime(10000, 1, 1, 0, 0)), None);
    }

    #[test]
    fn test_unsupported_date() {
        let mut ws = Worksheet::new("D");
        ws.set_cell("A1", Cell::date(datetime(1850, 6, 1, 0, 0))).unwrap();

        let mut strings = SharedStrings::new();
        let mut styles = StyleRegistry::new();
        let result = SheetSerializer::serialize(
            &ws,
            0,
            &mut strings,
            &mut styles,
            &WriterOptions::default(),
        );
        assert!(matches!(result, Err(XlsxError::UnsupportedCellValue(_))));
    }

    #[test]
    fn test_large_number_as_text() {
        let mut ws = Worksheet::new("Big");
        ws.set_cell("A1", Cell::integer(100_000_000_000)).unwrap();
        ws.set_cell("A2", Cell::integer(99_999_999_999)).unwrap();
        ws.set_cell("B1", Cell::integer(-100_000_000_000)).unwrap();

        let (sheet, strings, _) = serialize(&ws);
        let xml = &sheet.xml;

        assert_eq!(strings.get(0), Some("100000000000"));
        assert_eq!(strings.get(1), Some("-100000000000"));
        assert!(xml.contains("<v>99999999999</v>"));
        assert!(xml.contains(
            "<ignoredError sqref=\"A1:B1\" numberStoredAsText=\"1\"/>"
        ));
    }

    #[test]
    fn test_large_number_passthrough() {
        let mut ws = Worksheet::new("Big");
        ws.set_cell("A1", Cell::integer(100_000_000_000)).unwrap();

        let options = WriterOptions::new().with_large_number_handling(LargeNumberHandling::None);
        let (sheet, strings, _) = serialize_with(&ws, &options);

        assert!(strings.is_empty());
        assert!(sheet.xml.contains("<v>100000000000</v>"));
        assert!(!sheet.xml.contains("<ignoredErrors>"));
    }

    #[test]
    fn test_large_decimal_keeps_digits() {
        let mut ws = Worksheet::new("Big");
        let n = Decimal::from_str("123456789012345678.25").unwrap();
        ws.set_cell("A1", Cell::number(n)).unwrap();

        let (_, strings, _) = serialize(&ws);
        assert_eq!(strings.get(0), Some("123456789012345678.25"));
    }

    #[test]
    fn test_user_ignored_errors_grouped_by_flags() {
        let mut ws = Worksheet::new("Ignored");
        for addr in ["A1", "A2", "A3"] {
            ws.set_cell(
                addr,
                Cell::formula("B1").with_ignored_errors(IgnoredErrors::FORMULA),
            )
            .unwrap();
        }
        ws.set_cell(
            "C5",
            Cell::text("007").with_ignored_errors(IgnoredErrors::NUMBER_STORED_AS_TEXT),
        )
        .unwrap();

        let (sheet, _, _) = serialize(&ws);
        let xml = &sheet.xml;

        let stored = xml
            .find("<ignoredError sqref=\"C5\" numberStoredAsText=\"1\"/>")
            .unwrap();
        let formula = xml.find("<ignoredError sqref=\"A1:A3\" formula=\"1\"/>").unwrap();
        assert!(stored < formula, "groups are ordered by flag bits");
    }

    #[test]
    fn test_control_characters_rejected() {
        let cases = [
            Cell::text("bell\u{7}here"),
            Cell::formula("\"a\u{1}\"&B1"),
            Cell::text("fine").with_hyperlink("https://example.com/\u{0}"),
        ];
        for cell in cases {
            let mut ws = Worksheet::new("Ctl");
            ws.set_cell("B3", cell).unwrap();

            let mut strings = SharedStrings::new();
            let mut styles = StyleRegistry::new();
            let result = SheetSerializer::serialize(
                &ws,
                0,
                &mut strings,
                &mut styles,
                &WriterOptions::default(),
            );
            match result {
                Err(XlsxError::UnsupportedCellValue(msg)) => assert!(msg.contains("B3"), "{msg}"),
                other => panic!("expected UnsupportedCellValue, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_whitespace_controls_allowed() {
        let mut ws = Worksheet::new("Ws");
        ws.set_cell("A1", Cell::text("a\tb\r\nc")).unwrap();

        let (_, strings, _) = serialize(&ws);
        assert_eq!(strings.get(0), Some("a\tb\r\nc"));
    }

    #[test]
    fn test_check_styles() {
        let mut ws = Worksheet::new("Styled");
        ws.set_cell("A1", Cell::boolean(true).with_style(Style::new().with_bold(true)))
            .unwrap();
        ws.set_cell("A2", Cell::boolean(false).with_style(Style::new().with_italic(true)))
            .unwrap();

        let (sheet, _, styles) = serialize(&ws);
        assert_eq!(sheet.max_style_index, 2);
        sheet.check_styles(&styles).unwrap();

        // Paired with a registry that never saw these styles
        assert!(matches!(
            sheet.check_styles(&StyleRegistry::new()),
            Err(XlsxError::StructuralIntegrity(_))
        ));

        let (plain, _, _) = serialize(&Worksheet::new("Plain"));
        assert_eq!(plain.max_style_index, 0);
        plain.check_styles(&StyleRegistry::new()).unwrap();
    }

    #[test]
    fn test_style_attribute() {
        let mut ws = Worksheet::new("Styled");
        let bold = Style::new().with_bold(true);
        ws.set_cell("A1", Cell::boolean(true).with_style(bold.clone()))
            .unwrap();
        ws.set_cell("A2", Cell::boolean(true).with_style(bold)).unwrap();
        ws.set_cell("A3", Cell::boolean(true)).unwrap();

        let (sheet, _, styles) = serialize(&ws);
        assert_eq!(styles.len(), 2);
        assert!(sheet.xml.contains("<c r=\"A1\" s=\"1\" t=\"b\">"));
        assert!(sheet.xml.contains("<c r=\"A2\" s=\"1\" t=\"b\">"));
        assert!(sheet.xml.contains("<c r=\"A3\" t=\"b\">"));
    }

    #[test]
    fn test_hyperlinks() {
        let mut ws = Worksheet::new("Links");
        ws.set_cell("A1", Cell::text("Docs").with_hyperlink("https://example.com/docs"))
            .unwrap();
        ws.set_cell("A2", Cell::text("Home").with_hyperlink("https://example.com/"))
            .unwrap();

        let (sheet, _, _) = serialize(&ws);

        assert_eq!(sheet.hyperlinks.len(), 2);
        assert_eq!(sheet.hyperlinks[0].id, "rId1");
        assert_eq!(sheet.hyperlinks[1].target, "https://example.com/");
        assert!(sheet.xml.contains("<hyperlink ref=\"A1\" r:id=\"rId1\"/>"));
        assert!(sheet.xml.contains("<hyperlink ref=\"A2\" r:id=\"rId2\"/>"));
    }

    #[test]
    fn test_layout_elements() {
        let mut ws = Worksheet::new("Layout");
        ws.set_cell("A1", Cell::text("x")).unwrap();
        ws.set_column_width(0, 20.0).unwrap();
        ws.set_column_width(1, 20.0).unwrap();
        ws.set_column_width(2, 20.0).unwrap();
        ws.set_column_width(4, 8.5).unwrap();
        ws.merge_cells(&CellRange::parse("A1:C1").unwrap()).unwrap();
        ws.freeze_top_row();
        ws.set_orientation(PageOrientation::Landscape);

        let (sheet, _, _) = serialize(&ws);
        let xml = &sheet.xml;

        assert!(xml.contains("<col min=\"1\" max=\"3\" width=\"20\" customWidth=\"1\"/>"));
        assert!(xml.contains("<col min=\"5\" max=\"5\" width=\"8.5\" customWidth=\"1\"/>"));
        assert!(xml.contains("<mergeCell ref=\"A1:C1\"/>"));
        assert!(xml.contains(
            "<pane ySplit=\"1\" topLeftCell=\"A2\" activePane=\"bottomLeft\" state=\"frozen\"/>"
        ));
        assert!(xml.contains("<pageSetup orientation=\"landscape\"/>"));

        // CT_Worksheet element order
        let order = [
            "<dimension", "<sheetViews>", "<sheetFormatPr", "<cols>", "<sheetData>",
            "<mergeCells", "<pageMargins", "<pageSetup",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| xml.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
