//! XLSX writer

mod doc_props;

use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use log::debug;

use crate::error::XlsxResult;
use crate::options::WriterOptions;
use crate::package::{content_types, rel_types, Package, PackagePart, Relationship, RelationshipCounter};
use crate::shared_strings::SharedStrings;
use crate::sheet::SheetSerializer;
use crate::styles::StyleRegistry;
use crate::xml::{escape, RELATIONSHIPS_NS, SPREADSHEETML_NS, XML_DECLARATION};
use sheetsmith_core::Workbook;

const WORKBOOK_PATH: &str = "xl/workbook.xml";

/// XLSX file writer
///
/// Each call runs one assembly pass with its own string and style tables;
/// the workbook is only read.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    ///
    /// The whole package is built in memory first, so a failure never leaves
    /// a partial file behind.
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        Self::write_file_with_options(workbook, path, &WriterOptions::default())
    }

    /// Write a workbook to a file path with custom options
    pub fn write_file_with_options<P: AsRef<Path>>(
        workbook: &Workbook,
        path: P,
        options: &WriterOptions,
    ) -> XlsxResult<()> {
        let bytes = Self::assemble(workbook, options)?.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::write_with_options(workbook, writer, &WriterOptions::default())
    }

    /// Write a workbook to a writer with custom options
    pub fn write_with_options<W: Write + Seek>(
        workbook: &Workbook,
        writer: W,
        options: &WriterOptions,
    ) -> XlsxResult<()> {
        Self::assemble(workbook, options)?.write_to(writer)?;
        Ok(())
    }

    /// Write a workbook into memory
    pub fn to_bytes(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buf = Vec::new();
        Self::write(workbook, Cursor::new(&mut buf))?;
        Ok(buf)
    }

    /// Build every part and relationship of the workbook package
    pub fn assemble(workbook: &Workbook, options: &WriterOptions) -> XlsxResult<Package> {
        workbook.validate()?;

        let mut strings = SharedStrings::new();
        let mut styles = StyleRegistry::new();
        let mut package = Package::new().with_compression(options.compression);

        let mut root_ids = RelationshipCounter::new();
        package.add_relationship(
            None,
            Relationship::internal(root_ids.next_id(), rel_types::OFFICE_DOCUMENT, WORKBOOK_PATH),
        );

        let mut workbook_ids = RelationshipCounter::new();
        let mut sheet_rel_ids = Vec::with_capacity(workbook.sheet_count());

        // Worksheets
        for (i, sheet) in workbook.worksheets().enumerate() {
            let serialized =
                SheetSerializer::serialize(sheet, i, &mut strings, &mut styles, options)?;
            serialized.check_styles(&styles)?;

            let path = format!("xl/worksheets/sheet{}.xml", i + 1);
            package.add_part(PackagePart::new(
                path.as_str(),
                content_types::WORKSHEET,
                serialized.xml,
            ));
            for rel in serialized.hyperlinks {
                package.add_relationship(Some(path.as_str()), rel);
            }

            let rel_id = workbook_ids.next_id();
            package.add_relationship(
                Some(WORKBOOK_PATH),
                Relationship::internal(
                    rel_id.as_str(),
                    rel_types::WORKSHEET,
                    format!("worksheets/sheet{}.xml", i + 1),
                ),
            );
            sheet_rel_ids.push(rel_id);
        }

        package.add_part(PackagePart::new(
            WORKBOOK_PATH,
            content_types::WORKBOOK,
            Self::workbook_xml(workbook, &sheet_rel_ids),
        ));

        // Styles and shared strings, complete now that every sheet is written
        package.add_part(PackagePart::new(
            "xl/styles.xml",
            content_types::STYLES,
            styles.to_styles_xml(),
        ));
        package.add_relationship(
            Some(WORKBOOK_PATH),
            Relationship::internal(workbook_ids.next_id(), rel_types::STYLES, "styles.xml"),
        );

        package.add_part(PackagePart::new(
            "xl/sharedStrings.xml",
            content_types::SHARED_STRINGS,
            strings.to_xml(),
        ));
        package.add_relationship(
            Some(WORKBOOK_PATH),
            Relationship::internal(
                workbook_ids.next_id(),
                rel_types::SHARED_STRINGS,
                "sharedStrings.xml",
            ),
        );

        // Document properties
        package.add_part(PackagePart::new(
            "docProps/core.xml",
            content_types::CORE_PROPERTIES,
            doc_props::core_xml(workbook.settings(), &options.document_properties),
        ));
        package.add_relationship(
            None,
            Relationship::internal(
                root_ids.next_id(),
                rel_types::CORE_PROPERTIES,
                "docProps/core.xml",
            ),
        );
        package.add_part(PackagePart::new(
            "docProps/app.xml",
            content_types::EXTENDED_PROPERTIES,
            doc_props::app_xml(&options.document_properties),
        ));
        package.add_relationship(
            None,
            Relationship::internal(
                root_ids.next_id(),
                rel_types::EXTENDED_PROPERTIES,
                "docProps/app.xml",
            ),
        );

        debug!(
            "assembled {} sheets: {} unique strings ({} references), {} cell styles",
            workbook.sheet_count(),
            strings.unique_count(),
            strings.count(),
            styles.len()
        );

        Ok(package)
    }

    fn workbook_xml(workbook: &Workbook, sheet_rel_ids: &[String]) -> String {
        let mut content = String::from(XML_DECLARATION);
        content.push_str(&format!(
            "\n<workbook xmlns=\"{}\" xmlns:r=\"{}\">",
            SPREADSHEETML_NS, RELATIONSHIPS_NS
        ));
        content.push_str("\n    <bookViews>\n        <workbookView/>\n    </bookViews>");
        content.push_str("\n    <sheets>");

        for (i, (sheet, rel_id)) in workbook.worksheets().zip(sheet_rel_ids).enumerate() {
            content.push_str(&format!(
                "\n        <sheet name=\"{}\" sheetId=\"{}\" r:id=\"{}\"/>",
                escape(sheet.name()),
                i + 1,
                rel_id
            ));
        }

        content.push_str("\n    </sheets>\n</workbook>");
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XlsxError;
    use sheetsmith_core::{Cell, Worksheet};

    fn workbook() -> Workbook {
        let mut wb = Workbook::new();
        let sheet = wb.add_worksheet("Data & Notes").unwrap();
        sheet.set_cell("A1", Cell::text("Hello")).unwrap();
        sheet
            .set_cell("A2", Cell::text("Site").with_hyperlink("https://example.com"))
            .unwrap();
        wb.add_worksheet("Summary").unwrap();
        wb
    }

    #[test]
    fn test_assemble_relationships() {
        let package = XlsxWriter::assemble(&workbook(), &WriterOptions::default()).unwrap();
        package.validate().unwrap();

        let root: Vec<&str> = package
            .relationships(None)
            .iter()
            .map(|r| r.target.as_str())
            .collect();
        assert_eq!(root, vec![WORKBOOK_PATH, "docProps/core.xml", "docProps/app.xml"]);

        let workbook_rels = package.relationships(Some(WORKBOOK_PATH));
        let ids: Vec<&str> = workbook_rels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rId1", "rId2", "rId3", "rId4"]);

        assert_eq!(
            package.relationships(Some("xl/worksheets/sheet1.xml")).len(),
            1
        );
        assert!(package
            .relationships(Some("xl/worksheets/sheet2.xml"))
            .is_empty());
    }

    #[test]
    fn test_workbook_xml_escapes_names() {
        let wb = workbook();
        let xml = XlsxWriter::workbook_xml(&wb, &["rId1".to_string(), "rId2".to_string()]);
        assert!(xml.contains("<sheet name=\"Data &amp; Notes\" sheetId=\"1\" r:id=\"rId1\"/>"));
        assert!(xml.contains("<sheet name=\"Summary\" sheetId=\"2\" r:id=\"rId2\"/>"));
    }

    #[test]
    fn test_empty_workbook_rejected() {
        let result = XlsxWriter::to_bytes(&Workbook::new());
        assert!(matches!(
            result,
            Err(XlsxError::Core(sheetsmith_core::Error::NoWorksheets))
        ));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        XlsxWriter::write_file(&workbook(), &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"PK"));

        let archive = zip::ZipArchive::new(Cursor::new(written)).unwrap();
        assert!(archive.file_names().any(|n| n == "xl/worksheets/sheet2.xml"));
    }

    #[test]
    fn test_write_file_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();

        // Fails while building the package
        let mut bad = Workbook::new();
        bad.add_worksheet("Bad")
            .unwrap()
            .set_cell("A1", Cell::text("bell\u{7}here"))
            .unwrap();
        let path = dir.path().join("bad.xlsx");
        assert!(matches!(
            XlsxWriter::write_file(&bad, &path),
            Err(XlsxError::UnsupportedCellValue(_))
        ));
        assert!(!path.exists());

        // Fails at the file system
        let missing_dir = dir.path().join("no-such-dir").join("out.xlsx");
        assert!(matches!(
            XlsxWriter::write_file(&workbook(), &missing_dir),
            Err(XlsxError::Io(_))
        ));
        assert!(!missing_dir.exists());
    }

    #[test]
    fn test_invalid_sheet_name_never_reaches_package() {
        let mut wb = Workbook::new();
        assert!(wb.push_worksheet(Worksheet::new("bad/name")).is_err());
        wb.add_worksheet("ok").unwrap();

        let package = XlsxWriter::assemble(&wb, &WriterOptions::default()).unwrap();
        let sheets = package
            .parts()
            .iter()
            .filter(|p| p.path.starts_with("xl/worksheets/"))
            .count();
        assert_eq!(sheets, 1);
    }
}
