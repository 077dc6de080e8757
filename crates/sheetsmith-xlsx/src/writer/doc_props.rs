//! Document properties parts (`docProps/core.xml`, `docProps/app.xml`)

use chrono::{DateTime, Utc};

use crate::options::DocumentProperties;
use crate::xml::{escape, XML_DECLARATION};
use sheetsmith_core::WorkbookSettings;

pub(crate) fn core_xml(settings: &WorkbookSettings, properties: &DocumentProperties) -> String {
    let timestamp = w3cdtf(properties.created.unwrap_or_else(Utc::now));

    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        r#"
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );

    if let Some(title) = &settings.title {
        xml.push_str(&format!("\n    <dc:title>{}</dc:title>", escape(title)));
    }
    if let Some(author) = &settings.author {
        xml.push_str(&format!("\n    <dc:creator>{}</dc:creator>", escape(author)));
        xml.push_str(&format!(
            "\n    <cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            escape(author)
        ));
    }
    xml.push_str(&format!(
        "\n    <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>",
        timestamp
    ));
    xml.push_str(&format!(
        "\n    <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
        timestamp
    ));

    xml.push_str("\n</cp:coreProperties>");
    xml
}

pub(crate) fn app_xml(properties: &DocumentProperties) -> String {
    format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>{}</Application>
</Properties>"#,
        XML_DECLARATION,
        escape(&properties.application)
    )
}

fn w3cdtf(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
