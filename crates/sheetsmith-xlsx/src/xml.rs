//! Small helpers shared by the part writers

use std::borrow::Cow;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const SPREADSHEETML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Escape text for use in element content or a double-quoted attribute
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// First character that XML 1.0 cannot carry, even escaped
///
/// Tab, line feed and carriage return are the only control characters
/// allowed in a document.
pub(crate) fn invalid_char(s: &str) -> Option<char> {
    s.chars().find(|&c| {
        matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    })
}
