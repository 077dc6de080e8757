//! Shared string table (`xl/sharedStrings.xml`)

use ahash::AHashMap;
use log::trace;

use crate::xml::{escape, SPREADSHEETML_NS, XML_DECLARATION};

/// Deduplicating string table
///
/// Indices are assigned in first-seen order and never change, so cells can
/// reference a string as soon as it is interned.
#[derive(Debug, Default)]
pub struct SharedStrings {
    /// Unique strings, position is the shared index
    strings: Vec<String>,
    /// Reverse lookup
    index: AHashMap<String, u32>,
    /// Total number of references handed out
    count: u64,
}

impl SharedStrings {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a possibly-absent string; `None` is stored as `""`
    pub fn intern(&mut self, value: Option<&str>) -> u32 {
        self.intern_str(value.unwrap_or(""))
    }

    /// Intern a string, returning its shared index
    pub fn intern_str(&mut self, value: &str) -> u32 {
        self.count += 1;

        if let Some(&idx) = self.index.get(value) {
            return idx;
        }

        let idx = self.strings.len() as u32;
        self.strings.push(value.to_string());
        self.index.insert(value.to_string(), idx);
        trace!("shared string {} added ({} bytes)", idx, value.len());
        idx
    }

    /// Number of distinct strings
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    /// Number of intern calls
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Whether nothing has been interned
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Look up a string by index
    pub fn get(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(String::as_str)
    }

    /// Render the `sst` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.strings.len() * 24);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            "\n<sst xmlns=\"{}\" count=\"{}\" uniqueCount=\"{}\">",
            SPREADSHEETML_NS,
            self.count,
            self.strings.len()
        ));

        for s in &self.strings {
            if needs_space_preserve(s) {
                xml.push_str("<si><t xml:space=\"preserve\">");
            } else {
                xml.push_str("<si><t>");
            }
            xml.push_str(&escape(s));
            xml.push_str("</t></si>");
        }

        xml.push_str("</sst>");
        xml
    }
}

fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}
