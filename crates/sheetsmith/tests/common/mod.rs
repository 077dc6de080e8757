//! Helpers for inspecting written packages

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use sheetsmith::prelude::*;

/// Write a workbook into memory
pub fn write(wb: &Workbook) -> Vec<u8> {
    let mut buf = Vec::new();
    XlsxWriter::write(wb, Cursor::new(&mut buf)).unwrap();
    buf
}

/// Names of all entries, sorted
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

/// Contents of one entry
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn attributes(e: &BytesStart<'_>) -> HashMap<String, String> {
    e.attributes()
        .map(|a| {
            let a = a.unwrap();
            (
                String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                a.unescape_value().unwrap().into_owned(),
            )
        })
        .collect()
}

/// Attributes of every element named `name`, in document order
pub fn elements(xml: &str, name: &str) -> Vec<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut found = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes() => {
                found.push(attributes(&e));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    found
}

/// Text of each `<si><t>` entry of a shared string table
pub fn shared_strings(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut in_t = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"t" => {
                strings.push(String::new());
                in_t = true;
            }
            Event::Text(t) if in_t => {
                if let Some(last) = strings.last_mut() {
                    last.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) if e.name().as_ref() == b"t" => in_t = false,
            Event::Eof => break,
            _ => {}
        }
    }
    strings
}

/// A `<c>` element of a worksheet
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CellXml {
    pub r: String,
    pub t: Option<String>,
    pub s: Option<String>,
    pub v: Option<String>,
    pub f: Option<String>,
}

/// All cells of a worksheet part, in document order
pub fn cells(xml: &str) -> Vec<CellXml> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut cells = Vec::new();
    let mut current: Option<CellXml> = None;
    let mut tag: Vec<u8> = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"c" => current = Some(cell_from(&e)),
            Event::Empty(e) if e.name().as_ref() == b"c" => cells.push(cell_from(&e)),
            Event::Start(e) => tag = e.name().as_ref().to_vec(),
            Event::Text(t) => {
                if let Some(cell) = current.as_mut() {
                    let text = t.unescape().unwrap().into_owned();
                    match tag.as_slice() {
                        b"v" => cell.v = Some(text),
                        b"f" => cell.f = Some(text),
                        _ => {}
                    }
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"c" {
                    cells.extend(current.take());
                }
                tag.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    cells
}

/// The cell at `r`, which must exist
pub fn cell(xml: &str, r: &str) -> CellXml {
    cells(xml)
        .into_iter()
        .find(|c| c.r == r)
        .unwrap_or_else(|| panic!("no cell {r}"))
}

fn cell_from(e: &BytesStart<'_>) -> CellXml {
    let mut attrs = attributes(e);
    CellXml {
        r: attrs.remove("r").unwrap_or_default(),
        t: attrs.remove("t"),
        s: attrs.remove("s"),
        ..CellXml::default()
    }
}
