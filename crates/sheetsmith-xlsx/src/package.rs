//! OPC package assembly
//!
//! A [`Package`] collects parts and the relationships between them, checks
//! that the graph is consistent, and only then writes the zip container. The
//! content-type manifest (`[Content_Types].xml`) and the `.rels` parts are
//! generated from what was added, so they cannot drift from the parts
//! themselves.

use std::io::{Cursor, Seek, Write};

use ahash::AHashSet;
use log::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::options::Compression;
use crate::xml::{escape, XML_DECLARATION};

/// Content types of the parts a workbook package contains
pub mod content_types {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// Relationship type URIs
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const WORKSHEET: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SHARED_STRINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}

const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const PACKAGE_RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// A named entry in the package
#[derive(Debug, Clone, PartialEq)]
pub struct PackagePart {
    /// Path inside the zip, without a leading `/` (e.g. `xl/workbook.xml`)
    pub path: String,
    /// MIME content type; a part without one fails validation
    pub content_type: Option<String>,
    /// Raw bytes
    pub content: Vec<u8>,
}

impl PackagePart {
    /// Create a part with a content type
    pub fn new<P, C>(path: P, content_type: &str, content: C) -> Self
    where
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        Self {
            path: path.into(),
            content_type: Some(content_type.to_string()),
            content: content.into(),
        }
    }
}

/// Whether a relationship target is another part or an outside resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

/// A typed link from a source part (or the package root) to a target
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Id, unique within the source's relationship part (e.g. `rId1`)
    pub id: String,
    /// Relationship type URI (see [`rel_types`])
    pub rel_type: String,
    /// Target path relative to the source's directory, or a URI when external
    pub target: String,
    pub target_mode: TargetMode,
}

impl Relationship {
    /// Relationship to another part of the package
    pub fn internal<I, T>(id: I, rel_type: &str, target: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            rel_type: rel_type.to_string(),
            target: target.into(),
            target_mode: TargetMode::Internal,
        }
    }

    /// Relationship to a resource outside the package
    pub fn external<I, T>(id: I, rel_type: &str, target: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Self {
            target_mode: TargetMode::External,
            ..Self::internal(id, rel_type, target)
        }
    }
}

/// Hands out `rId1`, `rId2`, ... for one relationship scope
#[derive(Debug, Clone, Default)]
pub struct RelationshipCounter {
    issued: u32,
}

impl RelationshipCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id
    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("rId{}", self.issued)
    }
}

#[derive(Debug, Clone)]
struct RelationshipScope {
    /// `None` for the package root
    source: Option<String>,
    relationships: Vec<Relationship>,
}

/// An OPC package under construction
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<PackagePart>,
    scopes: Vec<RelationshipScope>,
    compression: Compression,
}

impl Package {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression used for every entry
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Add a part
    ///
    /// A leading `/` in the path is dropped. Conflicts are reported by
    /// [`Package::validate`], not here.
    pub fn add_part(&mut self, mut part: PackagePart) {
        if let Some(stripped) = part.path.strip_prefix('/') {
            part.path = stripped.to_string();
        }
        self.parts.push(part);
    }

    /// Add a relationship from `source` (a part path, or `None` for the
    /// package root)
    pub fn add_relationship(&mut self, source: Option<&str>, relationship: Relationship) {
        let source = source.map(|s| s.trim_start_matches('/').to_string());
        match self.scopes.iter_mut().find(|s| s.source == source) {
            Some(scope) => scope.relationships.push(relationship),
            None => self.scopes.push(RelationshipScope {
                source,
                relationships: vec![relationship],
            }),
        }
    }

    /// Parts added so far
    pub fn parts(&self) -> &[PackagePart] {
        &self.parts
    }

    /// Relationships whose source is `source`
    pub fn relationships(&self, source: Option<&str>) -> &[Relationship] {
        let source = source.map(|s| s.trim_start_matches('/'));
        self.scopes
            .iter()
            .find(|s| s.source.as_deref() == source)
            .map(|s| s.relationships.as_slice())
            .unwrap_or(&[])
    }

    /// Check the package for referential integrity
    ///
    /// Every part needs a content type and a unique path; every relationship
    /// source must be a part; every internal target must resolve to a part;
    /// ids must be unique within a scope.
    pub fn validate(&self) -> XlsxResult<()> {
        let mut paths: AHashSet<&str> = AHashSet::with_capacity(self.parts.len());

        for part in &self.parts {
            if part.content_type.is_none() {
                return Err(integrity(format!("part '{}' has no content type", part.path)));
            }
            if part.path == CONTENT_TYPES_PATH || is_relationships_path(&part.path) {
                return Err(integrity(format!(
                    "part '{}' collides with a generated part",
                    part.path
                )));
            }
            if !paths.insert(part.path.as_str()) {
                return Err(integrity(format!("duplicate part '{}'", part.path)));
            }
        }

        for scope in &self.scopes {
            let source = scope.source.as_deref();
            let label = source.unwrap_or("package root");

            if let Some(path) = source {
                if !paths.contains(path) {
                    return Err(integrity(format!(
                        "relationship source '{}' is not a part",
                        path
                    )));
                }
            }

            let mut ids: AHashSet<&str> = AHashSet::with_capacity(scope.relationships.len());
            for rel in &scope.relationships {
                if !ids.insert(rel.id.as_str()) {
                    return Err(integrity(format!(
                        "duplicate relationship id '{}' in {}",
                        rel.id, label
                    )));
                }

                if rel.target_mode == TargetMode::External {
                    continue;
                }

                let resolved = resolve_target(source, &rel.target);
                if !resolved.as_deref().is_some_and(|p| paths.contains(p)) {
                    return Err(integrity(format!(
                        "relationship {} in {} points to missing part '{}'",
                        rel.id, label, rel.target
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validate, then write the zip container
    ///
    /// Nothing is written when validation fails.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> XlsxResult<W> {
        self.validate()?;

        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(self.compression.zip_method());

        write_entry(&mut zip, options, CONTENT_TYPES_PATH, self.content_types_xml().as_bytes())?;

        let root_rels = relationships_xml(self.relationships(None));
        write_entry(&mut zip, options, "_rels/.rels", root_rels.as_bytes())?;

        for part in &self.parts {
            write_entry(&mut zip, options, &part.path, &part.content)?;
        }

        for scope in &self.scopes {
            if let Some(source) = &scope.source {
                let xml = relationships_xml(&scope.relationships);
                write_entry(&mut zip, options, &relationships_path(source), xml.as_bytes())?;
            }
        }

        Ok(zip.finish()?)
    }

    /// Validate and write into memory
    pub fn to_bytes(&self) -> XlsxResult<Vec<u8>> {
        let cursor = self.write_to(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&format!("\n<Types xmlns=\"{}\">", CONTENT_TYPES_NS));
        xml.push_str(&format!(
            "\n    <Default Extension=\"rels\" ContentType=\"{}\"/>",
            content_types::RELATIONSHIPS
        ));
        xml.push_str(&format!(
            "\n    <Default Extension=\"xml\" ContentType=\"{}\"/>",
            content_types::XML
        ));

        for part in &self.parts {
            if let Some(content_type) = &part.content_type {
                xml.push_str(&format!(
                    "\n    <Override PartName=\"/{}\" ContentType=\"{}\"/>",
                    escape(&part.path),
                    escape(content_type)
                ));
            }
        }

        xml.push_str("\n</Types>");
        xml
    }
}

fn integrity(message: String) -> XlsxError {
    XlsxError::StructuralIntegrity(message)
}

fn write_entry<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    options: zip::write::SimpleFileOptions,
    path: &str,
    content: &[u8],
) -> XlsxResult<()> {
    zip.start_file(path, options)?;
    zip.write_all(content)?;
    debug!("wrote {} ({} bytes)", path, content.len());
    Ok(())
}

fn relationships_xml(relationships: &[Relationship]) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(&format!("\n<Relationships xmlns=\"{}\">", PACKAGE_RELATIONSHIPS_NS));

    for rel in relationships {
        let mode = match rel.target_mode {
            TargetMode::Internal => "",
            TargetMode::External => " TargetMode=\"External\"",
        };
        xml.push_str(&format!(
            "\n    <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"{}/>",
            escape(&rel.id),
            escape(&rel.rel_type),
            escape(&rel.target),
            mode
        ));
    }

    xml.push_str("\n</Relationships>");
    xml
}

fn is_relationships_path(path: &str) -> bool {
    path.ends_with(".rels")
}

/// `xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`
fn relationships_path(source: &str) -> String {
    match source.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", source),
    }
}

/// Resolve a relationship target against its source's directory
///
/// Returns `None` when the target climbs above the package root.
fn resolve_target(source: Option<&str>, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    let target = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            if let Some((dir, _)) = source.and_then(|s| s.rsplit_once('/')) {
                segments.extend(dir.split('/'));
            }
            target
        }
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}
