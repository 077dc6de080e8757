//! Writer configuration

use chrono::{DateTime, Utc};

/// Options controlling how a workbook is written
#[derive(Debug, Clone, Default)]
pub struct WriterOptions {
    /// What to do with numbers Excel would display imprecisely
    pub large_number_handling: LargeNumberHandling,
    /// Compression applied to every zip entry
    pub compression: Compression,
    /// Values for the document properties parts
    pub document_properties: DocumentProperties,
}

impl WriterOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set large number handling
    pub fn with_large_number_handling(mut self, handling: LargeNumberHandling) -> Self {
        self.large_number_handling = handling;
        self
    }

    /// Set zip compression
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set document properties
    pub fn with_document_properties(mut self, properties: DocumentProperties) -> Self {
        self.document_properties = properties;
        self
    }
}

/// Treatment of numbers beyond +/-99,999,999,999
///
/// Excel keeps 15 significant digits and switches to scientific notation for
/// wide values, so such numbers are stored as text by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LargeNumberHandling {
    /// Write the number as a shared string and suppress the
    /// "number stored as text" warning for its cell
    #[default]
    StoreAsText,
    /// Write the number unchanged
    None,
}

/// Zip entry compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate (smaller files)
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    pub(crate) fn zip_method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Values written to `docProps/app.xml` and `docProps/core.xml`
///
/// Title and author come from the workbook's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    /// Application name recorded in `app.xml`
    pub application: String,
    /// Creation/modification timestamp; the current time when `None`
    pub created: Option<DateTime<Utc>>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            application: "sheetsmith".to_string(),
            created: None,
        }
    }
}
