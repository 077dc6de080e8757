//! Workbook type - the main document structure

use ahash::AHashSet;

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters Excel does not allow in sheet names
const INVALID_SHEET_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// A workbook (spreadsheet document)
///
/// A workbook holds an ordered list of worksheets plus document settings.
/// It must contain at least one worksheet before it can be written.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Workbook settings
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create a new workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new, empty worksheet and return it for population
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.push_worksheet(Worksheet::new(name))
    }

    /// Add an existing worksheet to the workbook
    pub fn push_worksheet(&mut self, worksheet: Worksheet) -> Result<&mut Worksheet> {
        self.validate_new_name(worksheet.name(), None)?;
        self.worksheets.push(worksheet);
        let last = self.worksheets.len() - 1;
        Ok(&mut self.worksheets[last])
    }

    /// Remove a worksheet by index
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        Ok(self.worksheets.remove(index))
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.validate_new_name(new_name, Some(index))?;
        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get mutable workbook settings
    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }

    /// Check every workbook-level constraint
    ///
    /// At least one worksheet, every name valid, no two names equal
    /// (compared case-insensitively, as Excel does).
    pub fn validate(&self) -> Result<()> {
        if self.worksheets.is_empty() {
            return Err(Error::NoWorksheets);
        }

        let mut seen = AHashSet::with_capacity(self.worksheets.len());
        for sheet in &self.worksheets {
            validate_sheet_name(sheet.name())?;
            if !seen.insert(sheet.name().to_lowercase()) {
                return Err(Error::DuplicateSheetName(sheet.name().to_string()));
            }
        }
        Ok(())
    }

    fn validate_new_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        validate_sheet_name(name)?;

        let lower = name.to_lowercase();
        let duplicate = self
            .worksheets
            .iter()
            .enumerate()
            .any(|(i, ws)| Some(i) != exclude_index && ws.name().to_lowercase() == lower);
        if duplicate {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}

/// Validate a single sheet name
///
/// Names must be 1-31 characters, must not contain `: \ / ? * [ ]`, and
/// must not begin or end with an apostrophe.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("name cannot be empty".into()));
    }

    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "'{}' is longer than {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }

    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(Error::InvalidSheetName(format!(
            "'{}' contains invalid character '{}'",
            name, c
        )));
    }

    if let Some(c) = name.chars().find(|c| c.is_control()) {
        return Err(Error::InvalidSheetName(format!(
            "'{}' contains control character U+{:04X}",
            name.escape_debug(),
            c as u32
        )));
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::InvalidSheetName(format!(
            "'{}' cannot begin or end with an apostrophe",
            name
        )));
    }

    Ok(())
}

/// Document-level settings, written to the document properties parts
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookSettings {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
}
