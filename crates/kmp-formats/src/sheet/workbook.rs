use crate::sheet::document::Sheet;
use crate::sheet::types::SheetError;
use std::fmt;

/// An ordered set of sheets plus the container version
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    version: Option<u32>,
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Version from the `## version = N` directive
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Set the version directive
    pub fn set_version(&mut self, version: u32) {
        self.version = Some(version);
    }

    /// Append a sheet; names must be unique
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<(), SheetError> {
        if self.sheet(sheet.name()).is_some() {
            return Err(SheetError::DuplicateSheet(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(())
    }

    /// Sheet by name
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    /// All sheets in order
    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }
}

impl fmt::Display for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = self.version {
            writeln!(f, "## version = {version}")?;
        }
        for sheet in &self.sheets {
            write!(f, "{sheet}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::sheet::schema::SheetSchema;
    use crate::sheet::types::{SheetField, SheetType};

    fn sheet(name: &str) -> Sheet {
        Sheet::new(
            name,
            SheetSchema::new(vec![SheetField::new("Lap", SheetType::Dec(1))]),
        )
    }

    #[test]
    fn test_sheet_lookup() {
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet("KTPT")).expect("Test operation should succeed");
        workbook.add_sheet(sheet("STGI")).expect("Test operation should succeed");

        assert_eq!(workbook.sheet_names(), vec!["KTPT", "STGI"]);
        assert!(workbook.sheet("STGI").is_some());
        assert!(workbook.sheet("CAME").is_none());
    }

    #[test]
    fn test_duplicate_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_sheet(sheet("KTPT")).expect("Test operation should succeed");
        assert!(matches!(
            workbook.add_sheet(sheet("KTPT")),
            Err(SheetError::DuplicateSheet(_))
        ));
    }

    #[test]
    fn test_display() {
        let mut workbook = Workbook::new();
        workbook.set_version(2520);
        workbook.add_sheet(sheet("STGI")).expect("Test operation should succeed");
        assert_eq!(
            workbook.to_string(),
            "## version = 2520\n## sheet = STGI\nLap!DEC:1\n"
        );
    }
}
