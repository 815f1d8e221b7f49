use crate::sheet::row::SheetRow;
use crate::sheet::schema::SheetSchema;
use crate::sheet::types::{SheetError, SheetField, SheetValue};
use std::fmt;

/// A named table with a schema and rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    schema: SheetSchema,
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Create an empty sheet
    #[must_use]
    pub fn new(name: impl Into<String>, schema: SheetSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    /// Sheet name, e.g. `ENPT+ENPH`
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column layout
    #[must_use]
    pub fn schema(&self) -> &SheetSchema {
        &self.schema
    }

    /// Add a row
    pub fn add_row(&mut self, row: SheetRow) -> Result<(), SheetError> {
        if row.len() != self.schema.field_count() {
            return Err(SheetError::FieldCountMismatch {
                expected: self.schema.field_count(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Add a row from raw cell text
    pub fn add_raw_row(&mut self, values: &[&str]) -> Result<(), SheetError> {
        let row = SheetRow::parse(values, &self.schema)?;
        self.rows.push(row);
        Ok(())
    }

    /// All rows
    #[must_use]
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Row by index
    #[must_use]
    pub fn get_row(&self, index: usize) -> Option<&SheetRow> {
        self.rows.get(index)
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## sheet = {}", self.name)?;
        writeln!(f, "{}", self.schema.to_header())?;
        for row in &self.rows {
            writeln!(f, "{}", row.to_line())?;
        }
        Ok(())
    }
}

/// Builder for sheets whose rows are assembled cell by cell
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    name: String,
    fields: Vec<SheetField>,
    rows: Vec<Vec<SheetValue>>,
}

impl SheetBuilder {
    /// Start a sheet with the given columns
    pub fn new(name: impl Into<String>, fields: Vec<SheetField>) -> Self {
        Self {
            name: name.into(),
            fields,
            rows: Vec::new(),
        }
    }

    /// Add a row of values
    pub fn add_row(&mut self, values: Vec<SheetValue>) -> Result<&mut Self, SheetError> {
        if values.len() != self.fields.len() {
            return Err(SheetError::FieldCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(self)
    }

    /// Build the sheet
    #[must_use]
    pub fn build(self) -> Sheet {
        Sheet {
            name: self.name,
            schema: SheetSchema::new(self.fields),
            rows: self.rows.into_iter().map(SheetRow::from_values).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::sheet::types::SheetType;

    fn fields() -> Vec<SheetField> {
        vec![
            SheetField::new("Lap", SheetType::Dec(1)),
            SheetField::new("Speed Factor", SheetType::Float(4)),
        ]
    }

    #[test]
    fn test_builder_and_display() {
        let mut builder = SheetBuilder::new("STGI", fields());
        builder
            .add_row(vec![SheetValue::Dec(3), SheetValue::Float(1.0)])
            .expect("Test operation should succeed");
        let sheet = builder.build();

        assert_eq!(sheet.name(), "STGI");
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(
            sheet.to_string(),
            "## sheet = STGI\nLap!DEC:1|Speed Factor!FLOAT:4\n3|1\n"
        );
    }

    #[test]
    fn test_builder_field_count() {
        let mut builder = SheetBuilder::new("STGI", fields());
        assert!(builder.add_row(vec![SheetValue::Dec(3)]).is_err());
    }

    #[test]
    fn test_add_raw_row() {
        let mut sheet = Sheet::new("STGI", SheetSchema::new(fields()));
        sheet
            .add_raw_row(&["5", "0.5"])
            .expect("Test operation should succeed");
        assert!(!sheet.is_empty());
        assert_eq!(
            sheet.get_row(0).and_then(|r| r.get(1)),
            Some(&SheetValue::Float(0.5))
        );
        assert!(sheet.add_raw_row(&["5"]).is_err());
    }
}
