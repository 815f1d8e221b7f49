use crate::sheet::schema::SheetSchema;
use crate::sheet::types::{SheetError, SheetValue};

/// A single row of cells
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    values: Vec<SheetValue>,
}

impl SheetRow {
    /// Parse raw cells against a schema
    pub fn parse(raw_values: &[&str], schema: &SheetSchema) -> Result<Self, SheetError> {
        if raw_values.len() != schema.field_count() {
            return Err(SheetError::FieldCountMismatch {
                expected: schema.field_count(),
                actual: raw_values.len(),
            });
        }

        let values = raw_values
            .iter()
            .zip(schema.fields())
            .map(|(raw, field)| SheetValue::parse(raw, field.field_type))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { values })
    }

    /// Create a row from pre-parsed values
    #[must_use]
    pub fn from_values(values: Vec<SheetValue>) -> Self {
        Self { values }
    }

    /// Cell by index
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SheetValue> {
        self.values.get(index)
    }

    /// Cell by column label
    #[must_use]
    pub fn get_by_name<'a>(&'a self, name: &str, schema: &SheetSchema) -> Option<&'a SheetValue> {
        schema
            .get_field_index(name)
            .and_then(|index| self.values.get(index))
    }

    /// All cells
    #[must_use]
    pub fn values(&self) -> &[SheetValue] {
        &self.values
    }

    /// Format row as a pipe-separated line
    #[must_use]
    pub fn to_line(&self) -> String {
        self.values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
