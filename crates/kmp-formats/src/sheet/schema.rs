use crate::sheet::types::{SheetError, SheetField};
use std::collections::HashMap;

/// Column layout of one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSchema {
    /// Ordered list of columns
    fields: Vec<SheetField>,
    /// Column label to index mapping
    field_map: HashMap<String, usize>,
}

impl SheetSchema {
    /// Create a new schema from columns
    #[must_use]
    pub fn new(fields: Vec<SheetField>) -> Self {
        let field_map = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name.clone(), index))
            .collect();

        Self { fields, field_map }
    }

    /// Parse schema from a header line
    pub fn parse(header: &str) -> Result<Self, SheetError> {
        if header.trim().is_empty() {
            return Err(SheetError::InvalidHeader(
                "No fields found in header".to_string(),
            ));
        }

        let fields = header
            .split('|')
            .map(|spec| SheetField::parse(spec.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(fields))
    }

    /// Number of columns
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Column by index
    #[must_use]
    pub fn get_field(&self, index: usize) -> Option<&SheetField> {
        self.fields.get(index)
    }

    /// Column index by label
    #[must_use]
    pub fn get_field_index(&self, name: &str) -> Option<usize> {
        self.field_map.get(name).copied()
    }

    /// Check if schema has a column with the given label
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_map.contains_key(name)
    }

    /// All columns
    #[must_use]
    pub fn fields(&self) -> &[SheetField] {
        &self.fields
    }

    /// Column labels in order
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Format schema as a header line
    #[must_use]
    pub fn to_header(&self) -> String {
        self.fields
            .iter()
            .map(SheetField::to_spec)
            .collect::<Vec<_>>()
            .join("|")
    }
}
