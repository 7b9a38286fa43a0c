use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::field::FieldSpec;

fn default_columns() -> u32 {
    1
}

/// One titled group of fields. `columns` is a layout hint only and carries
/// no validation semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_columns")]
    pub columns: u32,
    pub fields: Vec<FieldSpec>,
}

/// Top-level form definition: an ordered sequence of sections.
///
/// Field ids must be unique across the whole schema because the value
/// store is keyed by id. [`FormSchema::new`] enforces this; a schema
/// deserialized directly from JSON is unchecked until the caller runs
/// [`FormSchema::ensure_unique_ids`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSchema {
    pub sections: Vec<Section>,
}

/// Errors raised by schema construction.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("duplicate field id '{0}'")]
    DuplicateId(String),
    #[error("unknown field id '{0}'")]
    UnknownField(String),
    #[error("field '{0}' is not an attachment field")]
    NotAttachment(String),
}

impl FormSchema {
    /// Builds a schema, rejecting duplicate field ids.
    pub fn new(sections: Vec<Section>) -> Result<Self, SchemaError> {
        let schema = Self { sections };
        schema.ensure_unique_ids()?;
        Ok(schema)
    }

    /// Verifies that every field id appears exactly once.
    pub fn ensure_unique_ids(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in self.fields() {
            if !seen.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateId(field.id.clone()));
            }
        }
        Ok(())
    }

    /// Iterates every field across all sections in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Looks a field up by id.
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.id == id)
    }
}
