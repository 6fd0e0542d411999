//! Column descriptions

use serde::{Deserialize, Serialize};

use crate::types::LogicalType;

/// A column name plus its logical type.
///
/// The name is used as given: it must already be a valid identifier for the
/// target database, or be quoted by the dialect (see `quote_identifiers`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    name: String,
    #[serde(rename = "type")]
    logical_type: LogicalType,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logical_type(&self) -> LogicalType {
        self.logical_type
    }
}

/// Column definition used for CREATE/ALTER TABLE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnDef {
    /// A nullable column
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            nullable: true,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl From<&ColumnDef> for ColumnRef {
    fn from(def: &ColumnDef) -> Self {
        ColumnRef::new(def.name.clone(), def.logical_type)
    }
}
