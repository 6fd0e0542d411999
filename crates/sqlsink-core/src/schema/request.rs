//! Upsert requests and the statements built from them

use std::collections::HashSet;

use serde::Serialize;

use super::ColumnRef;
use crate::error::{DialectError, Result};

/// A validated description of one upsert: target table, non-key columns and
/// the key columns that form the conflict target.
///
/// Built fresh per write batch by the caller; dialects never retain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertRequest {
    table: String,
    non_key_columns: Vec<ColumnRef>,
    key_columns: Vec<ColumnRef>,
}

impl UpsertRequest {
    /// Validate and build a request.
    ///
    /// Fails before any SQL is produced when the table name is blank, there is
    /// no key column, a column name is blank, or a name appears twice across
    /// both lists.
    pub fn new(
        table: impl Into<String>,
        non_key_columns: Vec<ColumnRef>,
        key_columns: Vec<ColumnRef>,
    ) -> Result<Self> {
        let table = table.into();
        check_table_name(&table)?;

        if key_columns.is_empty() {
            return Err(DialectError::invalid_argument(
                "at least one key column required",
            ));
        }

        check_column_names(non_key_columns.iter().chain(&key_columns).map(ColumnRef::name))?;

        Ok(Self {
            table,
            non_key_columns,
            key_columns,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn non_key_columns(&self) -> &[ColumnRef] {
        &self.non_key_columns
    }

    pub fn key_columns(&self) -> &[ColumnRef] {
        &self.key_columns
    }

    /// Columns in statement order: non-key columns, then key columns
    pub fn columns(&self) -> impl Iterator<Item = &ColumnRef> {
        self.non_key_columns.iter().chain(&self.key_columns)
    }

    /// Bind order for the statement's placeholders
    pub fn parameter_order(&self) -> Vec<ColumnRef> {
        self.columns().cloned().collect()
    }

    pub fn column_count(&self) -> usize {
        self.non_key_columns.len() + self.key_columns.len()
    }
}

pub(crate) fn check_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(DialectError::invalid_argument("table name required"));
    }
    Ok(())
}

/// Names must be non-blank and unique across every list they come from
pub(crate) fn check_column_names<'a>(names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(DialectError::invalid_argument("column name required"));
        }
        if !seen.insert(name) {
            return Err(DialectError::invalid_argument(format!(
                "column {} listed more than once",
                name
            )));
        }
    }
    Ok(())
}

/// Upsert SQL text together with the order in which values must be bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsertStatement {
    sql: String,
    parameters: Vec<ColumnRef>,
}

impl UpsertStatement {
    pub(crate) fn new(sql: String, parameters: Vec<ColumnRef>) -> Self {
        Self { sql, parameters }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Columns whose values fill placeholders 1..=n, in order
    pub fn parameters(&self) -> &[ColumnRef] {
        &self.parameters
    }

    pub fn placeholder_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}
