//! SQLite dialect
//!
//! Uses the `ON CONFLICT ... DO UPDATE` upsert clause (SQLite 3.24+) rather
//! than `INSERT OR REPLACE`, which deletes the old row and resets any column
//! not named in the statement.

use super::{column_list, placeholder_list, Dialect, DialectParts, SqlDialect};
use crate::error::Result;
use crate::schema::UpsertRequest;
use crate::types::{LogicalType, TypeMap};

#[derive(Debug, Clone)]
pub struct SqliteDialect {
    parts: DialectParts,
}

impl SqliteDialect {
    pub(crate) fn from_parts(parts: DialectParts) -> Self {
        Self { parts }
    }

    pub fn default_type_map() -> Result<TypeMap> {
        TypeMap::new(
            SqlDialect::SQLite,
            [
                (LogicalType::Int8, "INTEGER"),
                (LogicalType::Int16, "INTEGER"),
                (LogicalType::Int32, "INTEGER"),
                (LogicalType::Int64, "INTEGER"),
                (LogicalType::Float32, "REAL"),
                (LogicalType::Float64, "REAL"),
                (LogicalType::Boolean, "NUMERIC"),
                (LogicalType::String, "TEXT"),
                (LogicalType::Bytes, "BLOB"),
            ],
        )
    }
}

impl Dialect for SqliteDialect {
    fn kind(&self) -> SqlDialect {
        SqlDialect::SQLite
    }

    fn parts(&self) -> &DialectParts {
        &self.parts
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn numbered_placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn build_upsert(&self, request: &UpsertRequest) -> String {
        let action = if request.non_key_columns().is_empty() {
            "NOTHING".to_string()
        } else {
            let update_set = request
                .non_key_columns()
                .iter()
                .map(|c| {
                    let name = self.identifier(c.name());
                    format!("{}=excluded.{}", name, name)
                })
                .collect::<Vec<_>>()
                .join(",");
            format!("UPDATE SET {}", update_set)
        };

        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO {}",
            self.table_name(request.table()),
            column_list(self, request.columns(), None),
            placeholder_list(self, request.column_count()),
            column_list(self, request.key_columns().iter(), None),
            action
        )
    }

    /// SQLite adds one column per ALTER TABLE
    fn render_add_columns(&self, table: &str, definitions: &[String]) -> Vec<String> {
        definitions
            .iter()
            .map(|d| format!("ALTER TABLE {} ADD COLUMN {}", table, d))
            .collect()
    }
}
