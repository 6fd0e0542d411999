//! PostgreSQL dialect
//!
//! Upserts use `INSERT ... ON CONFLICT (keys) DO UPDATE`, reading the proposed
//! row through `EXCLUDED`.

use super::{column_list, placeholder_list, Dialect, DialectParts, SqlDialect};
use crate::error::Result;
use crate::schema::UpsertRequest;
use crate::types::{LogicalType, TypeMap};

#[derive(Debug, Clone)]
pub struct PostgresDialect {
    parts: DialectParts,
}

impl PostgresDialect {
    pub(crate) fn from_parts(parts: DialectParts) -> Self {
        Self { parts }
    }

    pub fn default_type_map() -> Result<TypeMap> {
        TypeMap::new(
            SqlDialect::PostgreSQL,
            [
                (LogicalType::Int8, "SMALLINT"),
                (LogicalType::Int16, "SMALLINT"),
                (LogicalType::Int32, "INT"),
                (LogicalType::Int64, "BIGINT"),
                (LogicalType::Float32, "FLOAT"),
                (LogicalType::Float64, "DOUBLE PRECISION"),
                (LogicalType::Boolean, "BOOLEAN"),
                (LogicalType::String, "TEXT"),
                (LogicalType::Bytes, "BYTEA"),
            ],
        )
    }
}

impl Dialect for PostgresDialect {
    fn kind(&self) -> SqlDialect {
        SqlDialect::PostgreSQL
    }

    fn parts(&self) -> &DialectParts {
        &self.parts
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn numbered_placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn build_upsert(&self, request: &UpsertRequest) -> String {
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO",
            self.table_name(request.table()),
            column_list(self, request.columns(), None),
            placeholder_list(self, request.column_count()),
            column_list(self, request.key_columns().iter(), None),
        );

        if request.non_key_columns().is_empty() {
            // Every column is part of the key: insert if absent
            sql.push_str(" NOTHING");
        } else {
            let update_set = request
                .non_key_columns()
                .iter()
                .map(|c| {
                    let name = self.identifier(c.name());
                    format!("{}=EXCLUDED.{}", name, name)
                })
                .collect::<Vec<_>>()
                .join(",");
            sql.push_str(&format!(" UPDATE SET {}", update_set));
        }

        sql
    }
}
