//! SQL Server dialect
//!
//! Upserts are a single `MERGE` against a one-row source built from the bound
//! parameters. `HOLDLOCK` serializes concurrent merges on the same key.

use super::{column_list, Dialect, DialectParts, SqlDialect};
use crate::error::Result;
use crate::schema::UpsertRequest;
use crate::types::{LogicalType, TypeMap};

/// Placed between the MERGE target and its alias
pub(crate) const MERGE_TABLE_HINT: &str = " WITH (HOLDLOCK)";

const TARGET_ALIAS: &str = "target";
const SOURCE_ALIAS: &str = "incoming";

#[derive(Debug, Clone)]
pub struct SqlServerDialect {
    parts: DialectParts,
}

impl SqlServerDialect {
    pub(crate) fn from_parts(parts: DialectParts) -> Self {
        Self { parts }
    }

    pub fn default_type_map() -> Result<TypeMap> {
        TypeMap::new(
            SqlDialect::SqlServer,
            [
                // TINYINT is unsigned in SQL Server
                (LogicalType::Int8, "SMALLINT"),
                (LogicalType::Int16, "SMALLINT"),
                (LogicalType::Int32, "INT"),
                (LogicalType::Int64, "BIGINT"),
                (LogicalType::Float32, "REAL"),
                (LogicalType::Float64, "FLOAT"),
                (LogicalType::Boolean, "BIT"),
                (LogicalType::String, "NVARCHAR(4000)"),
                (LogicalType::Bytes, "VARBINARY(MAX)"),
            ],
        )
    }
}

impl Dialect for SqlServerDialect {
    fn kind(&self) -> SqlDialect {
        SqlDialect::SqlServer
    }

    fn parts(&self) -> &DialectParts {
        &self.parts
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn numbered_placeholder(&self, index: usize) -> String {
        format!("@P{}", index)
    }

    fn build_upsert(&self, request: &UpsertRequest) -> String {
        let source_row = request
            .columns()
            .enumerate()
            .map(|(i, c)| format!("{} AS {}", self.placeholder(i + 1), self.identifier(c.name())))
            .collect::<Vec<_>>()
            .join(",");

        let join_condition = request
            .key_columns()
            .iter()
            .map(|c| {
                let name = self.identifier(c.name());
                format!("{}.{}={}.{}", TARGET_ALIAS, name, SOURCE_ALIAS, name)
            })
            .collect::<Vec<_>>()
            .join(" AND ");

        let mut sql = format!(
            "MERGE INTO {}{} AS {} USING (SELECT {}) AS {} ON ({})",
            self.table_name(request.table()),
            MERGE_TABLE_HINT,
            TARGET_ALIAS,
            source_row,
            SOURCE_ALIAS,
            join_condition
        );

        if !request.non_key_columns().is_empty() {
            let update_set = request
                .non_key_columns()
                .iter()
                .map(|c| {
                    let name = self.identifier(c.name());
                    format!("{}.{}={}.{}", TARGET_ALIAS, name, SOURCE_ALIAS, name)
                })
                .collect::<Vec<_>>()
                .join(",");
            sql.push_str(&format!(" WHEN MATCHED THEN UPDATE SET {}", update_set));
        }

        // MERGE must be terminated
        sql.push_str(&format!(
            " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({});",
            column_list(self, request.columns(), None),
            column_list(self, request.columns(), Some(SOURCE_ALIAS)),
        ));

        sql
    }

    fn render_add_columns(&self, table: &str, definitions: &[String]) -> Vec<String> {
        vec![format!("ALTER TABLE {} ADD {}", table, definitions.join(","))]
    }
}
