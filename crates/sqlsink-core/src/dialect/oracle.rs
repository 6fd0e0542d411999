//! Oracle dialect

use super::{column_list, Dialect, DialectParts, SqlDialect};
use crate::error::Result;
use crate::schema::UpsertRequest;
use crate::types::{LogicalType, TypeMap};

// Oracle rejects AS before table aliases
const TARGET_ALIAS: &str = "target";
const SOURCE_ALIAS: &str = "incoming";

/// Oracle dialect: `MERGE` against a one-row `SELECT ... FROM dual`.
///
/// Statements carry no trailing semicolon; the JDBC/OCI drivers reject it.
#[derive(Debug, Clone)]
pub struct OracleDialect {
    parts: DialectParts,
}

impl OracleDialect {
    pub(crate) fn from_parts(parts: DialectParts) -> Self {
        Self { parts }
    }

    pub fn default_type_map() -> Result<TypeMap> {
        TypeMap::new(
            SqlDialect::Oracle,
            [
                (LogicalType::Int8, "NUMBER(3,0)"),
                (LogicalType::Int16, "NUMBER(5,0)"),
                (LogicalType::Int32, "NUMBER(10,0)"),
                (LogicalType::Int64, "NUMBER(19,0)"),
                (LogicalType::Float32, "BINARY_FLOAT"),
                (LogicalType::Float64, "BINARY_DOUBLE"),
                (LogicalType::Boolean, "NUMBER(1,0)"),
                (LogicalType::String, "VARCHAR2(4000)"),
                (LogicalType::Bytes, "BLOB"),
            ],
        )
    }
}

impl Dialect for OracleDialect {
    fn kind(&self) -> SqlDialect {
        SqlDialect::Oracle
    }

    fn parts(&self) -> &DialectParts {
        &self.parts
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn numbered_placeholder(&self, index: usize) -> String {
        format!(":{}", index)
    }

    fn build_upsert(&self, request: &UpsertRequest) -> String {
        let source_row = request
            .columns()
            .enumerate()
            .map(|(i, c)| format!("{} {}", self.placeholder(i + 1), self.identifier(c.name())))
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
            "MERGE INTO {} {} USING (SELECT {} FROM dual) {} ON ({})",
            self.table_name(request.table()),
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

        sql.push_str(&format!(
            " WHEN NOT MATCHED THEN INSERT ({}) VALUES ({})",
            column_list(self, request.columns(), None),
            column_list(self, request.columns(), Some(SOURCE_ALIAS)),
        ));

        sql
    }

    fn render_add_columns(&self, table: &str, definitions: &[String]) -> Vec<String> {
        vec![format!("ALTER TABLE {} ADD({})", table, definitions.join(","))]
    }
}
