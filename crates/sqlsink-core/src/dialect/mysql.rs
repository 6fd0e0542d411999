//! MySQL / MariaDB dialect

use super::{column_list, placeholder_list, Dialect, DialectParts, SqlDialect};
use crate::error::Result;
use crate::schema::UpsertRequest;
use crate::types::{LogicalType, TypeMap};

/// MySQL dialect.
///
/// `ON DUPLICATE KEY UPDATE` fires on any unique index, not only the key
/// columns named in the request; the target table's unique indexes must match
/// the key for the upsert to behave as intended.
#[derive(Debug, Clone)]
pub struct MySqlDialect {
    parts: DialectParts,
}

impl MySqlDialect {
    pub(crate) fn from_parts(parts: DialectParts) -> Self {
        Self { parts }
    }

    pub fn default_type_map() -> Result<TypeMap> {
        TypeMap::new(
            SqlDialect::MySQL,
            [
                (LogicalType::Int8, "TINYINT"),
                (LogicalType::Int16, "SMALLINT"),
                (LogicalType::Int32, "INT"),
                (LogicalType::Int64, "BIGINT"),
                (LogicalType::Float32, "FLOAT"),
                (LogicalType::Float64, "DOUBLE"),
                (LogicalType::Boolean, "TINYINT"),
                (LogicalType::String, "VARCHAR(256)"),
                (LogicalType::Bytes, "VARBINARY(1024)"),
            ],
        )
    }
}

impl Dialect for MySqlDialect {
    fn kind(&self) -> SqlDialect {
        SqlDialect::MySQL
    }

    fn parts(&self) -> &DialectParts {
        &self.parts
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn numbered_placeholder(&self, _index: usize) -> String {
        // The client protocol only knows positional markers
        "?".to_string()
    }

    fn build_upsert(&self, request: &UpsertRequest) -> String {
        let assignments = if request.non_key_columns().is_empty() {
            // No-op assignment keeps the existing row; INSERT IGNORE would also
            // swallow unrelated errors such as truncation
            let key = self.identifier(request.key_columns()[0].name());
            format!("{}={}", key, key)
        } else {
            request
                .non_key_columns()
                .iter()
                .map(|c| {
                    let name = self.identifier(c.name());
                    format!("{}=VALUES({})", name, name)
                })
                .collect::<Vec<_>>()
                .join(",")
        };

        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {}",
            self.table_name(request.table()),
            column_list(self, request.columns(), None),
            placeholder_list(self, request.column_count()),
            assignments
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{DialectBuilder, PlaceholderStyle};
    use crate::schema::{ColumnDef, ColumnRef};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_upsert_query() {
        let dialect = DialectBuilder::new(SqlDialect::MySQL).build().unwrap();
        let stmt = dialect
            .upsert_statement_for(
                "orders",
                &[
                    ColumnRef::new("qty", LogicalType::Int32),
                    ColumnRef::new("price", LogicalType::Float64),
                ],
                &[ColumnRef::new("order_id", LogicalType::Int64)],
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO orders (qty,price,order_id) VALUES (?,?,?) \
             ON DUPLICATE KEY UPDATE qty=VALUES(qty),price=VALUES(price)"
        );
    }

    #[test]
    fn test_build_upsert_query_pk_only() {
        let dialect = DialectBuilder::new(SqlDialect::MySQL).build().unwrap();
        let stmt = dialect
            .upsert_statement_for(
                "tags",
                &[],
                &[
                    ColumnRef::new("post_id", LogicalType::Int64),
                    ColumnRef::new("tag", LogicalType::String),
                ],
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO tags (post_id,tag) VALUES (?,?) ON DUPLICATE KEY UPDATE post_id=post_id"
        );
    }

    #[test]
    fn test_numbered_style_stays_positional() {
        let dialect = DialectBuilder::new(SqlDialect::MySQL)
            .placeholders(PlaceholderStyle::Numbered)
            .quote_identifiers(true)
            .build()
            .unwrap();
        let stmt = dialect
            .upsert_statement_for(
                "order",
                &[ColumnRef::new("desc", LogicalType::String)],
                &[ColumnRef::new("id", LogicalType::Int64)],
            )
            .unwrap();
        assert_eq!(
            stmt.sql(),
            "INSERT INTO `order` (`desc`,`id`) VALUES (?,?) ON DUPLICATE KEY UPDATE `desc`=VALUES(`desc`)"
        );
    }

    #[test]
    fn test_quote_ident() {
        let dialect = DialectBuilder::new(SqlDialect::MySQL).build().unwrap();
        assert_eq!(dialect.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_add_columns() {
        let dialect = DialectBuilder::new(SqlDialect::MySQL).build().unwrap();
        let statements = dialect
            .add_columns_statements("orders", &[ColumnDef::new("note", LogicalType::String)])
            .unwrap();
        assert_eq!(statements, vec!["ALTER TABLE orders ADD COLUMN note VARCHAR(256) NULL"]);
    }
}
