//! SQL dialect support
//!
//! One [`Dialect`] implementation per database family. Each is immutable once
//! built and can be shared across threads behind an `Arc`.

mod builder;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;
mod sqlserver;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    Dialect as ParserDialect, GenericDialect, MsSqlDialect, MySqlDialect as MySqlParser,
    PostgreSqlDialect, SQLiteDialect,
};

use crate::error::{DialectError, Result};
use crate::observe::StatementObserver;
use crate::schema::{check_column_names, check_table_name, ColumnDef, ColumnRef};
use crate::schema::{UpsertRequest, UpsertStatement};
use crate::types::{LogicalType, TypeMap};

pub use builder::DialectBuilder;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;
pub(crate) use sqlserver::MERGE_TABLE_HINT;

/// Supported database families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    PostgreSQL,
    MySQL,
    SqlServer,
    Oracle,
    SQLite,
}

impl SqlDialect {
    pub const ALL: [SqlDialect; 5] = [
        SqlDialect::PostgreSQL,
        SqlDialect::MySQL,
        SqlDialect::SqlServer,
        SqlDialect::Oracle,
        SqlDialect::SQLite,
    ];

    /// Names accepted by `from_str`, canonical name first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SqlDialect::PostgreSQL => &["postgresql", "postgres", "pg"],
            SqlDialect::MySQL => &["mysql", "mariadb"],
            SqlDialect::SqlServer => &["sqlserver", "mssql"],
            SqlDialect::Oracle => &["oracle"],
            SqlDialect::SQLite => &["sqlite", "sqlite3"],
        }
    }

    /// Get the sqlparser dialect used to check generated statements
    pub fn parser_dialect(&self) -> Box<dyn ParserDialect> {
        match self {
            SqlDialect::PostgreSQL => Box::new(PostgreSqlDialect {}),
            SqlDialect::MySQL => Box::new(MySqlParser {}),
            SqlDialect::SqlServer => Box::new(MsSqlDialect {}),
            SqlDialect::Oracle => Box::new(GenericDialect {}),
            SqlDialect::SQLite => Box::new(SQLiteDialect {}),
        }
    }

    /// Built-in type map for this family
    pub fn default_type_map(&self) -> Result<TypeMap> {
        match self {
            SqlDialect::PostgreSQL => PostgresDialect::default_type_map(),
            SqlDialect::MySQL => MySqlDialect::default_type_map(),
            SqlDialect::SqlServer => SqlServerDialect::default_type_map(),
            SqlDialect::Oracle => OracleDialect::default_type_map(),
            SqlDialect::SQLite => SqliteDialect::default_type_map(),
        }
    }

    /// Build this family's dialect with default options
    pub fn dialect(&self) -> Result<Arc<dyn Dialect>> {
        DialectBuilder::new(*self).build()
    }
}

impl FromStr for SqlDialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        SqlDialect::ALL
            .into_iter()
            .find(|d| d.aliases().contains(&lower.as_str()))
            .ok_or_else(|| DialectError::UnsupportedDialect(s.to_string()))
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aliases()[0])
    }
}

/// How parameter placeholders are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `?` for every parameter
    #[default]
    Positional,
    /// The family's numbered form (`$1`, `@P1`, `:1`, `?1`); MySQL keeps `?`
    Numbered,
}

/// Statement rendering options fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialectOptions {
    /// Quote every identifier instead of emitting names verbatim
    #[serde(default)]
    pub quote_identifiers: bool,
    #[serde(default)]
    pub placeholders: PlaceholderStyle,
}

/// State shared by every dialect implementation
#[derive(Debug, Clone)]
pub struct DialectParts {
    pub(crate) type_map: TypeMap,
    pub(crate) options: DialectOptions,
    pub(crate) observer: Arc<dyn StatementObserver>,
}

/// Capability interface implemented once per database family
pub trait Dialect: Send + Sync + fmt::Debug {
    fn kind(&self) -> SqlDialect;

    fn parts(&self) -> &DialectParts;

    /// Quote a single identifier, doubling embedded quote characters
    fn quote_identifier(&self, name: &str) -> String;

    /// 1-based numbered placeholder in this family's syntax
    fn numbered_placeholder(&self, index: usize) -> String;

    /// Implementation hook: render upsert SQL for an already validated request.
    ///
    /// Does not notify the observer. Callers go through
    /// [`upsert_statement_for`](Dialect::upsert_statement_for) or
    /// [`upsert_statement`](Dialect::upsert_statement) instead.
    #[doc(hidden)]
    fn build_upsert(&self, request: &UpsertRequest) -> String;

    /// Native column type keyword for a logical type
    fn type_name_for(&self, logical_type: LogicalType) -> &str {
        self.parts().type_map.type_name(logical_type)
    }

    fn type_map(&self) -> &TypeMap {
        &self.parts().type_map
    }

    fn options(&self) -> DialectOptions {
        self.parts().options
    }

    /// Identifier as it appears in statements
    fn identifier(&self, name: &str) -> String {
        if self.options().quote_identifiers {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Table name as it appears in statements; dotted names are quoted per segment
    fn table_name(&self, table: &str) -> String {
        if self.options().quote_identifiers {
            table
                .split('.')
                .map(|segment| self.quote_identifier(segment))
                .collect::<Vec<_>>()
                .join(".")
        } else {
            table.to_string()
        }
    }

    fn placeholder(&self, index: usize) -> String {
        match self.options().placeholders {
            PlaceholderStyle::Positional => "?".to_string(),
            PlaceholderStyle::Numbered => self.numbered_placeholder(index),
        }
    }

    /// Validate the inputs and build an upsert statement.
    ///
    /// Values must be bound in the order of [`UpsertStatement::parameters`]:
    /// the non-key columns followed by the key columns.
    fn upsert_statement_for(
        &self,
        table: &str,
        non_key_columns: &[ColumnRef],
        key_columns: &[ColumnRef],
    ) -> Result<UpsertStatement> {
        let request = UpsertRequest::new(table, non_key_columns.to_vec(), key_columns.to_vec())?;
        Ok(self.upsert_statement(&request))
    }

    /// Build the statement for a request that was validated by `UpsertRequest::new`
    /// and report it to the observer
    fn upsert_statement(&self, request: &UpsertRequest) -> UpsertStatement {
        let sql = self.build_upsert(request);
        self.parts().observer.statement_prepared(self.kind(), &sql);
        UpsertStatement::new(sql, request.parameter_order())
    }

    /// `name TYPE NULL|NOT NULL`
    fn column_definition(&self, column: &ColumnDef) -> String {
        format!(
            "{} {} {}",
            self.identifier(&column.name),
            self.type_name_for(column.logical_type),
            if column.nullable { "NULL" } else { "NOT NULL" }
        )
    }

    /// CREATE TABLE with non-key columns first, then key columns (always NOT
    /// NULL) and a PRIMARY KEY over the key columns when there are any
    fn create_table_statement(
        &self,
        table: &str,
        non_key_columns: &[ColumnDef],
        key_columns: &[ColumnDef],
    ) -> Result<String> {
        check_table_name(table)?;
        if non_key_columns.is_empty() && key_columns.is_empty() {
            return Err(DialectError::invalid_argument("at least one column required"));
        }
        check_column_names(
            non_key_columns
                .iter()
                .chain(key_columns)
                .map(|c| c.name.as_str()),
        )?;

        let mut lines: Vec<String> = non_key_columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();
        lines.extend(
            key_columns
                .iter()
                .map(|c| self.column_definition(&c.clone().not_null())),
        );
        if !key_columns.is_empty() {
            let keys = key_columns
                .iter()
                .map(|c| self.identifier(&c.name))
                .collect::<Vec<_>>()
                .join(",");
            lines.push(format!("PRIMARY KEY({})", keys));
        }

        let sql = format!(
            "CREATE TABLE {} (\n  {})",
            self.table_name(table),
            lines.join(",\n  ")
        );
        self.parts().observer.statement_prepared(self.kind(), &sql);
        Ok(sql)
    }

    /// ALTER TABLE statements adding nullable columns to an existing table
    fn add_columns_statements(&self, table: &str, columns: &[ColumnDef]) -> Result<Vec<String>> {
        check_table_name(table)?;
        if columns.is_empty() {
            return Err(DialectError::invalid_argument("at least one column required"));
        }
        check_column_names(columns.iter().map(|c| c.name.as_str()))?;
        if let Some(column) = columns.iter().find(|c| !c.nullable) {
            return Err(DialectError::invalid_argument(format!(
                "column {} must be nullable to be added to an existing table",
                column.name
            )));
        }

        let definitions: Vec<String> = columns.iter().map(|c| self.column_definition(c)).collect();
        let statements = self.render_add_columns(&self.table_name(table), &definitions);
        for sql in &statements {
            self.parts().observer.statement_prepared(self.kind(), sql);
        }
        Ok(statements)
    }

    /// Render ALTER TABLE text for validated column definitions
    fn render_add_columns(&self, table: &str, definitions: &[String]) -> Vec<String> {
        let adds = definitions
            .iter()
            .map(|d| format!("ADD COLUMN {}", d))
            .collect::<Vec<_>>()
            .join(",");
        vec![format!("ALTER TABLE {} {}", table, adds)]
    }
}

/// Comma-join identifiers, optionally prefixed with a row alias
pub(crate) fn column_list<'a>(
    dialect: &dyn Dialect,
    columns: impl Iterator<Item = &'a ColumnRef>,
    alias: Option<&str>,
) -> String {
    columns
        .map(|c| match alias {
            Some(alias) => format!("{}.{}", alias, dialect.identifier(c.name())),
            None => dialect.identifier(c.name()),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// `?,?,?` or the numbered equivalent, one per column
pub(crate) fn placeholder_list(dialect: &dyn Dialect, count: usize) -> String {
    (1..=count)
        .map(|i| dialect.placeholder(i))
        .collect::<Vec<_>>()
        .join(",")
}
