//! Dialect construction

use std::sync::Arc;

use indexmap::IndexMap;

use super::{
    Dialect, DialectOptions, DialectParts, MySqlDialect, OracleDialect, PlaceholderStyle,
    PostgresDialect, SqlDialect, SqlServerDialect, SqliteDialect,
};
use crate::error::Result;
use crate::observe::{StatementObserver, TracingObserver};
use crate::types::LogicalType;

/// Builds a shared, immutable [`Dialect`].
///
/// All validation happens in [`build`](DialectBuilder::build): an incomplete
/// or blank type mapping is reported there, never while building statements.
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    kind: SqlDialect,
    options: DialectOptions,
    type_overrides: IndexMap<LogicalType, String>,
    observer: Arc<dyn StatementObserver>,
}

impl DialectBuilder {
    pub fn new(kind: SqlDialect) -> Self {
        Self {
            kind,
            options: DialectOptions::default(),
            type_overrides: IndexMap::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn options(mut self, options: DialectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn quote_identifiers(mut self, quote: bool) -> Self {
        self.options.quote_identifiers = quote;
        self
    }

    pub fn placeholders(mut self, style: PlaceholderStyle) -> Self {
        self.options.placeholders = style;
        self
    }

    /// Replace the built-in keyword for one logical type
    pub fn type_override(mut self, logical_type: LogicalType, type_name: impl Into<String>) -> Self {
        self.type_overrides.insert(logical_type, type_name.into());
        self
    }

    pub fn type_overrides(mut self, overrides: IndexMap<LogicalType, String>) -> Self {
        self.type_overrides.extend(overrides);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn StatementObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Result<Arc<dyn Dialect>> {
        let type_map = self
            .kind
            .default_type_map()?
            .with_overrides(&self.type_overrides)?;

        tracing::debug!(
            dialect = %self.kind,
            quote_identifiers = self.options.quote_identifiers,
            placeholders = ?self.options.placeholders,
            overrides = self.type_overrides.len(),
            "dialect built"
        );

        let parts = DialectParts {
            type_map,
            options: self.options,
            observer: self.observer,
        };

        Ok(match self.kind {
            SqlDialect::PostgreSQL => Arc::new(PostgresDialect::from_parts(parts)),
            SqlDialect::MySQL => Arc::new(MySqlDialect::from_parts(parts)),
            SqlDialect::SqlServer => Arc::new(SqlServerDialect::from_parts(parts)),
            SqlDialect::Oracle => Arc::new(OracleDialect::from_parts(parts)),
            SqlDialect::SQLite => Arc::new(SqliteDialect::from_parts(parts)),
        })
    }
}
