//! Error types

use miette::Diagnostic;
use thiserror::Error;

use crate::dialect::SqlDialect;
use crate::types::LogicalType;

/// Errors raised while configuring a dialect or building a statement
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DialectError {
    /// The caller handed over a request that cannot produce valid SQL
    #[error("invalid argument: {0}")]
    #[diagnostic(
        code(sqlsink::invalid_argument),
        help("check the table description; every upsert needs a table name and at least one key column")
    )]
    InvalidArgument(String),

    /// A dialect's type map does not cover every logical type
    #[error("{dialect} has no type mapping for {logical_type}")]
    #[diagnostic(code(sqlsink::missing_type_mapping))]
    MissingTypeMapping {
        dialect: SqlDialect,
        logical_type: LogicalType,
    },

    /// A type keyword is blank
    #[error("{dialect} maps {logical_type} to an empty type name")]
    #[diagnostic(
        code(sqlsink::invalid_type_mapping),
        help("type overrides must name a non-empty SQL type, e.g. string = \"VARCHAR(512)\"")
    )]
    InvalidTypeMapping {
        dialect: SqlDialect,
        logical_type: LogicalType,
    },

    /// The configured database family is not one of the built-in dialects
    #[error("unknown dialect: '{0}'")]
    #[diagnostic(
        code(sqlsink::unsupported_dialect),
        help("supported dialects: postgresql, mysql, sqlserver, oracle, sqlite")
    )]
    UnsupportedDialect(String),

    /// Generated text failed the parser self-check
    #[error("{dialect} statement does not parse: {message}")]
    #[diagnostic(code(sqlsink::syntax))]
    Syntax { dialect: SqlDialect, message: String },
}

impl DialectError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DialectError::InvalidArgument(message.into())
    }
}

/// Result type alias for dialect operations
pub type Result<T> = std::result::Result<T, DialectError>;
