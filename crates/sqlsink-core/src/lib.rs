//! sqlsink-core: dialect layer for database sinks
//!
//! Turns a database-agnostic description of a table write (table, key
//! columns, non-key columns, logical types) into vendor-specific upsert SQL
//! and column type keywords. Nothing here touches a connection.

pub mod config;
pub mod dialect;
pub mod error;
pub mod observe;
pub mod schema;
pub mod types;
pub mod verify;

pub use config::DialectConfig;
pub use dialect::{Dialect, DialectBuilder, DialectOptions, PlaceholderStyle, SqlDialect};
pub use error::{DialectError, Result};
pub use observe::{NoopObserver, StatementObserver, TracingObserver};
pub use schema::{ColumnDef, ColumnRef, UpsertRequest, UpsertStatement};
pub use types::{LogicalType, TypeMap};
pub use verify::check_syntax;
