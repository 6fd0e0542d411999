//! Diagnostic hook for generated statements

use std::fmt;

use crate::dialect::SqlDialect;

/// Receives every statement a dialect prepares.
///
/// Injected at construction so callers choose where diagnostics go. The
/// statement text is informational only; nothing relies on it for correctness.
pub trait StatementObserver: Send + Sync + fmt::Debug {
    fn statement_prepared(&self, dialect: SqlDialect, sql: &str);
}

/// Emits each statement as a `tracing` debug event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StatementObserver for TracingObserver {
    fn statement_prepared(&self, dialect: SqlDialect, sql: &str) {
        tracing::debug!(dialect = %dialect, sql = %sql, "prepared statement");
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StatementObserver for NoopObserver {
    fn statement_prepared(&self, _dialect: SqlDialect, _sql: &str) {}
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::dialect::DialectBuilder;
    use crate::schema::{ColumnRef, UpsertRequest};
    use crate::types::LogicalType;

    #[derive(Debug, Default)]
    struct RecordingObserver {
        seen: Mutex<Vec<(SqlDialect, String)>>,
    }

    impl StatementObserver for RecordingObserver {
        fn statement_prepared(&self, dialect: SqlDialect, sql: &str) {
            self.seen.lock().unwrap().push((dialect, sql.to_string()));
        }
    }

    #[test]
    fn test_observer_sees_generated_statement() {
        let observer = Arc::new(RecordingObserver::default());
        let dialect = DialectBuilder::new(SqlDialect::SQLite)
            .observer(observer.clone())
            .build()
            .unwrap();

        let stmt = dialect
            .upsert_statement_for("t", &[], &[ColumnRef::new("id", LogicalType::Int64)])
            .unwrap();

        let seen = observer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], (SqlDialect::SQLite, stmt.sql().to_string()));
    }

    #[test]
    fn test_observer_not_called_on_invalid_request() {
        let observer = Arc::new(RecordingObserver::default());
        let dialect = DialectBuilder::new(SqlDialect::MySQL)
            .observer(observer.clone())
            .build()
            .unwrap();

        assert!(dialect.upsert_statement_for("t", &[], &[]).is_err());
        assert!(observer.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_observer_sees_prevalidated_request() {
        let observer = Arc::new(RecordingObserver::default());
        let dialect = DialectBuilder::new(SqlDialect::SqlServer)
            .observer(observer.clone())
            .build()
            .unwrap();
        let request = UpsertRequest::new(
            "orders",
            vec![ColumnRef::new("qty", LogicalType::Int32)],
            vec![ColumnRef::new("order_id", LogicalType::Int64)],
        )
        .unwrap();

        let stmt = dialect.upsert_statement(&request);

        let seen = observer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], (SqlDialect::SqlServer, stmt.sql().to_string()));
        assert_eq!(stmt.parameters(), request.parameter_order().as_slice());
    }
}
