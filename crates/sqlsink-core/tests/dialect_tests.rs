// Integration tests for upsert and DDL generation across dialects
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use sqlsink_core::dialect::{Dialect, DialectBuilder, PlaceholderStyle, SqlDialect};
use sqlsink_core::error::DialectError;
use sqlsink_core::schema::{ColumnDef, ColumnRef};
use sqlsink_core::types::LogicalType;
use sqlsink_core::{check_syntax, NoopObserver};

fn dialect(kind: SqlDialect) -> Arc<dyn Dialect> {
    DialectBuilder::new(kind)
        .observer(Arc::new(NoopObserver))
        .build()
        .unwrap()
}

fn orders() -> (Vec<ColumnRef>, Vec<ColumnRef>) {
    (
        vec![
            ColumnRef::new("qty", LogicalType::Int32),
            ColumnRef::new("price", LogicalType::Float64),
        ],
        vec![ColumnRef::new("order_id", LogicalType::Int64)],
    )
}

fn count_positional(sql: &str) -> usize {
    sql.matches('?').count()
}

#[test]
fn test_orders_scenario_postgres() {
    let (non_key, key) = orders();
    let stmt = dialect(SqlDialect::PostgreSQL)
        .upsert_statement_for("orders", &non_key, &key)
        .unwrap();

    assert_eq!(
        stmt.sql(),
        "INSERT INTO orders (qty,price,order_id) VALUES (?,?,?) \
         ON CONFLICT (order_id) DO UPDATE SET qty=EXCLUDED.qty,price=EXCLUDED.price"
    );
    let order: Vec<&str> = stmt.parameters().iter().map(|c| c.name()).collect();
    assert_eq!(order, vec!["qty", "price", "order_id"]);
}

#[test]
fn test_statement_shape_holds_for_every_dialect() {
    let (non_key, key) = orders();

    for kind in SqlDialect::ALL {
        let stmt = dialect(kind)
            .upsert_statement_for("orders", &non_key, &key)
            .unwrap();
        let sql = stmt.sql();

        assert_eq!(sql.matches("orders").count(), 1, "{kind}: {sql}");
        assert!(sql.contains("(qty,price,order_id)"), "{kind}: {sql}");
        assert_eq!(count_positional(sql), 3, "{kind}: {sql}");
        assert_eq!(stmt.placeholder_count(), 3);
        assert_eq!(stmt.parameters()[2].logical_type(), LogicalType::Int64);
    }
}

#[test]
fn test_placeholder_count_matches_columns() {
    let non_key: Vec<ColumnRef> = (0..7)
        .map(|i| ColumnRef::new(format!("c{}", i), LogicalType::String))
        .collect();
    let key = vec![
        ColumnRef::new("k1", LogicalType::Int32),
        ColumnRef::new("k2", LogicalType::Int32),
    ];

    for kind in SqlDialect::ALL {
        let stmt = dialect(kind)
            .upsert_statement_for("wide", &non_key, &key)
            .unwrap();
        assert_eq!(count_positional(stmt.sql()), 9, "{kind}");
        assert_eq!(stmt.placeholder_count(), 9);
    }
}

#[test]
fn test_identical_requests_yield_identical_sql() {
    let (non_key, key) = orders();
    for kind in SqlDialect::ALL {
        let first = dialect(kind)
            .upsert_statement_for("orders", &non_key, &key)
            .unwrap();
        let second = dialect(kind)
            .upsert_statement_for("orders", &non_key.clone(), &key.clone())
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_keys_only_never_emits_empty_update() {
    let key = vec![ColumnRef::new("id", LogicalType::Int64)];

    for kind in SqlDialect::ALL {
        let sql = dialect(kind)
            .upsert_statement_for("t", &[], &key)
            .unwrap()
            .into_sql();
        assert!(!sql.contains("SET  "), "{kind}: {sql}");
        assert!(!sql.trim_end().ends_with("SET"), "{kind}: {sql}");
        assert!(!sql.contains("WHEN MATCHED"), "{kind}: {sql}");
        assert_eq!(count_positional(&sql), 1);
    }

    let pg = dialect(SqlDialect::PostgreSQL)
        .upsert_statement_for("t", &[], &key)
        .unwrap();
    assert!(pg.sql().ends_with("ON CONFLICT (id) DO NOTHING"));
}

#[test]
fn test_invalid_requests_fail_for_every_dialect() {
    let (non_key, key) = orders();

    for kind in SqlDialect::ALL {
        let d = dialect(kind);
        assert_eq!(
            d.upsert_statement_for("orders", &non_key, &[]).unwrap_err(),
            DialectError::InvalidArgument("at least one key column required".to_string())
        );
        assert_eq!(
            d.upsert_statement_for(" \t", &non_key, &key).unwrap_err(),
            DialectError::InvalidArgument("table name required".to_string())
        );
    }
}

#[test]
fn test_every_type_has_a_stable_keyword() {
    for kind in SqlDialect::ALL {
        let d = dialect(kind);
        for logical_type in LogicalType::ALL {
            let first = d.type_name_for(logical_type).to_string();
            assert!(!first.is_empty(), "{kind} {logical_type}");
            assert_eq!(d.type_name_for(logical_type), first);
        }
    }
}

#[test]
fn test_generated_sql_parses() {
    let (non_key, key) = orders();
    let only_key = vec![ColumnRef::new("id", LogicalType::Int64)];

    // PostgreSQL's tokenizer treats `?` as an operator
    let pg = DialectBuilder::new(SqlDialect::PostgreSQL)
        .placeholders(PlaceholderStyle::Numbered)
        .build()
        .unwrap();
    let mysql = dialect(SqlDialect::MySQL);
    let sqlite = dialect(SqlDialect::SQLite);
    let mssql = dialect(SqlDialect::SqlServer);
    let mssql_numbered = DialectBuilder::new(SqlDialect::SqlServer)
        .placeholders(PlaceholderStyle::Numbered)
        .quote_identifiers(true)
        .build()
        .unwrap();
    let oracle = dialect(SqlDialect::Oracle);

    for d in [&pg, &mysql, &sqlite, &mssql, &mssql_numbered, &oracle] {
        let full = d.upsert_statement_for("orders", &non_key, &key).unwrap();
        assert_eq!(check_syntax(d.kind(), full.sql()).unwrap(), 1, "{}", full.sql());

        let keys_only = d.upsert_statement_for("seen", &[], &only_key).unwrap();
        assert_eq!(
            check_syntax(d.kind(), keys_only.sql()).unwrap(),
            1,
            "{}",
            keys_only.sql()
        );
    }
}

#[test]
fn test_generated_ddl_parses() {
    let non_key = vec![
        ColumnDef::new("qty", LogicalType::Int32),
        ColumnDef::new("note", LogicalType::String),
    ];
    let key = vec![ColumnDef::new("order_id", LogicalType::Int64)];

    for kind in SqlDialect::ALL {
        let sql = dialect(kind)
            .create_table_statement("orders", &non_key, &key)
            .unwrap();
        assert_eq!(check_syntax(kind, &sql).unwrap(), 1, "{sql}");
    }
}

#[test]
fn test_ddl_validation() {
    let d = dialect(SqlDialect::PostgreSQL);

    assert!(matches!(
        d.create_table_statement("", &[ColumnDef::new("a", LogicalType::Int8)], &[]),
        Err(DialectError::InvalidArgument(_))
    ));
    assert!(matches!(
        d.create_table_statement("t", &[], &[]),
        Err(DialectError::InvalidArgument(_))
    ));
    assert_eq!(
        d.create_table_statement(
            "t",
            &[ColumnDef::new("a", LogicalType::Int8)],
            &[ColumnDef::new("a", LogicalType::Int8)]
        )
        .unwrap_err(),
        DialectError::InvalidArgument("column a listed more than once".to_string())
    );
    assert_eq!(
        d.add_columns_statements("t", &[ColumnDef::new("b", LogicalType::Int8).not_null()])
            .unwrap_err(),
        DialectError::InvalidArgument(
            "column b must be nullable to be added to an existing table".to_string()
        )
    );
}

#[test]
fn test_shared_dialect_across_threads() {
    let shared = dialect(SqlDialect::SqlServer);
    let (non_key, key) = orders();
    let expected = shared
        .upsert_statement_for("orders", &non_key, &key)
        .unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let d = Arc::clone(&shared);
                let (non_key, key) = (&non_key, &key);
                scope.spawn(move || d.upsert_statement_for("orders", non_key, key).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
