//! Parser self-check for generated statements

use std::borrow::Cow;

use sqlparser::parser::Parser;

use crate::dialect::{SqlDialect, MERGE_TABLE_HINT};
use crate::error::{DialectError, Result};

/// Parse `sql` with the family's sqlparser dialect and return the number of
/// statements it contains.
///
/// Known parser gaps:
/// - PostgreSQL's parser reads `?` as an operator, so PostgreSQL output should
///   be checked with numbered placeholders.
/// - sqlparser has no grammar for a table hint between the MERGE target and
///   its alias, so SQL Server text is parsed with `WITH (HOLDLOCK)` removed.
///   The hint itself is not checked.
/// - Oracle has no dedicated parser dialect and is checked with the generic one.
pub fn check_syntax(dialect: SqlDialect, sql: &str) -> Result<usize> {
    let parser_dialect = dialect.parser_dialect();
    let text = parseable_text(dialect, sql);
    let statements =
        Parser::parse_sql(parser_dialect.as_ref(), &text).map_err(|e| DialectError::Syntax {
            dialect,
            message: e.to_string(),
        })?;
    Ok(statements.len())
}

fn parseable_text(dialect: SqlDialect, sql: &str) -> Cow<'_, str> {
    match dialect {
        SqlDialect::SqlServer if sql.contains(MERGE_TABLE_HINT) => {
            Cow::Owned(sql.replacen(MERGE_TABLE_HINT, "", 1))
        }
        _ => Cow::Borrowed(sql),
    }
}
