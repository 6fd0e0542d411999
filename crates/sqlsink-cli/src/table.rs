//! Table description files

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use sqlsink_core::{ColumnDef, ColumnRef};

/// One table write, as described in a TOML file:
///
/// ```toml
/// table = "orders"
///
/// [[key]]
/// name = "order_id"
/// type = "int64"
///
/// [[columns]]
/// name = "qty"
/// type = "int32"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TableFile {
    pub table: String,

    /// Key columns, in conflict-target order
    #[serde(default)]
    pub key: Vec<ColumnDef>,

    /// Non-key columns, in statement order
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

impl TableFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let table: TableFile = toml::from_str(&contents).into_diagnostic()?;
        Ok(table)
    }

    pub fn key_refs(&self) -> Vec<ColumnRef> {
        self.key.iter().map(ColumnRef::from).collect()
    }

    pub fn column_refs(&self) -> Vec<ColumnRef> {
        self.columns.iter().map(ColumnRef::from).collect()
    }
}

/// Expand file names and glob patterns, keeping the given order
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}
