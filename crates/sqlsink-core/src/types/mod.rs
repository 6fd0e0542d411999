//! Logical column types and per-dialect type maps

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dialect::SqlDialect;
use crate::error::{DialectError, Result};

/// Database-agnostic column type, resolved by the caller before it reaches a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    String,
    Bytes,
}

impl LogicalType {
    /// Every logical type, in declaration order
    pub const ALL: [LogicalType; 9] = [
        LogicalType::Int8,
        LogicalType::Int16,
        LogicalType::Int32,
        LogicalType::Int64,
        LogicalType::Float32,
        LogicalType::Float64,
        LogicalType::Boolean,
        LogicalType::String,
        LogicalType::Bytes,
    ];

    /// Lower-case name as used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Int8 => "int8",
            LogicalType::Int16 => "int16",
            LogicalType::Int32 => "int32",
            LogicalType::Int64 => "int64",
            LogicalType::Float32 => "float32",
            LogicalType::Float64 => "float64",
            LogicalType::Boolean => "boolean",
            LogicalType::String => "string",
            LogicalType::Bytes => "bytes",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for LogicalType {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        LogicalType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| DialectError::invalid_argument(format!("unknown logical type '{}'", s)))
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_uppercase())
    }
}

/// Fixed mapping from every [`LogicalType`] to a dialect's column type keyword.
///
/// Completeness is checked when the map is built, so lookups never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    dialect: SqlDialect,
    names: Vec<String>,
}

impl TypeMap {
    /// Build a map from explicit entries; every logical type must be present
    pub fn new<I, S>(dialect: SqlDialect, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LogicalType, S)>,
        S: Into<String>,
    {
        let entries: IndexMap<LogicalType, String> =
            entries.into_iter().map(|(t, s)| (t, s.into())).collect();

        let mut names = Vec::with_capacity(LogicalType::ALL.len());
        for logical_type in LogicalType::ALL {
            let name = entries
                .get(&logical_type)
                .ok_or(DialectError::MissingTypeMapping {
                    dialect,
                    logical_type,
                })?;
            names.push(checked_keyword(dialect, logical_type, name)?);
        }

        Ok(Self { dialect, names })
    }

    /// Replace keywords for the given types, validating each replacement
    pub fn with_overrides(mut self, overrides: &IndexMap<LogicalType, String>) -> Result<Self> {
        for (logical_type, name) in overrides {
            let name = checked_keyword(self.dialect, *logical_type, name)?;
            tracing::debug!(
                dialect = %self.dialect,
                logical_type = %logical_type,
                type_name = %name,
                "type override applied"
            );
            self.names[logical_type.index()] = name;
        }
        Ok(self)
    }

    /// Native column type keyword for a logical type
    pub fn type_name(&self, logical_type: LogicalType) -> &str {
        &self.names[logical_type.index()]
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Iterate (logical type, keyword) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (LogicalType, &str)> {
        LogicalType::ALL
            .into_iter()
            .zip(self.names.iter().map(String::as_str))
    }
}

fn checked_keyword(dialect: SqlDialect, logical_type: LogicalType, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DialectError::InvalidTypeMapping {
            dialect,
            logical_type,
        });
    }
    Ok(trimmed.to_string())
}
