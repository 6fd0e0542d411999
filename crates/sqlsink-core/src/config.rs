//! Dialect configuration, resolved once at startup

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, DialectBuilder, DialectOptions, PlaceholderStyle, SqlDialect};
use crate::error::Result;
use crate::observe::StatementObserver;
use crate::types::LogicalType;

/// Target database settings as written in `sqlsink.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectConfig {
    /// Database family name or alias (e.g. "postgresql", "mssql")
    #[serde(default = "default_dialect")]
    pub dialect: String,

    #[serde(default)]
    pub quote_identifiers: bool,

    #[serde(default)]
    pub placeholders: PlaceholderStyle,

    /// Per logical type keyword replacements (e.g. string = "VARCHAR(512)")
    #[serde(default)]
    pub type_overrides: IndexMap<LogicalType, String>,
}

fn default_dialect() -> String {
    SqlDialect::default().to_string()
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            quote_identifiers: false,
            placeholders: PlaceholderStyle::default(),
            type_overrides: IndexMap::new(),
        }
    }
}

impl DialectConfig {
    /// Resolve the configured family; unknown names fail here, not at write time
    pub fn kind(&self) -> Result<SqlDialect> {
        self.dialect.parse()
    }

    pub fn options(&self) -> DialectOptions {
        DialectOptions {
            quote_identifiers: self.quote_identifiers,
            placeholders: self.placeholders,
        }
    }

    pub fn builder(&self) -> Result<DialectBuilder> {
        Ok(DialectBuilder::new(self.kind()?)
            .options(self.options())
            .type_overrides(self.type_overrides.clone()))
    }

    /// Build the dialect, logging prepared statements through `tracing`
    pub fn build(&self) -> Result<Arc<dyn Dialect>> {
        self.builder()?.build()
    }

    pub fn build_with_observer(
        &self,
        observer: Arc<dyn StatementObserver>,
    ) -> Result<Arc<dyn Dialect>> {
        self.builder()?.observer(observer).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialectError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_config() {
        let config: DialectConfig = toml::from_str(
            r#"
            dialect = "mssql"
            quote_identifiers = true
            placeholders = "numbered"

            [type_overrides]
            string = "NVARCHAR(200)"
            "#,
        )
        .unwrap();

        assert_eq!(config.kind().unwrap(), SqlDialect::SqlServer);
        assert!(config.quote_identifiers);
        assert_eq!(config.placeholders, PlaceholderStyle::Numbered);

        let dialect = config.build().unwrap();
        assert_eq!(dialect.type_name_for(LogicalType::String), "NVARCHAR(200)");
        assert_eq!(dialect.placeholder(2), "@P2");
    }

    #[test]
    fn test_defaults() {
        let config: DialectConfig = toml::from_str("").unwrap();
        assert_eq!(config, DialectConfig::default());
        assert_eq!(config.kind().unwrap(), SqlDialect::PostgreSQL);
    }

    #[test]
    fn test_unknown_dialect_fails_at_build() {
        let config = DialectConfig {
            dialect: "informix".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.build().unwrap_err(),
            DialectError::UnsupportedDialect("informix".to_string())
        );
    }
}
