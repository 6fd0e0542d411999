//! Configuration file handling

use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use sqlsink_core::{DialectConfig, PlaceholderStyle};

use crate::args::{OutputFormat, TargetArgs};

/// Configuration for sqlsink
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Table description files or glob patterns
    #[serde(default)]
    pub tables: Vec<String>,

    /// Output format (human, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Target database
    #[serde(default)]
    pub target: DialectConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Try to find and load sqlsink.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join("sqlsink.toml");
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Load the file named by `--config`, or search for one
    pub fn load(target: &TargetArgs) -> Result<Self> {
        match &target.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::find_and_load()?.unwrap_or_default()),
        }
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(
        mut self,
        files: &[PathBuf],
        target: &TargetArgs,
        format: Option<OutputFormat>,
    ) -> Self {
        if !files.is_empty() {
            self.tables = files.iter().map(|p| p.display().to_string()).collect();
        }

        if let Some(dialect) = &target.dialect {
            self.target.dialect = dialect.clone();
        }

        if target.quote_identifiers {
            self.target.quote_identifiers = true;
        }

        if target.numbered_placeholders {
            self.target.placeholders = PlaceholderStyle::Numbered;
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        self
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }
}
