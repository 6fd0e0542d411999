//! Output formatting

use miette::{IntoDiagnostic, Result};
use sqlsink_core::{DialectError, SqlDialect, TypeMap, UpsertStatement};

use crate::args::OutputFormat;

/// Output formatter for generated statements
pub struct OutputFormatter {
    format: OutputFormat,
    dialect: SqlDialect,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, dialect: SqlDialect) -> Self {
        Self { format, dialect }
    }

    pub fn print_upsert(&self, file_name: &str, statement: &UpsertStatement) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("-- {} ({})", file_name, self.dialect);
                println!("{}", statement.sql());
                let params = statement
                    .parameters()
                    .iter()
                    .map(|c| format!("{} {}", c.name(), c.logical_type()))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("-- parameters: {}", params);
                println!();
                Ok(())
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "file": file_name,
                    "dialect": self.dialect,
                    "sql": statement.sql(),
                    "parameters": statement.parameters(),
                });
                self.print_json(&output)
            }
        }
    }

    pub fn print_ddl(&self, file_name: &str, statements: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("-- {} ({})", file_name, self.dialect);
                for sql in statements {
                    println!("{};", sql.trim_end_matches(';'));
                }
                println!();
                Ok(())
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "file": file_name,
                    "dialect": self.dialect,
                    "statements": statements,
                });
                self.print_json(&output)
            }
        }
    }

    pub fn print_types(&self, type_map: &TypeMap) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Type mapping ({}):", self.dialect);
                println!("==================");
                for (logical_type, type_name) in type_map.iter() {
                    println!("  {:<8} -> {}", logical_type.to_string(), type_name);
                }
                Ok(())
            }
            OutputFormat::Json => {
                let types: serde_json::Map<String, serde_json::Value> = type_map
                    .iter()
                    .map(|(t, name)| (t.name().to_string(), name.into()))
                    .collect();
                self.print_json(&serde_json::json!({
                    "dialect": self.dialect,
                    "types": types,
                }))
            }
        }
    }

    /// Report a statement that failed the parser self-check
    pub fn print_check_failure(&self, file_name: &str, error: &DialectError) {
        eprintln!("\x1b[31merror\x1b[0m[sqlsink::syntax]: {}", error);
        eprintln!("  --> {}", file_name);
        eprintln!();
    }

    fn print_json(&self, value: &serde_json::Value) -> Result<()> {
        println!("{}", serde_json::to_string(value).into_diagnostic()?);
        Ok(())
    }
}
