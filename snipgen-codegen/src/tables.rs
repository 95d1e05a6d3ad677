//! Loading table metadata.

use std::path::Path;

use eyre::{Result, WrapErr};
use snipgen_core::TableContext;

/// Parse a JSON table description, deriving the class name when it is empty.
pub fn parse_table(json: &str) -> Result<TableContext> {
    let mut table: TableContext =
        serde_json::from_str(json).wrap_err("invalid table metadata JSON")?;
    table.ensure_class_name();
    Ok(table)
}

/// Load a JSON table description from a file.
pub fn load_table(path: &Path) -> Result<TableContext> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read table file '{}'", path.display()))?;
    parse_table(&json).wrap_err_with(|| format!("failed to load table from '{}'", path.display()))
}
