//! Test fixtures for generation.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use eyre::Result;
use snipgen_core::{ColumnDetail, TableContext};

/// An `orders` table with a key, a text and a nullable date column.
pub fn orders_table() -> TableContext {
    TableContext::new(
        "orders",
        vec![
            ColumnDetail::new("order_id", "int").primary_key(),
            ColumnDetail::new("customer_name", "nvarchar"),
            ColumnDetail::new("shipped_at", "datetime").nullable(),
        ],
    )
    .primary()
}

/// An `order_lines` detail table.
pub fn order_lines_table() -> TableContext {
    TableContext::new(
        "order_lines",
        vec![
            ColumnDetail::new("line_id", "bigint").primary_key(),
            ColumnDetail::new("order_id", "int"),
            ColumnDetail::new("unit_price", "money"),
        ],
    )
}

/// Assert that two strings are equal, listing differing lines on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        for i in 0..expected_lines.len().max(actual_lines.len()) {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");
            if exp != act {
                diff.push_str(&format!("Line {}:\n  expected: {}\n  actual:   {}\n", i + 1, exp, act));
            }
        }
        panic!("Content mismatch:\n{}", diff);
    }
}

/// Run `write` against a fresh temporary directory and return it.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn write_to_temp<F>(write: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    write(temp_dir.path())?;
    Ok(temp_dir)
}
