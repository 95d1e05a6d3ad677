//! Identifier normalization for generated class and property names.

/// Fallback used when a table name yields no identifier fragments.
pub const DEFAULT_CLASS_NAME: &str = "DefaultClassName";

/// Fallback used when a column name yields no identifier fragments.
pub const DEFAULT_PROPERTY_NAME: &str = "DefaultPropertyName";

const SEPARATORS: [char; 3] = ['_', ' ', '-'];

/// Convert a raw identifier to PascalCase (e.g., "order_line" -> "OrderLine").
///
/// The input is split on `_`, space and `-`, empty fragments are dropped, and
/// every fragment is folded to an upper-case first character followed by a
/// lower-cased remainder. Folding is ASCII-only, so the result never depends
/// on the host locale. Note that the remainder is always lower-cased:
/// `"userID"` becomes `"Userid"`.
///
/// Returns `fallback` when the input is blank or made only of separators.
pub fn normalize_identifier(raw: &str, fallback: &str) -> String {
    if raw.trim().is_empty() {
        return fallback.to_string();
    }

    let mut result = String::with_capacity(raw.len());
    for part in raw.split(SEPARATORS).filter(|part| !part.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }

    if result.is_empty() {
        fallback.to_string()
    } else {
        result
    }
}

/// Normalize a table name into a class name.
pub fn normalize_class_name(table_name: &str) -> String {
    normalize_identifier(table_name, DEFAULT_CLASS_NAME)
}

/// Normalize a column name into a property name.
pub fn normalize_property_name(column_name: &str) -> String {
    normalize_identifier(column_name, DEFAULT_PROPERTY_NAME)
}
