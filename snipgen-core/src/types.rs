//! Table, column and snippet records.
//!
//! Field names serialize in PascalCase. Templates see these records through
//! the same names, e.g. `{{ MainTable.ClassName }}` or `{{ c.DataType }}`.

use serde::{Deserialize, Serialize};

use crate::naming::normalize_class_name;

/// A single column of a table, as reported by schema introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnDetail {
    pub column_name: String,
    /// Source database type name (e.g. `nvarchar`)
    pub data_type: String,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ColumnDetail {
    pub fn new(column_name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            data_type: data_type.into(),
            is_nullable: false,
            is_primary_key: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// A table selected for generation, with its selected columns in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableContext {
    pub table_name: String,
    #[serde(default)]
    pub user_alias: String,
    /// Pre-normalized class name; templates never re-derive it.
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub selected_columns: Vec<ColumnDetail>,
    #[serde(default)]
    pub is_primary_in_context: bool,
}

impl TableContext {
    /// Create a table context, deriving the class name from the table name.
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnDetail>) -> Self {
        let table_name = table_name.into();
        Self {
            class_name: normalize_class_name(&table_name),
            table_name,
            user_alias: String::new(),
            selected_columns: columns,
            is_primary_in_context: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.user_alias = alias.into();
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary_in_context = true;
        self
    }

    /// Fill in the class name from the table name when it was left empty.
    pub fn ensure_class_name(&mut self) {
        if self.class_name.trim().is_empty() {
            self.class_name = normalize_class_name(&self.table_name);
        }
    }
}

/// Which table role a snippet is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Applicability {
    #[default]
    Any,
    Main,
    Detail,
}

impl Applicability {
    /// Returns the applicability name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Applicability::Any => "any",
            Applicability::Main => "main",
            Applicability::Detail => "detail",
        }
    }

    /// Whether a snippet with this applicability can be rendered for a
    /// request that does (or does not) carry a detail table.
    pub fn applies(&self, has_detail: bool) -> bool {
        match self {
            Applicability::Any | Applicability::Main => true,
            Applicability::Detail => has_detail,
        }
    }
}

impl std::fmt::Display for Applicability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reusable code-generation template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snippet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Template body
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub applicability: Applicability,
    /// Extension of generated files (e.g. `cs`), with or without a leading dot
    #[serde(default)]
    pub output_extension: String,
    #[serde(default)]
    pub is_user_defined: bool,
}

impl Snippet {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_applicability(mut self, applicability: Applicability) -> Self {
        self.applicability = applicability;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    /// Whether the template body is missing or blank.
    pub fn is_blank(&self) -> bool {
        self.template.trim().is_empty()
    }
}

/// A named group of snippets that are generated together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    pub name: String,
    pub description: Option<String>,
    pub snippet_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_context_derives_class_name() {
        let table = TableContext::new("order_lines", vec![ColumnDetail::new("id", "int")]);
        assert_eq!(table.class_name, "OrderLines");
        assert_eq!(table.selected_columns.len(), 1);
        assert!(!table.is_primary_in_context);
    }

    #[test]
    fn test_ensure_class_name_keeps_existing() {
        let mut table = TableContext {
            table_name: "orders".to_string(),
            class_name: "PurchaseOrder".to_string(),
            ..TableContext::default()
        };
        table.ensure_class_name();
        assert_eq!(table.class_name, "PurchaseOrder");

        table.class_name.clear();
        table.ensure_class_name();
        assert_eq!(table.class_name, "Orders");
    }

    #[test]
    fn test_applicability() {
        assert!(Applicability::Any.applies(false));
        assert!(Applicability::Main.applies(false));
        assert!(!Applicability::Detail.applies(false));
        assert!(Applicability::Detail.applies(true));
        assert_eq!(Applicability::Detail.to_string(), "detail");
    }

    #[test]
    fn test_deserialize_table() {
        let table: TableContext = serde_json::from_str(
            r#"{
                "TableName": "users",
                "SelectedColumns": [
                    { "ColumnName": "id", "DataType": "int", "IsPrimaryKey": true },
                    { "ColumnName": "email", "DataType": "nvarchar", "IsNullable": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(table.table_name, "users");
        assert!(table.class_name.is_empty());
        assert!(table.selected_columns[0].is_primary_key);
        assert!(table.selected_columns[1].is_nullable);
    }

    #[test]
    fn test_deserialize_snippet_defaults() {
        let snippet: Snippet =
            serde_json::from_str(r#"{ "Name": "Model", "Template": "{{ x }}" }"#).unwrap();
        assert_eq!(snippet.applicability, Applicability::Any);
        assert!(snippet.output_extension.is_empty());
        assert!(!snippet.is_user_defined);
        assert!(!snippet.is_blank());
    }
}
