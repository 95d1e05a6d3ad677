//! Core types and utilities for the snipgen code generator.
//!
//! This crate holds the table/column data model that templates are rendered
//! against, the identifier normalizer and the SQL-to-language type mapper.

mod file;
mod naming;
mod type_mapper;
mod types;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Identifier normalization
pub use naming::{
    DEFAULT_CLASS_NAME, DEFAULT_PROPERTY_NAME, normalize_class_name, normalize_identifier,
    normalize_property_name,
};
// Type mapping
pub use type_mapper::{CSharpTypeMapper, SqlType, TypeMapper, map_type};
// Data model
pub use types::{Applicability, ColumnDetail, Snippet, SnippetSet, TableContext};
