//! Template language for snipgen snippets.
//!
//! Templates are plain text with embedded `{{ ... }}` tags:
//!
//! ```text
//! public class {{ MainTable.ClassName }}
//! {
//! {{~ for c in MainTable.SelectedColumns ~}}
//!     public {{ map_type c.DataType }} {{ normalize_name c.ColumnName }} { get; set; }
//! {{~ end ~}}
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`Template`] - parsed, reusable template
//! - [`Context`] / [`Value`] - the data visible to a template
//! - [`Helpers`] - capability table of callable helper functions
//! - [`ParseError`] / [`RenderError`] - diagnostics

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod ast;
mod context;
mod error;
mod eval;
mod helpers;
mod lexer;
mod parser;
mod span;
mod template;
mod value;

pub use context::Context;
pub use error::{ParseError, RenderError, RenderErrorKind, SyntaxError, TemplateError};
pub use helpers::{HelperFn, Helpers};
pub use span::{Position, Span};
pub use template::{Template, render};
pub use value::Value;
