//! Generation orchestration for snipgen.
//!
//! This crate binds table metadata into the template language and turns
//! every failure into a textual error marker, so callers always receive
//! text they can write straight to a file or preview.
//!
//! # Module Organization
//!
//! - [`generate`] - single-snippet generation ([`generate()`], [`generate_for_table`])
//! - [`context`] - the render context and helper capability table
//! - [`marker`] - error markers embedded in generated output
//! - [`catalog`] - merged default/user snippet snapshot
//! - [`batch`] - snippet-set generation and suggested file names
//! - [`tables`] - table metadata loading
//! - [`testing`] - test fixtures (feature-gated)

pub mod batch;
pub mod catalog;
pub mod context;
pub mod generate;
pub mod marker;
pub mod tables;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use batch::{BatchOutput, GeneratedCode, generate_batch, generate_sets, suggested_file_name};
pub use catalog::{CatalogError, SnippetCatalog};
pub use context::{RenderContext, helpers};
pub use generate::{GenerationRequest, generate, generate_for_table, try_generate};
pub use marker::ErrorMarker;
pub use tables::{load_table, parse_table};
