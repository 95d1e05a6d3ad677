use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::span::{Position, Span};

/// A single syntax problem found while parsing a template.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    #[label("{message}")]
    span: SourceSpan,
}

impl SyntaxError {
    pub(crate) fn new(src: &str, span: Span, message: impl Into<String>) -> Self {
        let position = Position::locate(src, span.start);
        Self {
            message: message.into(),
            line: position.line,
            column: position.column,
            span: span.into(),
        }
    }

    /// Location of the problem in the template source.
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

/// Parsing failed; carries every syntax problem found.
#[derive(Debug, Error, Diagnostic)]
#[error("failed to parse template '{name}'")]
#[diagnostic(
    code(snipgen::template::parse),
    help("blocks open with 'for' or 'if' and must be closed with 'end'")
)]
pub struct ParseError {
    pub name: String,
    #[source_code]
    src: NamedSource<String>,
    #[related]
    errors: Vec<SyntaxError>,
}

impl ParseError {
    pub(crate) fn new(name: &str, src: &str, errors: Vec<SyntaxError>) -> Self {
        Self {
            name: name.to_string(),
            src: NamedSource::new(name, src.to_string()),
            errors,
        }
    }

    /// All syntax problems, in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// One line per syntax problem, formatted as `name(line,column): message`.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("{}({},{}): {}", self.name, e.line, e.column, e.message))
            .collect()
    }
}

/// What went wrong while evaluating a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderErrorKind {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("function '{name}' failed: {message}")]
    HelperFailed { name: String, message: String },

    #[error("function '{name}' expects a text argument, found {found}")]
    InvalidArgument { name: String, found: &'static str },

    #[error("cannot iterate over {found}")]
    NotIterable { found: &'static str },

    #[error("cannot render {found} as text")]
    NotRenderable { found: &'static str },

    #[error("cannot compare {lhs} with {rhs}")]
    Incomparable { lhs: &'static str, rhs: &'static str },
}

/// Evaluation failed; rendering of the template was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at line {line}, column {column}")]
#[diagnostic(code(snipgen::template::render))]
pub struct RenderError {
    pub kind: RenderErrorKind,
    pub line: usize,
    pub column: usize,
}

impl RenderError {
    pub(crate) fn new(src: &str, span: Span, kind: RenderErrorKind) -> Self {
        let position = Position::locate(src, span.start);
        Self {
            kind,
            line: position.line,
            column: position.column,
        }
    }
}

/// Any failure from [`render`](crate::render).
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}
