use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename, shared by every error built for one file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, labelled at `span` when it is known.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    pub fn too_long_error(
        &self,
        field: impl Into<String>,
        max: usize,
        len: usize,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::TooLong {
            src: self.named_source(),
            span,
            field: field.into(),
            max,
            len,
        })
    }

    pub fn unknown_set_error(
        &self,
        name: impl Into<String>,
        available: &[&str],
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        let available = if available.is_empty() {
            "no sets are declared".to_string()
        } else {
            format!("declared sets: {}", available.join(", "))
        };
        Box::new(Error::UnknownSet {
            src: self.named_source(),
            span,
            name: name.into(),
            available,
        })
    }

    pub fn duplicate_snippet_error(
        &self,
        set: impl Into<String>,
        snippet: impl Into<String>,
        first_span: SourceSpan,
        second_span: SourceSpan,
    ) -> Box<Error> {
        Box::new(Error::DuplicateSnippet {
            src: self.named_source(),
            first_span,
            second_span,
            set: set.into(),
            snippet: snippet.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'snipgen init' to create a new project"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snipgen.toml")]
    #[diagnostic(code(snipgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(snipgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("{field} is too long ({len} characters, at most {max} allowed)")]
    #[diagnostic(code(snipgen::too_long), help("shorten the {field}"))]
    TooLong {
        #[source_code]
        src: NamedSource<String>,
        #[label("{len} characters")]
        span: Option<SourceSpan>,
        field: String,
        max: usize,
        len: usize,
    },

    #[error("unknown snippet set '{name}'")]
    #[diagnostic(
        code(snipgen::unknown_set),
        help("declare it as [sets.{name}] or remove it; {available}")
    )]
    UnknownSet {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared")]
        span: Option<SourceSpan>,
        name: String,
        available: String,
    },

    #[error("snippet '{snippet}' is listed twice in set '{set}'")]
    #[diagnostic(code(snipgen::duplicate_snippet), help("remove one of the entries"))]
    DuplicateSnippet {
        #[source_code]
        src: NamedSource<String>,
        #[label("first listed here")]
        first_span: SourceSpan,
        #[label("listed again here")]
        second_span: SourceSpan,
        set: String,
        snippet: String,
    },
}
