//! Error markers embedded in generated output.
//!
//! Generation never fails outright. Instead the output is replaced with a
//! comment-prefixed block whose first line starts with `// ` and names the
//! problem, so the result is still safe to write or preview.

use std::fmt;

use snipgen_template::ParseError;

/// Prefix of the first line of every parse-error marker.
pub const PARSE_ERROR_HEADER: &str = "// Snippet Template Parsing Error(s):";

/// Prefix of every evaluation-error marker.
pub const EVALUATION_ERROR_PREFIX: &str = "// Error during code generation: ";

/// A generation failure, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMarker {
    /// No main table was supplied
    MissingMainTable,
    /// The snippet is missing or its template body is blank
    MissingTemplate,
    /// Single-table mode was given zero columns
    NoColumns,
    /// The template did not parse; one line per diagnostic
    Parse(Vec<String>),
    /// Rendering failed part-way
    Evaluation(String),
}

impl ErrorMarker {
    pub fn from_parse_error(err: &ParseError) -> Self {
        ErrorMarker::Parse(err.messages())
    }
}

/// Write `message`, continuing each extra line as a comment.
fn write_commented(f: &mut fmt::Formatter<'_>, message: &str) -> fmt::Result {
    for (i, line) in message.lines().enumerate() {
        if i > 0 {
            f.write_str("\n// ")?;
        }
        f.write_str(line)?;
    }
    Ok(())
}

impl fmt::Display for ErrorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMarker::MissingMainTable => write!(f, "// Error: Main table context is null."),
            ErrorMarker::MissingTemplate => write!(
                f,
                "// Error: Snippet or snippet template not provided or empty."
            ),
            ErrorMarker::NoColumns => write!(f, "// Error: No columns provided."),
            ErrorMarker::Parse(messages) => {
                write!(f, "{}", PARSE_ERROR_HEADER)?;
                for message in messages {
                    f.write_str("\n// ")?;
                    write_commented(f, message)?;
                }
                Ok(())
            }
            ErrorMarker::Evaluation(message) => {
                f.write_str(EVALUATION_ERROR_PREFIX)?;
                write_commented(f, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_markers() {
        assert_eq!(
            ErrorMarker::MissingMainTable.to_string(),
            "// Error: Main table context is null."
        );
        assert_eq!(ErrorMarker::NoColumns.to_string(), "// Error: No columns provided.");
        assert_eq!(
            ErrorMarker::MissingTemplate.to_string(),
            "// Error: Snippet or snippet template not provided or empty."
        );
    }

    #[test]
    fn test_parse_marker_lists_every_message() {
        let marker = ErrorMarker::Parse(vec![
            "Model(1,1): first".to_string(),
            "Model(2,4): second".to_string(),
        ]);
        insta::assert_snapshot!(marker.to_string(), @r"
        // Snippet Template Parsing Error(s):
        // Model(1,1): first
        // Model(2,4): second
        ");
    }

    #[test]
    fn test_evaluation_marker() {
        let marker = ErrorMarker::Evaluation("boom".to_string());
        assert_eq!(marker.to_string(), "// Error during code generation: boom");
    }

    #[test]
    fn test_multiline_messages_stay_commented() {
        let marker = ErrorMarker::Parse(vec!["Model(1,4): first line\nsecond line".to_string()]);
        insta::assert_snapshot!(marker.to_string(), @r"
        // Snippet Template Parsing Error(s):
        // Model(1,4): first line
        // second line
        ");

        let marker = ErrorMarker::Evaluation("boom\nat row 2".to_string());
        assert!(marker.to_string().lines().all(|line| line.starts_with("// ")));
        assert_eq!(
            marker.to_string(),
            "// Error during code generation: boom\n// at row 2"
        );
    }
}
