//! List command report data structures.

use std::fmt;

use snipgen_core::Applicability;

use super::output::{Output, Report};

/// Where a catalog snippet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetOrigin {
    Default,
    User,
}

impl fmt::Display for SnippetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetOrigin::Default => write!(f, "default"),
            SnippetOrigin::User => write!(f, "user"),
        }
    }
}

/// A snippet in the merged catalog.
#[derive(Debug)]
pub struct SnippetEntry {
    pub name: String,
    pub applicability: Applicability,
    pub extension: String,
    pub origin: SnippetOrigin,
    pub description: Option<String>,
}

/// A declared snippet set.
#[derive(Debug)]
pub struct SetEntry {
    pub name: String,
    pub description: Option<String>,
    pub snippets: Vec<String>,
    /// Listed in `[project] sets`.
    pub selected: bool,
}

/// Report data for the list command.
#[derive(Debug)]
pub struct ListReport {
    pub snippets: Vec<SnippetEntry>,
    pub sets: Vec<SetEntry>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.snippets.is_empty() {
            out.preformatted("No snippets defined");
        } else {
            out.section("Snippets");
            for snippet in &self.snippets {
                let mut line = format!(
                    "{} [{}, .{}, {}]",
                    snippet.name, snippet.applicability, snippet.extension, snippet.origin
                );
                if let Some(desc) = &snippet.description {
                    line.push_str(&format!(": {}", desc));
                }
                out.list_item(&line);
            }
        }

        if !self.sets.is_empty() {
            out.newline();
            out.section("Sets");
            for set in &self.sets {
                let marker = if set.selected { " *" } else { "" };
                let mut line = format!("{}{} ({})", set.name, marker, set.snippets.join(", "));
                if let Some(desc) = &set.description {
                    line.push_str(&format!(": {}", desc));
                }
                out.list_item(&line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_snippets_and_sets() {
        let report = ListReport {
            snippets: vec![
                SnippetEntry {
                    name: "CSharpModel".into(),
                    applicability: Applicability::Main,
                    extension: "cs".into(),
                    origin: SnippetOrigin::Default,
                    description: Some("Entity class".into()),
                },
                SnippetEntry {
                    name: "Notes".into(),
                    applicability: Applicability::Any,
                    extension: "md".into(),
                    origin: SnippetOrigin::User,
                    description: None,
                },
            ],
            sets: vec![SetEntry {
                name: "models".into(),
                description: None,
                snippets: vec!["CSharpModel".into(), "Notes".into()],
                selected: true,
            }],
        };

        insta::assert_snapshot!(BufferOutput::render(&report), @r"
        Snippets:
          - CSharpModel [main, .cs, default]: Entity class
          - Notes [any, .md, user]

        Sets:
          - models * (CSharpModel, Notes)
        ");
    }

    #[test]
    fn test_render_empty() {
        let report = ListReport {
            snippets: Vec::new(),
            sets: Vec::new(),
        };
        assert_eq!(BufferOutput::render(&report), "No snippets defined");
    }
}
