//! Validation context and utilities for manifest parsing.

use miette::SourceSpan;

use crate::{Manifest, Result, error::SourceContext};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NAMESPACE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Parsing and validation context that carries source information.
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: SourceContext,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: SourceContext::new(src, filename),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Span of the string value assigned to `key` inside `section`.
    pub fn value_span(&self, section: &str, key: &str) -> Option<SourceSpan> {
        find_value_span(self.src(), section, key)
    }

    /// Fail when `value` has more than `max` characters.
    pub fn check_length(
        &self,
        field: &str,
        value: &str,
        max: usize,
        span: Option<SourceSpan>,
    ) -> Result<()> {
        let len = value.chars().count();
        if len > max {
            return Err(self.source.too_long_error(field, max, len, span));
        }
        Ok(())
    }

    /// Validate a parsed manifest against its source.
    pub fn validate(&self, manifest: &Manifest) -> Result<()> {
        let project = &manifest.project;

        if project.name.trim().is_empty() {
            return Err(self.source.validation_error(
                "project name cannot be empty",
                self.value_span("project", "name"),
            ));
        }
        self.check_length(
            "project name",
            &project.name,
            MAX_NAME_LEN,
            self.value_span("project", "name"),
        )?;
        if let Some(namespace) = &project.namespace {
            self.check_length(
                "namespace",
                namespace,
                MAX_NAMESPACE_LEN,
                self.value_span("project", "namespace"),
            )?;
        }
        if let Some(description) = &project.description {
            self.check_length(
                "project description",
                description,
                MAX_DESCRIPTION_LEN,
                self.value_span("project", "description"),
            )?;
        }

        for (name, set) in &manifest.sets {
            let section = format!("sets.{}", name);
            if let Some(description) = &set.description {
                self.check_length(
                    &format!("description of set '{}'", name),
                    description,
                    MAX_DESCRIPTION_LEN,
                    self.value_span(&section, "description"),
                )?;
            }
            if set.snippets.is_empty() {
                return Err(self.source.validation_error(
                    format!("set '{}' must list at least one snippet", name),
                    find_header_span(self.src(), &section),
                ));
            }
            self.validate_set_entries(name, &section, &set.snippets)?;
        }

        let declared: Vec<&str> = manifest.sets.keys().map(String::as_str).collect();
        for selected in &project.sets {
            if !manifest.sets.contains_key(selected) {
                return Err(self.source.unknown_set_error(
                    selected,
                    &declared,
                    find_quoted_in_section(self.src(), "project", selected).first().copied(),
                ));
            }
        }

        Ok(())
    }

    fn validate_set_entries(&self, name: &str, section: &str, snippets: &[String]) -> Result<()> {
        for (i, snippet) in snippets.iter().enumerate() {
            if snippet.trim().is_empty() {
                return Err(self.source.validation_error(
                    format!("set '{}' lists a blank snippet name", name),
                    self.value_span(section, "snippets"),
                ));
            }
            if snippets[..i].contains(snippet) {
                let spans = find_quoted_in_section(self.src(), section, snippet);
                let fallback = self
                    .value_span(section, "snippets")
                    .unwrap_or_else(|| SourceSpan::from((0, 0)));
                return Err(self.source.duplicate_snippet_error(
                    name,
                    snippet,
                    spans.first().copied().unwrap_or(fallback),
                    spans.get(1).copied().unwrap_or(fallback),
                ));
            }
        }
        Ok(())
    }
}

/// Byte range of the body of `[section]`, up to the next table header.
fn section_range(src: &str, section: &str) -> Option<(usize, usize)> {
    let header = format!("[{}]", section);
    let mut offset = 0;
    let mut start = None;

    for line in src.split_inclusive('\n') {
        let trimmed = line.trim();
        if let Some(body_start) = start {
            if trimmed.starts_with('[') {
                return Some((body_start, offset));
            }
        } else if trimmed == header {
            start = Some(offset + line.len());
        }
        offset += line.len();
    }
    start.map(|body_start| (body_start, src.len()))
}

/// Find the span of a `[section]` header's name.
pub(crate) fn find_header_span(src: &str, section: &str) -> Option<SourceSpan> {
    let header = format!("[{}]", section);
    let pos = src.find(&header)?;
    Some(SourceSpan::from((pos + 1, section.len())))
}

/// Find the span of the value of `key = ...` inside `[section]`.
///
/// For quoted values the span covers the text between the quotes.
pub(crate) fn find_value_span(src: &str, section: &str, key: &str) -> Option<SourceSpan> {
    let (start, end) = section_range(src, section)?;
    let body = &src[start..end];

    let mut offset = start;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(rest) = trimmed.strip_prefix(key) {
            let after_key = rest.trim_start();
            if let Some(value) = after_key.strip_prefix('=') {
                let value_trimmed = value.trim_start();
                let value_start =
                    offset + indent + key.len() + (rest.len() - after_key.len()) + 1
                        + (value.len() - value_trimmed.len());
                let value_text = value_trimmed.trim_end();
                return Some(match value_text.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let inner = &value_text[1..];
                        let len = inner.find(q).unwrap_or(inner.len());
                        SourceSpan::from((value_start + 1, len))
                    }
                    _ => SourceSpan::from((value_start, value_text.len())),
                });
            }
        }
        offset += line.len();
    }
    None
}

/// Find every quoted occurrence of `needle` inside `[section]`, in order.
pub(crate) fn find_quoted_in_section(src: &str, section: &str, needle: &str) -> Vec<SourceSpan> {
    let Some((start, end)) = section_range(src, section) else {
        return Vec::new();
    };
    let body = &src[start..end];

    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        let pattern = format!("{}{}{}", quote, needle, quote);
        spans.extend(
            body.match_indices(&pattern)
                .map(|(pos, _)| SourceSpan::from((start + pos + 1, needle.len()))),
        );
    }
    spans.sort_by_key(|span| span.offset());
    spans
}
