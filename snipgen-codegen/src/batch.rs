//! Generating several snippets for one request.

use std::path::{Path, PathBuf};

use eyre::Result;
use indexmap::IndexSet;
use serde::Serialize;
use snipgen_core::{File, Snippet, SnippetSet};

use crate::{catalog::SnippetCatalog, generate::GenerationRequest, marker::ErrorMarker};

const DEFAULT_EXTENSION: &str = "txt";

/// One generated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeneratedCode {
    pub snippet_name: String,
    /// Generated text, or an error marker
    pub content: String,
    pub suggested_file_name: String,
    /// Set when `content` is the rendering of this marker
    #[serde(skip)]
    pub error: Option<ErrorMarker>,
}

impl GeneratedCode {
    /// Whether generation produced an error marker instead of code.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    pub generated: Vec<GeneratedCode>,
    /// Snippets that do not apply to the request (e.g. detail-only
    /// snippets without a detail table)
    pub skipped: Vec<String>,
    pub warnings: Vec<String>,
}

impl BatchOutput {
    pub fn has_errors(&self) -> bool {
        self.generated.iter().any(GeneratedCode::is_error)
    }

    /// Write every successful output under `dir`, overwriting existing files.
    ///
    /// Outputs that are error markers are not written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for code in self.generated.iter().filter(|code| !code.is_error()) {
            let file = File::new(dir.join(&code.suggested_file_name), code.content.as_str());
            file.write()?;
            log::debug!("wrote {}", file.path().display());
            written.push(file.path().to_path_buf());
        }
        Ok(written)
    }
}

/// File name for a snippet's output: `<ClassName><SnippetName>.<ext>`.
///
/// Characters other than ASCII letters and digits are dropped from the
/// snippet name. The extension may carry a leading dot and defaults to
/// `txt` when blank.
pub fn suggested_file_name(class_name: &str, snippet: &Snippet) -> String {
    let stem: String = snippet
        .name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let extension = snippet.output_extension.trim().trim_start_matches('.');
    let extension = if extension.is_empty() {
        DEFAULT_EXTENSION
    } else {
        extension
    };
    format!("{}{}.{}", class_name.trim(), stem, extension)
}

/// Render the named snippets for `request`.
///
/// Names are deduplicated keeping the first occurrence. Unknown names are
/// reported as warnings; snippets whose applicability does not match the
/// request are skipped.
pub fn generate_batch<I, S>(catalog: &SnippetCatalog, names: I, request: &GenerationRequest) -> BatchOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: IndexSet<String> = names
        .into_iter()
        .map(|name| name.as_ref().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let class_name = request
        .main
        .as_ref()
        .map_or("", |table| table.class_name.as_str());
    let mut output = BatchOutput::default();

    for name in names {
        let Some(snippet) = catalog.get(&name) else {
            log::warn!("unknown snippet '{}'", name);
            output.warnings.push(format!("unknown snippet '{}'", name));
            continue;
        };
        if !snippet.applicability.applies(request.has_detail()) {
            log::debug!(
                "skipping snippet '{}' ({} only)",
                snippet.name,
                snippet.applicability
            );
            output.skipped.push(snippet.name.clone());
            continue;
        }

        let (content, error) = match request.try_generate(snippet) {
            Ok(content) => (content, None),
            Err(marker) => (marker.to_string(), Some(marker)),
        };
        output.generated.push(GeneratedCode {
            snippet_name: snippet.name.clone(),
            content,
            suggested_file_name: suggested_file_name(class_name, snippet),
            error,
        });
    }

    output
}

/// Render every snippet of the given sets, in set order.
pub fn generate_sets(
    catalog: &SnippetCatalog,
    sets: &[&SnippetSet],
    request: &GenerationRequest,
) -> BatchOutput {
    let names = sets.iter().flat_map(|set| set.snippet_names.iter());
    generate_batch(catalog, names, request)
}
