//! Generate command report data structures.

use std::path::PathBuf;

use snipgen_codegen::GeneratedCode;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project name from manifest.
    pub project_name: String,

    /// Main table the snippets were rendered for.
    pub table_name: String,

    /// Unknown snippet names and similar problems.
    pub warnings: Vec<String>,

    /// Snippets that did not apply to the tables given.
    pub skipped: Vec<String>,

    /// Snippet name and error marker of every failed snippet.
    pub failed: Vec<(String, String)>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written {
        output_dir: PathBuf,
        files: Vec<PathBuf>,
    },
    /// Dry-run preview.
    Preview(Vec<GeneratedCode>),
}

impl GenerateReport {
    /// Whether any snippet produced an error marker.
    pub fn has_errors(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written { output_dir, files } => {
                out.preformatted(&format!("{} ({})", self.project_name, self.table_name));
                out.newline();
                out.key_value("Generated", &output_dir.display().to_string());
                for file in files {
                    let name = file.strip_prefix(output_dir).unwrap_or(file);
                    out.added_item(&name.display().to_string());
                }
            }
            GenerationResult::Preview(generated) => {
                for code in generated {
                    out.divider(&code.suggested_file_name);
                    out.preformatted(&code.content);
                }
                out.divider("Summary");
                let ok = generated.iter().filter(|code| !code.is_error()).count();
                out.preformatted(&format!("{} files would be generated", ok));
            }
        }

        if !self.skipped.is_empty() {
            out.newline();
            out.section("Skipped");
            for name in &self.skipped {
                out.list_item(name);
            }
        }

        for (name, marker) in &self.failed {
            let first_line = marker.lines().next().unwrap_or_default();
            out.error(&format!("snippet '{}' failed: {}", name, first_line));
        }
    }
}
