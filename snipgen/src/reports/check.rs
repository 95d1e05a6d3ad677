//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from project validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of snippets in the merged catalog.
    pub snippet_count: usize,
    /// Number of declared sets.
    pub set_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn plural(count: usize, word: &str) -> String {
    format!("{} {}{}", count, word, if count == 1 { "" } else { "s" })
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            out.preformatted(&format!(
                "  {}, {}",
                plural(self.snippet_count, "snippet"),
                plural(self.set_count, "set")
            ));
        }
    }
}
