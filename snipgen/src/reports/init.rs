//! Init command report data structures.

use std::path::PathBuf;

use snipgen_core::WriteResult;

use super::output::{Output, Report};

/// Report data from project scaffolding.
#[derive(Debug)]
pub struct InitReport {
    /// Name written to `[project] name`.
    pub project_name: String,
    /// Every file init tried to create, in order.
    pub files: Vec<ScaffoldedFile>,
}

/// A file touched by init.
#[derive(Debug)]
pub struct ScaffoldedFile {
    pub path: PathBuf,
    pub result: WriteResult,
}

impl Report for InitReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("Initialized project {}", self.project_name));
        out.newline();

        for file in &self.files {
            let path = file.path.display().to_string();
            match file.result {
                WriteResult::Written => out.added_item(&path),
                WriteResult::Skipped => out.list_item(&format!("{} (exists)", path)),
            }
        }
    }
}
