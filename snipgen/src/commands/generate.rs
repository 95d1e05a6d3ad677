use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use snipgen_manifest::ProjectToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to snipgen.toml (defaults to ./snipgen.toml)
    #[arg(short, long, default_value = "snipgen.toml")]
    pub config: PathBuf,

    /// Main table metadata (JSON)
    #[arg(short, long)]
    pub table: PathBuf,

    /// Detail table metadata (JSON)
    #[arg(short, long)]
    pub detail: Option<PathBuf>,

    /// Snippet set to render (repeatable; defaults to the project's sets)
    #[arg(short, long = "set")]
    pub sets: Vec<String>,

    /// Single snippet to render (repeatable)
    #[arg(long = "snippet")]
    pub snippets: Vec<String>,

    /// Output directory (overrides snipgen.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let project = ProjectToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &project,
            GenerateOptions {
                table: &self.table,
                detail: self.detail.as_deref(),
                sets: &self.sets,
                snippets: &self.snippets,
                output: self.output.as_deref(),
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
