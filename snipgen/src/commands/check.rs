use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use snipgen_manifest::ProjectToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to snipgen.toml (defaults to ./snipgen.toml)
    #[arg(short, long, default_value = "snipgen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let project = ProjectToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(&project)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
