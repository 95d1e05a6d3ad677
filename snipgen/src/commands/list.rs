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
pub struct ListCommand {
    /// Path to snipgen.toml (defaults to ./snipgen.toml)
    #[arg(short, long, default_value = "snipgen.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let project = ProjectToml::open(&self.config).unwrap_or_exit();
        ops::list(&project)?.render(&mut TerminalOutput::new());
        Ok(())
    }
}
