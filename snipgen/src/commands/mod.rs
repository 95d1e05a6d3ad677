mod check;
mod completions;
mod generate;
mod init;
mod list;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use init::InitCommand;
use list::ListCommand;
use log::LevelFilter;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for snipgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "snipgen")]
#[command(version)]
#[command(about = "Generate source files from table metadata and snippet templates")]
pub(crate) struct Cli {
    /// Show debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Install the logger. Defaults to warnings only.
    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(if self.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            })
            .format_timestamp(None)
            .parse_default_env();
        let _ = builder.try_init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create snipgen.toml and a starter snippet file
    Init(InitCommand),

    /// Render snippets for a table
    Generate(GenerateCommand),

    /// Validate snipgen.toml and every snippet template
    Check(CheckCommand),

    /// List snippets and snippet sets
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
