//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an Output target.

mod check;
mod generate;
mod init;
mod list;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GenerationResult};
pub use init::{InitReport, ScaffoldedFile};
pub use list::{ListReport, SetEntry, SnippetEntry, SnippetOrigin};
pub use output::{Report, TerminalOutput};

#[cfg(test)]
pub use output::BufferOutput;
