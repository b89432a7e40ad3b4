//! Command dispatch: bridges CLI args -> core plans -> output formatting.

pub mod config_cmd;
pub mod match_term;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a fabric-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::MatchAsPathTerm(args) => match_term::handle(args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
