//! Dispatch a parsed command line to its command handler.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, CommandSummary, check::check, init::init},
};

/// Run the command in `args`.
///
/// # Returns
/// - `Ok(CommandResult)` with the command's summary, rendered by the report layer
/// - `Err` if the command fails (e.g., config not found, unknown app)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        Some(Command::Rules) => Ok(CommandResult::new(CommandSummary::Rules)),
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
