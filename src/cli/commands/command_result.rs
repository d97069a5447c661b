use crate::{cli::args::OutputFormat, engine::RunReport};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
    Rules,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub report: RunReport,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct InitSummary {
    /// False when a config file already existed and was left untouched.
    pub created: bool,
}

/// Result of running convcheck commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// If true, warnings fail the run as well as failures.
    pub strict: bool,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            strict: false,
        }
    }
}
