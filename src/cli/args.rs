//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all convcheck
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `check`: Run convention checks over every declared app
//! - `init`: Initialize a `convcheck.json` configuration file
//! - `rules`: List rule categories in execution order

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::findings::Category;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Rules) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory to search for convcheck.json from (searched upward)
    #[arg(long, env = "CONVCHECK_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report grouped per app
    #[default]
    Text,
    /// The full run report as JSON
    Json,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only check these apps (default: all declared apps)
    /// Can be specified multiple times: --app LoanCalc --app Timer
    #[arg(long = "app")]
    pub apps: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 1 on warnings as well as failures
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all enabled rules)
    #[arg(value_enum)]
    pub rules: Vec<Category>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check apps against the house conventions (layout, async, DI, views, localization, ...)
    Check(CheckCommand),
    /// Initialize a new convcheck.json configuration file
    Init,
    /// List rule categories in execution order
    Rules,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_check_with_rules_and_apps() {
        let args = Arguments::try_parse_from([
            "convcheck",
            "check",
            "view-pairing",
            "localization-parity",
            "--app",
            "LoanCalc",
            "--format",
            "json",
            "--strict",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose());
        let Some(Command::Check(cmd)) = args.command else {
            panic!("expected check command");
        };
        assert_eq!(
            cmd.rules,
            vec![Category::ViewPairing, Category::LocalizationParity]
        );
        assert_eq!(cmd.args.apps, vec!["LoanCalc"]);
        assert_eq!(cmd.args.format, OutputFormat::Json);
        assert!(cmd.args.strict);
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        assert!(Arguments::try_parse_from(["convcheck", "check", "no-such-rule"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
