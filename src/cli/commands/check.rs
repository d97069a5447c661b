use anyhow::{Context, Result};

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandResult, CommandSummary};
use crate::{
    config::load_config,
    engine::{self, RunOptions},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let CheckCommand { rules, args } = cmd;
    let start = args
        .common
        .root
        .canonicalize()
        .with_context(|| format!("Cannot access root directory: {}", args.common.root.display()))?;
    let loaded = load_config(&start)?;

    let options = RunOptions {
        rules,
        apps: args.apps,
        verbose: args.common.verbose,
    };
    let report = engine::run(&loaded.workspace_root, &loaded.config, &options)?;

    Ok(CommandResult {
        summary: CommandSummary::Check(CheckSummary {
            report,
            format: args.format,
        }),
        strict: args.strict,
    })
}
