pub mod config;
pub mod rewrite;

use crate::cli::Commands;
use crate::errors::ImportCaseResult;
use crate::file::Mode;
use crate::utils::Config;
use std::path::Path;

pub fn handle_command(
    command: Commands,
    config_dir: &Path,
    config: &mut Config,
) -> ImportCaseResult<()> {
    match command {
        Commands::Rewrite {
            path,
            dry_run,
            keep_going,
        } => {
            if keep_going {
                config.rewrite.keep_going = true
            };

            let mode = if dry_run { Mode::DryRun } else { Mode::Write };
            rewrite::handle(path.as_deref(), mode, config)
        }
        Commands::Check { path } => rewrite::check(path.as_deref(), config),
        Commands::Config => config::handle(config_dir, config),
    }
}
