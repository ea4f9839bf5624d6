mod cli;
mod commands;
mod errors;
mod file;
mod patterns;
mod rewrite;
mod utils;
mod walk;

use crate::errors::ImportCaseResult;
use crate::utils::Config;
use clap::Parser;
use cli::Cli;
use console::style;
use directories::ProjectDirs;
use std::fs;
use std::time::Instant;
use tracing_subscriber::fmt::time;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(time::UtcTime::rfc_3339());

    Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}

fn main() -> ImportCaseResult<()> {
    let now = Instant::now();
    init_tracing();

    tracing::debug!("CLI starting up");
    let cli = Cli::parse();

    let proj_dirs = ProjectDirs::from("dev", "importcase", "importcase")
        .ok_or("Unable to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;

    let mut config = Config::load(config_dir)?;
    let quiet = config.output.quiet;

    commands::handle_command(cli.command, config_dir, &mut config)?;

    if !quiet {
        eprintln!(
            "{} in {:.3}s.",
            style("Finished").green().bold(),
            now.elapsed().as_secs_f32()
        );
    }
    Ok(())
}
