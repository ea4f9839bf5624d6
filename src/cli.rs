use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "importcase")]
#[command(about = "Lowercase relative and aliased import paths in TypeScript sources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite import paths under a directory to lowercase
    Rewrite {
        /// Root to walk (defaults to `rewrite.default_root` from the config)
        #[arg(env = "IMPORTCASE_ROOT")]
        path: Option<String>,

        /// Report files that would change without writing them
        #[arg(long)]
        dry_run: bool,

        /// Log and skip files that cannot be read or written
        #[arg(long)]
        keep_going: bool,
    },

    /// List files whose imports would change; fails if there are any
    Check {
        /// Root to walk (defaults to `rewrite.default_root` from the config)
        #[arg(env = "IMPORTCASE_ROOT")]
        path: Option<String>,
    },

    /// Print the effective configuration
    Config,
}
