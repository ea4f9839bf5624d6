use crate::errors::ImportCaseResult;
use console::style;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static DEFAULT_CONFIG_TOML: &str = include_str!("../../default-importcase.conf");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WalkerConfig {
    /// Whether to follow symlinks or not.
    pub follow_symlinks: bool,

    /// Whether to visit hidden files and directories or not.
    pub scan_hidden_files: bool,

    /// Whether to respect VCS ignore files (`.gitignore`, ..) or not.
    pub read_vcsignore: bool,

    /// Directory names to skip.
    pub excluded_directories: Vec<String>,

    /// The maximum search depth, or `None` if no maximum search depth should be set.
    ///
    /// A depth of `1` includes all files directly under the root, a depth of `2` also includes
    /// all files under its subdirectories, etc.
    pub max_depth: Option<usize>,
}
impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            scan_hidden_files: true,
            read_vcsignore: false,
            excluded_directories: Vec::new(),
            max_depth: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RewriteConfig {
    /// Root directory used when none is given on the command line.
    pub default_root: String,

    /// Log and skip files that fail instead of aborting the run.
    pub keep_going: bool,
}
impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            default_root: "src".into(),
            keep_going: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether to print anything to the console or not.
    pub quiet: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub walker: WalkerConfig,
    pub rewrite: RewriteConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load(config_dir: &Path) -> ImportCaseResult<Self> {
        let mut config = Config::default();

        let default_config_path = config_dir.join("importcase.conf");
        if !default_config_path.exists() {
            create_example_config(config_dir)?;
        }

        let user_config_path = config_dir.join("importcase.local");
        if user_config_path.exists() {
            let user_config_content = fs::read_to_string(&user_config_path)?;
            let user_config: Config = toml::from_str(&user_config_content)?;

            config = merge_configs(config, user_config);

            tracing::debug!("loaded user config from {}", user_config_path.display());
            if !config.output.quiet {
                eprintln!(
                    "{}: Loaded user config from: {}",
                    style("note").green().bold(),
                    style(user_config_path.display()).underlined().bold()
                );
            }
        } else {
            tracing::debug!(
                "no user config at {}, using defaults",
                user_config_path.display()
            );
        }

        Ok(config)
    }
}

fn create_example_config(config_dir: &Path) -> ImportCaseResult<()> {
    let example_path = config_dir.join("importcase.conf");
    if !example_path.exists() {
        fs::write(&example_path, DEFAULT_CONFIG_TOML)?;
        tracing::debug!("Example config created at: {}", example_path.display());
    }
    Ok(())
}

/// Merge user config into default config, keeping default exclusions and
/// overriding everything else.
fn merge_configs(mut default: Config, user: Config) -> Config {
    // --- WalkerConfig ---
    default.walker.follow_symlinks = user.walker.follow_symlinks;
    default.walker.scan_hidden_files = user.walker.scan_hidden_files;
    default.walker.read_vcsignore = user.walker.read_vcsignore;
    default.walker.max_depth = user.walker.max_depth;

    default
        .walker
        .excluded_directories
        .extend(user.walker.excluded_directories);
    default.walker.excluded_directories.sort_unstable();
    default.walker.excluded_directories.dedup();

    // --- RewriteConfig ---
    default.rewrite.default_root = user.rewrite.default_root;
    default.rewrite.keep_going = user.rewrite.keep_going;

    // --- OutputConfig ---
    default.output.quiet = user.output.quiet;

    default
}

#[test]
fn embedded_example_config_parses_to_defaults() {
    let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
    assert_eq!(parsed, Config::default());
}

#[test]
fn merge_configs_dedupes_exclusions() {
    let mut default_cfg = Config::default();
    default_cfg.walker.excluded_directories = vec!["node_modules".into(), "dist".into()];

    let mut user_cfg = Config::default();
    user_cfg.walker.excluded_directories = vec![".next".into(), "dist".into()];

    let merged = merge_configs(default_cfg, user_cfg);

    assert_eq!(
        merged.walker.excluded_directories,
        vec![".next", "dist", "node_modules"]
    );
}

#[test]
fn load_creates_example_and_reads_user_overrides() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg_path = cfg_dir.path();

    let user_toml = r#"
        [walker]
        read_vcsignore = true
        excluded_directories = ["node_modules"]

        [rewrite]
        default_root = "app"

        [output]
        quiet = true
    "#;
    fs::write(cfg_path.join("importcase.local"), user_toml).unwrap();

    let cfg = Config::load(cfg_path).expect("Config::load should succeed");

    assert!(cfg_path.join("importcase.conf").is_file());

    assert!(cfg.walker.read_vcsignore);
    assert!(cfg.output.quiet);
    assert_eq!(cfg.rewrite.default_root, "app");
    assert_eq!(cfg.walker.excluded_directories, vec!["node_modules"]);

    assert!(!cfg.walker.follow_symlinks);
    assert!(cfg.walker.scan_hidden_files);
    assert!(!cfg.rewrite.keep_going);
}

#[test]
fn load_without_user_file_uses_defaults() {
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg = Config::load(cfg_dir.path()).unwrap();
    assert_eq!(cfg, Config::default());
}
