use crate::errors::ImportCaseResult;
use crate::utils::Config;
use console::style;
use std::path::Path;

pub fn handle(config_dir: &Path, config: &Config) -> ImportCaseResult<()> {
    println!(
        "# {} {}",
        style("user config:").bold(),
        config_dir.join("importcase.local").display()
    );
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
