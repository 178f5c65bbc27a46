//! Config command: print the effective configuration

use std::path::Path;

use crate::cli::{ConfigArgs, ConfigFormat};
use crate::config::InstallerConfig;
use crate::error::Result;

/// Print the configuration an install run would use
pub fn run(config_path: Option<&Path>, args: &ConfigArgs) -> Result<()> {
    let config = InstallerConfig::load(config_path)?;
    print!("{}", render(&config, args.format)?);
    Ok(())
}

fn render(config: &InstallerConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Yaml => config.to_yaml(),
        ConfigFormat::Json => config.to_json().map(|json| json + "\n"),
    }
}
