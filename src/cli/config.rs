use clap::{Parser, ValueEnum};

/// Output format for the effective configuration
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Print the built-in defaults as a starting point:\n    \
                   darth-waydr config > ~/.config/darth-waydr/config.yaml\n\n\
                   Print a custom file as JSON:\n    \
                   darth-waydr --config ./installer.yaml config --format json")]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = ConfigFormat::Yaml)]
    pub format: ConfigFormat,
}
