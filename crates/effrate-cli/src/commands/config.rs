//! Config command implementation.
//!
//! Settings live in a flat JSON object at `<config dir>/effrate/config.json`
//! unless `--config` or `EFFRATE_CONFIG` points elsewhere.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Decimal places for amounts and percentages
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn parse(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", s))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Decimal places for amounts and rates (0-8)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "2",
            Self::UseColors => "true",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::DefaultFormat, Self::DecimalPrecision, Self::UseColors]
    }
}

/// Stored key/value pairs.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn value(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Resolved settings used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Output format.
    pub format: OutputFormat,
    /// Decimal places for amounts and percentages.
    pub precision: usize,
    /// Whether colored output is enabled.
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 2,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Loads settings from the config file, falling back to defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = config_path(override_path)?;
        let config = Config::load(&path)?;
        Self::from_config(&config)
    }

    fn from_config(config: &Config) -> Result<Self> {
        for key in ConfigKey::all() {
            validate_config_value(*key, config.value(*key))
                .map_err(|e| CliError::Config(e.to_string()))?;
        }
        Ok(Self {
            format: OutputFormat::from_name(config.value(ConfigKey::DefaultFormat))
                .unwrap_or_default(),
            precision: config.value(ConfigKey::DecimalPrecision).parse()?,
            use_colors: parse_bool(config.value(ConfigKey::UseColors)).unwrap_or(true),
        })
    }

    /// Overrides the configured format with one given on the command line.
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Disables colors globally when configured off.
    pub fn apply_color_preference(&self) {
        if !self.use_colors {
            colored::control::set_override(false);
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Get the config file path.
fn config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("effrate").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, settings: &Settings, override_path: Option<&Path>) -> Result<()> {
    let path = config_path(override_path)?;
    match args.command {
        ConfigCommand::Show => execute_show(&path, settings.format),
        ConfigCommand::Get(get_args) => execute_get(&path, &get_args, settings.format),
        ConfigCommand::Set(set_args) => execute_set(&path, set_args),
        ConfigCommand::List => execute_list(settings.format),
        ConfigCommand::Reset(reset_args) => execute_reset(&path, reset_args),
        ConfigCommand::Path => execute_path(&path),
    }
}

/// Show current configuration.
fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load(path)?;

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
                .collect();
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, &str> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(path: &Path, args: &GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load(path)?;
    let key = ConfigKey::parse(&args.key)?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(path: &Path, args: SetArgs) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    validate_config_value(key, &args.value)?;

    let mut config = Config::load(path)?;
    config.set(key, args.value.clone());
    config.save(path)?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<KeyValue> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Available Configuration Keys");
            }
            print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(path: &Path, args: ResetArgs) -> Result<()> {
    let mut config = Config::load(path)?;

    if args.all {
        config.clear();
        config.save(path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::parse(&key_str)?;
        config.remove(key);
        config.save(path)?;
        print_success(&format!("Reset {} to default ({})", key.as_str(), key.default_value()));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::DefaultFormat => {
            if OutputFormat::from_name(value).is_none() {
                return Err(anyhow::anyhow!(
                    "Invalid format: {}. Use table, json, csv, or minimal.",
                    value
                ));
            }
        }
        ConfigKey::DecimalPrecision => {
            let precision: usize = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid precision: {}. Must be a number.", value))?;
            if precision > 8 {
                return Err(anyhow::anyhow!(
                    "Invalid precision: {}. Must be between 0 and 8.",
                    precision
                ));
            }
        }
        ConfigKey::UseColors => {
            if parse_bool(value).is_none() {
                return Err(anyhow::anyhow!(
                    "Invalid boolean: {}. Use true or false.",
                    value
                ));
            }
        }
    }
    Ok(())
}
