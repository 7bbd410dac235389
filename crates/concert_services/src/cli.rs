//! Command-line interface for concert_services

use argh::FromArgs;

/// Validate and inspect concert service descriptors
#[derive(FromArgs, Debug)]
pub struct CliArgs {
    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,

    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Validate(ValidateArgs),
    Show(ShowArgs),
    Herd(HerdArgs),
}

/// Validate a descriptor file or every descriptor in a directory
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "validate")]
pub struct ValidateArgs {
    /// descriptor file or services directory
    #[argh(positional)]
    pub path: String,
}

/// Print a descriptor after loading and validation
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "show")]
pub struct ShowArgs {
    /// descriptor file
    #[argh(positional)]
    pub path: String,

    /// output format: yaml, json (default: yaml)
    #[argh(option, short = 'f', default = "OutputFormat::Yaml", from_str_fn(parse_format))]
    pub format: OutputFormat,
}

/// Plan turtle clients: unique names, launcher text and flip rules
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "herd")]
pub struct HerdArgs {
    /// turtles to add (comma-separated)
    #[argh(option, short = 't', from_str_fn(parse_names))]
    pub turtles: Option<Vec<String>>,

    /// turtles already running (comma-separated)
    #[argh(option, short = 'e', from_str_fn(parse_names))]
    pub existing: Option<Vec<String>>,

    /// port of the first client (default: 11411)
    #[argh(option, default = "11411")]
    pub base_port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "yaml" => Ok(OutputFormat::Yaml),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Unknown format '{}'. Expected 'yaml' or 'json'", s)),
    }
}

/// Parse comma-separated name list
fn parse_names(s: &str) -> Result<Vec<String>, String> {
    Ok(s.split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect())
}

/// Map the --log-level option onto an env_logger filter
pub fn log_filter(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        _ => "info",
    }
}
