//! Command line parsing

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Compile the home and print the result as JSON
    Compile,
    /// Compile the home and print a summary
    Check,
    /// Print the device type catalog
    Dump,
    Help,
}

/// A `--preset` selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSelection {
    pub area: Option<String>,
    pub device: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub home_file: Option<PathBuf>,
    pub device_types: Option<PathBuf>,
    pub presets: Vec<PresetSelection>,
}

impl Args {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            Some("compile") => Command::Compile,
            Some("check") => Command::Check,
            Some("dump") => Command::Dump,
            Some("help" | "--help" | "-h") | None => Command::Help,
            Some(other) => bail!("Unknown command: {other}"),
        };

        let mut parsed = Args {
            command,
            home_file: None,
            device_types: None,
            presets: Vec::new(),
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--device-types" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--device-types requires a directory"))?;
                    parsed.device_types = Some(PathBuf::from(path));
                }
                "--preset" => {
                    let selection = args
                        .next()
                        .ok_or_else(|| anyhow!("--preset requires [AREA/]DEVICE=KEY"))?;
                    parsed.presets.push(parse_preset(&selection)?);
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {flag}"),
                _ if parsed.home_file.is_none() && command != Command::Dump => {
                    parsed.home_file = Some(PathBuf::from(arg));
                }
                _ => bail!("Unexpected argument: {arg}"),
            }
        }
        Ok(parsed)
    }
}

/// `Area/Device=key`, or `Device=key` for a service device
fn parse_preset(selection: &str) -> Result<PresetSelection> {
    let (target, key) = selection
        .split_once('=')
        .filter(|(target, key)| !target.is_empty() && !key.is_empty())
        .ok_or_else(|| anyhow!("Invalid preset '{selection}', expected [AREA/]DEVICE=KEY"))?;
    let (area, device) = match target.split_once('/') {
        Some((area, device)) => (Some(area.to_string()), device.to_string()),
        None => (None, target.to_string()),
    };
    Ok(PresetSelection {
        area,
        device,
        key: key.to_string(),
    })
}

pub fn print_usage() {
    eprintln!("Synthetic Home - compile device models into entities");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  synthetic-home compile [HOME] [--device-types DIR] [--preset [AREA/]DEVICE=KEY]...");
    eprintln!("  synthetic-home check [HOME] [--device-types DIR] [--preset [AREA/]DEVICE=KEY]...");
    eprintln!("  synthetic-home dump [--device-types DIR]");
    eprintln!();
    eprintln!("Defaults come from synthetic_home.yaml and SYNTHETIC_HOME_* variables.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  synthetic-home check home.yaml");
    eprintln!("  synthetic-home compile home.yaml --preset 'Porch/Camera=motion-detected'");
    eprintln!("  synthetic-home dump --device-types ./device_types");
}
