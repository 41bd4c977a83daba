//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use resume_core::ResumeConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value by dotted key
    Get {
        /// Dotted key (e.g., "acquisition.min_text_length")
        key: String,
    },

    /// Change one value by dotted key
    Set {
        /// Dotted key (e.g., "ocr.backend")
        key: String,
        /// New value, as JSON or a bare string
        value: String,
    },

    /// Print the configuration file location
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (default: the configuration path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                eprintln!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&read_or_default(&path)?)?);
        }
        ConfigCommand::Init(init) => {
            let output = init.output.unwrap_or(path);
            if output.exists() && !init.force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    output.display()
                );
            }
            write_config(&output, &ResumeConfig::default())?;
            println!("{} Created {}", style("✓").green(), output.display());
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(read_or_default(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&json, &key)?)?);
        }
        ConfigCommand::Set { key, value } => {
            let value = parse_value(&value);
            let mut json = serde_json::to_value(read_or_default(&path)?)?;
            assign(&mut json, &key, value.clone())?;

            let config: ResumeConfig = serde_json::from_value(json)
                .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
            write_config(&path, &config)?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "{} Not created yet; run 'resume config init'.",
                    style("ℹ").yellow()
                );
            }
        }
    }

    Ok(())
}

fn read_or_default(path: &Path) -> anyhow::Result<ResumeConfig> {
    if path.exists() {
        Ok(ResumeConfig::from_file(path)?)
    } else {
        Ok(ResumeConfig::default())
    }
}

fn write_config(path: &Path, config: &ResumeConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Anything that is not valid JSON is taken as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(json, |current, part| {
        current
            .get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

/// Replace an existing value; unknown keys are rejected.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let slot = key.split('.').try_fold(json, |current, part| {
        current
            .get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })?;
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("80"), json!(80));
        assert_eq!(parse_value("false"), json!(false));
        assert_eq!(parse_value(r#"["rust"]"#), json!(["rust"]));
        assert_eq!(parse_value("onnx"), json!("onnx"));
    }

    #[test]
    fn test_lookup_dotted_key() {
        let json = serde_json::to_value(ResumeConfig::default()).unwrap();
        assert_eq!(lookup(&json, "acquisition.min_text_length").unwrap(), &json!(50));
        assert_eq!(lookup(&json, "ocr.language").unwrap(), &json!("eng"));
        assert!(lookup(&json, "ocr.nope").is_err());
    }

    #[test]
    fn test_assign_existing_keys_only() {
        let mut json = serde_json::to_value(ResumeConfig::default()).unwrap();
        assign(&mut json, "ocr.backend", json!("disabled")).unwrap();
        assert!(assign(&mut json, "acquisition.unknown", json!(1)).is_err());

        let config: ResumeConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.ocr.backend, resume_core::models::config::OcrBackendKind::Disabled);
    }
}
