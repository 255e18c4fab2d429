use crate::config::toml_config::TrainerConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text HUD on stdout
    #[default]
    Console,
    /// One JSON line of render commands per frame
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "curl-counter")]
#[command(about = "Counts bicep curls per arm from a stream of pose landmarks")]
pub struct CliConfig {
    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Landmark JSON-lines file, `-` for stdin (overrides input.path)
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    pub output: OutputFormat,

    /// Stop after this many frames (overrides input.max_frames)
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Print the HUD on every frame instead of only when it changes
    #[arg(long)]
    pub every_frame: bool,

    /// Colorize console output
    #[arg(long)]
    pub color: bool,

    /// Leave skeleton commands out of JSON output
    #[arg(long)]
    pub no_skeleton: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the settings file (or defaults), applies command-line overrides and validates.
    pub fn resolve(&self) -> Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TrainerConfig::from_file(path)?
            }
            None => TrainerConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input.path = Some(input.clone());
        }
        if let Some(max_frames) = self.max_frames {
            config.input.max_frames = Some(max_frames);
        }
        if self.every_frame {
            config.display.render_every_frame = true;
        }
        if self.color {
            config.display.ansi_colors = true;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }

        validate_required_field("input.path", &config.input.path)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TrainerError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_arguments() {
        let cli = CliConfig::parse_from([
            "curl-counter",
            "--input",
            "session.jsonl",
            "--output",
            "json",
            "--max-frames",
            "120",
        ]);
        assert_eq!(cli.input.as_deref(), Some("session.jsonl"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.max_frames, Some(120));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\npath = \"from-file.jsonl\"\nmax_frames = 10\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "curl-counter",
            "--config",
            &path,
            "--input",
            "-",
            "--monitor",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.input.path.as_deref(), Some("-"));
        assert_eq!(config.input.max_frames, Some(10));
        assert!(config.monitoring.enabled);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let cli = CliConfig::parse_from(["curl-counter"]);
        assert!(matches!(
            cli.resolve(),
            Err(TrainerError::MissingConfigError { field }) if field == "input.path"
        ));
    }
}
