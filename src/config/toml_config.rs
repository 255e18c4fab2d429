use crate::core::ThresholdProvider;
use crate::domain::model::DEFAULT_HINT_TEXT;
use crate::utils::error::{Result, TrainerError};
use crate::utils::validation::{
    validate_non_empty_string, validate_ordered, validate_path, validate_positive_number,
    validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file for a workout session. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub framing: FramingConfig,
    pub counter: CounterConfig,
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    pub visibility_threshold: f64,
    pub min_shoulder_width: f64,
    pub max_shoulder_width: f64,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.65,
            min_shoulder_width: 0.10,
            max_shoulder_width: 0.80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub extended_angle: f64,
    pub flexed_angle: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            extended_angle: 160.0,
            flexed_angle: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub hint_text: String,
    pub render_every_frame: bool,
    pub ansi_colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hint_text: DEFAULT_HINT_TEXT.to_string(),
            render_every_frame: false,
            ansi_colors: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Landmark JSON-lines file, or `-` for stdin.
    pub path: Option<String>,
    pub max_frames: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_interval_frames: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_interval_frames: 300,
        }
    }
}

impl TrainerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrainerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrainerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrainerError::ConfigError {
            message: format!("environment pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let framing = &self.framing;
        validate_range(
            "framing.visibility_threshold",
            framing.visibility_threshold,
            0.0,
            1.0,
        )?;
        validate_range("framing.min_shoulder_width", framing.min_shoulder_width, 0.0, 1.0)?;
        validate_range("framing.max_shoulder_width", framing.max_shoulder_width, 0.0, 1.0)?;
        validate_ordered(
            "framing.min_shoulder_width",
            framing.min_shoulder_width,
            "framing.max_shoulder_width",
            framing.max_shoulder_width,
        )?;

        validate_range("counter.extended_angle", self.counter.extended_angle, 0.0, 180.0)?;
        validate_range("counter.flexed_angle", self.counter.flexed_angle, 0.0, 180.0)?;
        validate_ordered(
            "counter.flexed_angle",
            self.counter.flexed_angle,
            "counter.extended_angle",
            self.counter.extended_angle,
        )?;

        validate_non_empty_string("display.hint_text", &self.display.hint_text)?;

        if let Some(path) = &self.input.path {
            validate_path("input.path", path)?;
        }
        if let Some(max_frames) = self.input.max_frames {
            validate_positive_number("input.max_frames", max_frames, 1)?;
        }
        validate_positive_number(
            "monitoring.log_interval_frames",
            self.monitoring.log_interval_frames,
            1,
        )?;

        Ok(())
    }
}

impl ThresholdProvider for TrainerConfig {
    fn visibility_threshold(&self) -> f64 {
        self.framing.visibility_threshold
    }

    fn min_shoulder_width(&self) -> f64 {
        self.framing.min_shoulder_width
    }

    fn max_shoulder_width(&self) -> f64 {
        self.framing.max_shoulder_width
    }

    fn extended_angle(&self) -> f64 {
        self.counter.extended_angle
    }

    fn flexed_angle(&self) -> f64 {
        self.counter.flexed_angle
    }

    fn hint_text(&self) -> &str {
        &self.display.hint_text
    }
}

impl Validate for TrainerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TrainerConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.visibility_threshold(), 0.65);
        assert_eq!(config.min_shoulder_width(), 0.10);
        assert_eq!(config.max_shoulder_width(), 0.80);
        assert_eq!(config.extended_angle(), 160.0);
        assert_eq!(config.flexed_angle(), 30.0);
        assert_eq!(config.hint_text(), "Stand angled 45 deg for best results");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_sections() {
        let toml_content = r#"
[framing]
visibility_threshold = 0.5

[counter]
flexed_angle = 40.0

[input]
path = "session.jsonl"
max_frames = 900
"#;

        let config = TrainerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.framing.visibility_threshold, 0.5);
        assert_eq!(config.framing.max_shoulder_width, 0.80);
        assert_eq!(config.counter.flexed_angle, 40.0);
        assert_eq!(config.counter.extended_angle, 160.0);
        assert_eq!(config.input.path.as_deref(), Some("session.jsonl"));
        assert_eq!(config.input.max_frames, Some(900));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CURL_COUNTER_TEST_HINT", "Face the camera");

        let toml_content = r#"
[display]
hint_text = "${CURL_COUNTER_TEST_HINT}"
"#;

        let config = TrainerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.display.hint_text, "Face the camera");

        std::env::remove_var("CURL_COUNTER_TEST_HINT");
    }

    #[test]
    fn test_inverted_shoulder_bounds_rejected() {
        let toml_content = r#"
[framing]
min_shoulder_width = 0.6
max_shoulder_width = 0.4
"#;

        let config = TrainerConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(TrainerError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "framing.min_shoulder_width")
            }
            other => panic!("expected invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_angle_rejected() {
        let toml_content = r#"
[counter]
extended_angle = 200.0
"#;

        let config = TrainerConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = TrainerConfig::from_toml_str("[framing\nvisibility_threshold = ");
        assert!(matches!(
            result,
            Err(TrainerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[monitoring]
enabled = true
log_interval_frames = 60
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TrainerConfig::from_file(temp_file.path()).unwrap();
        assert!(config.monitoring.enabled);
        assert_eq!(config.monitoring.log_interval_frames, 60);
    }
}
