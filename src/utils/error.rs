use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Pose source error at line {line}: {message}")]
    SourceError { line: usize, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrainerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrainerError::ConfigError { .. }
            | TrainerError::ConfigValidationError { .. }
            | TrainerError::InvalidConfigValueError { .. }
            | TrainerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TrainerError::SourceError { .. } | TrainerError::SerializationError(_) => {
                ErrorCategory::Input
            }
            TrainerError::RenderError { .. } => ErrorCategory::Output,
            TrainerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            // A broken replay line ends the session but the counts so far are valid.
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TrainerError::ConfigError { .. } | TrainerError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax and section names"
            }
            TrainerError::InvalidConfigValueError { .. } => {
                "Adjust the reported value; thresholds are fractions in [0, 1] and angles are degrees in [0, 180]"
            }
            TrainerError::MissingConfigError { .. } => {
                "Add the missing field to the configuration file or pass it on the command line"
            }
            TrainerError::SourceError { .. } | TrainerError::SerializationError(_) => {
                "Make sure the landmark stream is JSON lines with one frame object per line"
            }
            TrainerError::RenderError { .. } => "Check that the output stream is still open",
            TrainerError::IoError(_) => "Check that the input file exists and is readable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TrainerError::SourceError { line, message } => {
                format!("Could not read pose frame on line {}: {}", line, message)
            }
            TrainerError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = TrainerError::InvalidConfigValueError {
            field: "framing.visibility_threshold".to_string(),
            value: "1.5".to_string(),
            reason: "out of range".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("framing.visibility_threshold"));
    }

    #[test]
    fn test_source_error_message_names_line() {
        let err = TrainerError::SourceError {
            line: 7,
            message: "expected value".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("line 7"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: TrainerError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
