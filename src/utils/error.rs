use crate::domain::model::RequestCategory;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to map {category} response: {message}")]
    MappingError {
        category: RequestCategory,
        message: String,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown command: {input}")]
    UnknownCommandError { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PollerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PollerError::HttpError(_) | PollerError::UnexpectedStatusError { .. } => {
                ErrorCategory::Network
            }
            PollerError::SerializationError(_) | PollerError::MappingError { .. } => {
                ErrorCategory::Data
            }
            PollerError::TomlError(_)
            | PollerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PollerError::IoError(_) => ErrorCategory::System,
            PollerError::UnknownCommandError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            PollerError::HttpError(_) => "Could not reach the feed endpoint".to_string(),
            PollerError::UnexpectedStatusError { status, .. } => {
                format!("The feed endpoint answered with HTTP {}", status)
            }
            PollerError::IoError(e) => format!("File system error: {}", e),
            PollerError::SerializationError(_) => "Could not encode the snapshot".to_string(),
            PollerError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            PollerError::MappingError { category, .. } => {
                format!("The {} feed returned data that cannot be displayed", category)
            }
            PollerError::InvalidConfigValueError { field, .. } => {
                format!("Configuration value for '{}' is invalid", field)
            }
            PollerError::UnknownCommandError { input } => format!("Unknown command '{}'", input),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check your network connection and the feed URLs, polling continues on the next tick"
                    .to_string()
            }
            ErrorCategory::Data => "Verify that the feed URL points at the expected service".to_string(),
            ErrorCategory::Configuration => {
                "Fix the command line flags or the TOML configuration file and try again".to_string()
            }
            ErrorCategory::System => "Check the output path permissions and free disk space".to_string(),
            ErrorCategory::Input => "Type 'help' to list the available commands".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PollerError>;
