use thiserror::Error;

/// Result type alias for kdocs operations
pub type Result<T> = std::result::Result<T, KdocsError>;

/// Errors that can occur during kdocs operations
#[derive(Error, Debug)]
pub enum KdocsError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No session credential stored
    #[error("Not logged in. Run 'kdocs login <wps_sid>' first.")]
    AuthMissing,

    /// API error with HTTP status
    #[error("Kdocs API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Credential store error
    #[error("Credential store error: {0}")]
    Secret(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl KdocsError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::AuthMissing => 3,
            _ => 1,
        }
    }
}
