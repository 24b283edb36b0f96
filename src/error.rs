use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Browser launch failed: {0}")]
    LaunchError(String),

    #[error("Navigation failed: {0}")]
    NavigationError(String),

    #[error("Form field not found: {0}")]
    FieldNotFound(String),

    #[error("Field '{field}' rejected the value: {reason}")]
    ValueRejected { field: String, reason: String },

    #[error("Submit failed: {0}")]
    SubmitError(String),

    #[error("JavaScript error: {0}")]
    JsError(String),

    #[error("CDP error: {0}")]
    CdpError(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Exit code the CLI reports for this error: 3 for launch/setup
    /// failures, 4 for invalid input, 6 for errors during automation.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ConfigError(_) => 4,
            Error::LaunchError(_) | Error::IoError(_) => 3,
            Error::NavigationError(_)
            | Error::FieldNotFound(_)
            | Error::ValueRejected { .. }
            | Error::SubmitError(_)
            | Error::JsError(_)
            | Error::CdpError(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
