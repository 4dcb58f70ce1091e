use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Lookup request for number [{number}] failed: {source}")]
    LookupRequestError {
        number: String,
        source: reqwest::Error,
    },

    #[error("Lookup for number [{number}] returned HTTP status {status}")]
    LookupFailedError { number: String, status: u16 },

    #[error("Malformed lookup response for number [{number}]: {source}")]
    MalformedResponseError {
        number: String,
        source: serde_json::Error,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Remote,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::LookupRequestError { .. }
            | EtlError::LookupFailedError { .. }
            | EtlError::MalformedResponseError { .. } => ErrorCategory::Remote,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Io => ErrorSeverity::High,
            // The on-disk checkpoint makes a rerun a safe recovery path
            ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingConfigError { .. } => {
                "Add the missing field to the configuration file"
            }
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again"
            }
            EtlError::IoError(_) => "Check file permissions and that the paths exist",
            EtlError::LookupRequestError { .. }
            | EtlError::LookupFailedError { .. }
            | EtlError::MalformedResponseError { .. } => {
                "Re-run the command; numbers already fetched are skipped automatically"
            }
            EtlError::CsvError(_) => "Check the input file is well-formed CSV",
            EtlError::SerializationError(_) | EtlError::ProcessingError { .. } => {
                "Inspect the offending record named in the error"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Remote => format!("Lookup service problem: {}", self),
            ErrorCategory::Processing => format!("Data problem: {}", self),
        }
    }
}
