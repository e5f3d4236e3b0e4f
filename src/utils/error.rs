use thiserror::Error;

#[derive(Error, Debug)]
pub enum NectaError {
    #[error("HTTP request failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Failed to write {artifact}: {message}")]
    PersistError { artifact: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Fetch,
    Extraction,
    Persistence,
}

impl NectaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NectaError::ConfigError { .. }
            | NectaError::MissingConfigError { .. }
            | NectaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            NectaError::FetchError(_) | NectaError::HttpStatusError { .. } => ErrorCategory::Fetch,
            NectaError::ExtractionError { .. } => ErrorCategory::Extraction,
            NectaError::CsvError(_)
            | NectaError::IoError(_)
            | NectaError::SerializationError(_)
            | NectaError::PersistError { .. } => ErrorCategory::Persistence,
        }
    }

    /// Process exit code for a run aborted by this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Fetch => 3,
            ErrorCategory::Extraction => 4,
            ErrorCategory::Persistence => 5,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NectaError::FetchError(e) => format!("Could not fetch the results page: {}", e),
            NectaError::HttpStatusError { url, status } => {
                format!("The results server answered {} for {}", status, url)
            }
            NectaError::ExtractionError { message } => {
                format!("Could not read the results table: {}", message)
            }
            NectaError::MissingConfigError { field } => format!("Missing required option: {}", field),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Pass exactly one of --centre, --url or --html-file and check the option values"
            }
            ErrorCategory::Fetch => "Check the centre number or URL and your network connection",
            ErrorCategory::Extraction => {
                "Open the page in a browser and confirm it contains the results table"
            }
            ErrorCategory::Persistence => "Check that the output location is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, NectaError>;
