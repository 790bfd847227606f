use thiserror::Error;

/// Error type covering every fatal path in the application.
///
/// Transport errors are retried for schedule fetches and fatal everywhere
/// else; parse, authentication, and filesystem errors are always fatal.
/// `main` is the single place these terminate the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// Network request failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// Response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Resource type is not one of rooms, teachers, students
    #[error("Resource type '{0}' is not valid (expected rooms, teachers or students)")]
    InvalidResourceType(String),
    /// Date string could not be parsed as DD.MM.YYYY
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
    /// Login endpoint answered with a non-200 status
    #[error("Login failed with status code {status}")]
    LoginRejected { status: u16 },
    /// Invalid input format
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
