use thiserror::Error;

/// Process-level error: a message plus the exit code `main` should return.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to retrieve one series (or the source as a whole).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request for {series_id} failed: {message}")]
    Request { series_id: String, message: String },

    #[error("request for {series_id} returned status {status}")]
    Status { series_id: String, status: u16 },

    #[error("malformed response for {series_id}: {message}")]
    Parse { series_id: String, message: String },

    #[error("invalid observation date '{raw}' in {series_id}")]
    InvalidDate { series_id: String, raw: String },

    #[error("data source unreachable: {0}")]
    Unreachable(String),
}
