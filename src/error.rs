//! Error types.
//!
//! `DataError` is the typed taxonomy for everything that can go wrong between
//! the wire and a chart-ready value. `AppError` is the process-boundary error:
//! a message plus the exit code `main` should use.

/// Errors produced while fetching or reshaping remote data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Transport failure: connection error, timeout, or non-success HTTP status.
    Network(String),
    /// The response decoded, but its shape does not match the expected payload
    /// (missing fields, wrong types, or misaligned historical series).
    MalformedResponse(String),
    /// A historical date key does not match the `M/D/YY` pattern.
    MalformedDateKey(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Network(msg) => write!(f, "network failure: {msg}"),
            DataError::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
            DataError::MalformedDateKey(key) => {
                write!(f, "malformed date key '{key}' (expected M/D/YY)")
            }
        }
    }
}

impl std::error::Error for DataError {}

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

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::new(4, err.to_string())
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
