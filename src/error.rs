use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Content cannot be empty")]
    EmptyContent,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote service answered {0}")]
    Status(reqwest::StatusCode),
}

impl RemoteError {
    /// The service was reached and refused the request (4xx).
    pub fn is_rejection(&self) -> bool {
        matches!(self, RemoteError::Status(status) if status.is_client_error())
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
