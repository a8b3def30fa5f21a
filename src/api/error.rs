//! Error type for users API calls

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-2xx status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Transport failure, timeout or body encoding problem
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot address the users resource
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status code when the service responded
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::Url(_) => None,
        }
    }
}
