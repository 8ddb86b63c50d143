//! Error type shared by the client, session setup and reporter

use std::error::Error;
use std::fmt;
use std::io;

use reqwest::Error as ReqwestError;

/// Error types for API operations.
///
/// A response that arrived but could not be decoded is *not* an error for the
/// plain verb methods; see [`crate::api::Body`]. These variants cover the
/// failures that end an exploratory run.
#[derive(Debug)]
pub enum ApiError {
    Network(ReqwestError),
    Authentication(String),
    NotAuthenticated,
    NotFound(String),
    InvalidResponse(String),
    Encode(String),
    Io(io::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            ApiError::NotAuthenticated => write!(f, "Authentication error: no token set, log in first"),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Encode(msg) => write!(f, "Failed to encode request body: {}", msg),
            ApiError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            ApiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for ApiError {
    fn from(err: ReqwestError) -> Self {
        ApiError::Network(err)
    }
}

impl From<io::Error> for ApiError {
    fn from(err: io::Error) -> Self {
        ApiError::Io(err)
    }
}
