//! Classification of response bodies

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::trace;

use crate::api::ApiError;

/// What the server sent back, as far as JSON is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Zero-length or whitespace-only body (e.g. `204 No Content`).
    Empty,
    /// Body decoded as JSON.
    Json(Value),
    /// Body present but not JSON; the raw text is kept for inspection.
    Invalid(String),
}

impl Body {
    /// Classifies raw response text.
    pub fn classify(text: String) -> Self {
        if text.trim().is_empty() {
            return Body::Empty;
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Invalid(text),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => write!(f, "<empty body>"),
            Body::Json(value) => write!(f, "{}", value),
            Body::Invalid(text) => write!(f, "<non-JSON body> {}", text),
        }
    }
}

/// Status and classified body of one exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Body,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Body) -> Self {
        ApiResponse { status, body }
    }

    /// Reads the full body and classifies it. Only a failure to read the body
    /// off the wire is an error.
    pub async fn from_response(response: Response) -> Result<Self, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        trace!(%status, bytes = text.len(), "response received");
        Ok(ApiResponse::new(status, Body::classify(text)))
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The decoded JSON, or `None` when the body was empty or not JSON.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Decodes the body into `T`, for the few calls whose result a scenario
    /// depends on.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        match &self.body {
            Body::Json(value) => serde_json::from_value(value.clone()).map_err(|e| {
                ApiError::InvalidResponse(format!(
                    "unexpected JSON shape (status {}): {}",
                    self.status, e
                ))
            }),
            Body::Empty => Err(ApiError::InvalidResponse(format!(
                "expected a JSON body, got an empty one (status {})",
                self.status
            ))),
            Body::Invalid(text) => Err(ApiError::InvalidResponse(format!(
                "expected a JSON body (status {}): {}",
                self.status, text
            ))),
        }
    }
}
