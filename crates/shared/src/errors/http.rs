use thiserror::Error;

/// Classification of a failed call against a remote service. Any non-2xx
/// response or transport failure ends up here; callers only ever see this
/// shape, never a raw `reqwest::Error`.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let msg = message.unwrap_or_else(|| format!("Service returned status {status}"));

        match status {
            400 => HttpError::BadRequest(msg),
            401 | 403 => HttpError::Unauthorized(msg),
            404 => HttpError::NotFound(msg),
            409 => HttpError::Conflict(msg),
            502 | 503 | 504 => HttpError::ServiceUnavailable(msg),
            _ => HttpError::Internal(msg),
        }
    }

    /// Message suitable for inline display. Transport failures collapse to a
    /// generic message; server-reported errors surface the extracted text.
    pub fn user_message(&self) -> String {
        match self {
            HttpError::Network(_) | HttpError::Timeout => {
                "Could not reach service. Please try again.".to_string()
            }
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::NotFound(msg)
            | HttpError::Conflict(msg)
            | HttpError::ServiceUnavailable(msg)
            | HttpError::Internal(msg) => msg.clone(),
            HttpError::Decode(_) => "Service returned an unexpected response.".to_string(),
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_decode() {
            HttpError::Decode(err.to_string())
        } else {
            HttpError::Network(err.to_string())
        }
    }
}
