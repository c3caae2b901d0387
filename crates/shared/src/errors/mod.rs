mod error;
mod http;

pub use self::error::ErrorResponse;
pub use self::http::HttpError;

use validator::ValidationErrors;

/// Extracts a human-readable message from a service error body. Bodies are
/// expected to carry the message under `message`, `detail` or `error`; a body
/// that matches none of them yields `None` and the caller falls back to a
/// generic message.
pub fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body)
        && !parsed.message.is_empty()
    {
        return Some(parsed.message);
    }

    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    for key in ["detail", "message", "error"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }

    None
}

pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "length" => "Invalid length".to_string(),
                    "range" => "Value out of range".to_string(),
                    _ => format!("Invalid {field}"),
                });
            messages.push(format!("{field}: {message}"));
        }
    }

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }

    messages
}
