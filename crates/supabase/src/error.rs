//! Error types for the identity and data store clients.
//!
//! The `Display` output of both enums is the bare upstream message so the
//! web layer can show it to the user verbatim.

/// Errors from the data store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A returned record did not match the expected shape.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors from the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unsupported sign-in provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid authorize URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Pull a human-readable message out of an error response body.
///
/// The data store reports `{"message": ...}`, the identity provider uses
/// `msg`, `error_description` or `error` depending on the endpoint. Falls back
/// to the raw body, then to the status code.
pub fn extract_message(status: u16, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                if !msg.is_empty() {
                    return msg.clone();
                }
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_store_message_field() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for table workouts"}"#;
        assert_eq!(
            extract_message(403, body),
            "permission denied for table workouts"
        );
    }

    #[test]
    fn reads_identity_error_shapes() {
        assert_eq!(extract_message(401, r#"{"msg":"Invalid JWT"}"#), "Invalid JWT");
        assert_eq!(
            extract_message(400, r#"{"error":"invalid_grant","error_description":"Code expired"}"#),
            "Code expired"
        );
    }

    #[test]
    fn falls_back_to_body_then_status() {
        assert_eq!(extract_message(502, "Bad Gateway\n"), "Bad Gateway");
        assert_eq!(extract_message(500, ""), "HTTP 500");
    }

    #[test]
    fn display_is_bare_message() {
        let err = StoreError::Rejected {
            status: 503,
            message: "network error".into(),
        };
        assert_eq!(err.to_string(), "network error");
    }
}
