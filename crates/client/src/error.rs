/// Errors from the API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Status {
        status: u16,
        /// The server's `error` field, or the raw body when absent.
        message: String,
    },

    /// The session could not be refreshed; the stored credentials were cleared.
    #[error("Session expired, log in again")]
    Unauthorized,

    /// Reading or writing the token store failed.
    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Build a [`ClientError::Status`] from a response body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        ClientError::Status { status, message }
    }

    /// HTTP status of a [`ClientError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn message_is_taken_from_error_field() {
        let err = ClientError::from_body(400, r#"{"error":"Name must not be empty","code":"VALIDATION_ERROR"}"#);
        assert_matches!(err, ClientError::Status { status: 400, ref message } if message == "Name must not be empty");
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        let err = ClientError::from_body(502, " Bad Gateway \n");
        assert_matches!(err, ClientError::Status { status: 502, ref message } if message == "Bad Gateway");
        assert_eq!(err.status(), Some(502));
    }
}
