use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("File error: {0}")]
    File(String),

    #[error("Title '{0}' cannot be used as a path segment")]
    InvalidTitle(String),
}

/// FastAPI reports failures as `{"detail": "..."}`; validation failures use a
/// list there instead, which carries no single message.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| d.as_str().map(str::to_owned))
            .filter(|d| !d.is_empty());

        ApiError::Status { status, detail }
    }

    /// Text shown inline next to the form that triggered the request.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::File(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_extracted() {
        let err = ApiError::status(400, br#"{"detail":"File already exists"}"#);
        assert_eq!(err.detail_or("Failed to upload file"), "File already exists");
    }

    #[test]
    fn validation_list_falls_back() {
        let err = ApiError::status(422, br#"{"detail":[{"loc":["body"],"msg":"x"}]}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                detail: None
            }
        );
        assert_eq!(err.detail_or("Failed to register"), "Failed to register");
    }

    #[test]
    fn non_json_body_has_no_detail() {
        let err = ApiError::status(502, b"<html>bad gateway</html>");
        assert_eq!(err.detail_or("Failed to login"), "Failed to login");
    }

    #[test]
    fn network_errors_use_fallback() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.detail_or("Failed to login"), "Failed to login");
    }
}
