use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error object the backend returns in place of a regular body,
/// e.g. `{"status": 401, "reason": "Username or Password Error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("server error {status}: {reason}")]
pub struct ApiError {
    pub status: u16,
    pub reason: String,
}

impl ApiError {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    /// Attempts to read an error object out of a raw response body.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_error_object_from_body() {
        let err = ApiError::from_body(br#"{"status":401,"reason":"Username or Password Error"}"#)
            .expect("error body");
        assert_eq!(err, ApiError::new(401, "Username or Password Error"));
        assert_eq!(
            err.to_string(),
            "server error 401: Username or Password Error"
        );
    }

    #[test]
    fn ignores_regular_bodies() {
        assert!(ApiError::from_body(br#"{"artist_ids":[]}"#).is_none());
        assert!(ApiError::from_body(b"<html></html>").is_none());
    }
}
