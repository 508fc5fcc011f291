use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid record: {0}")]
    Decode(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Postgres unique_violation, surfaced by PostgREST on duplicate inserts
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Error body shape returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RepositoryError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    /// Pull a readable message out of a PostgREST error body, if it is one.
    fn describe_body(body: &str) -> String {
        match serde_json::from_str::<PostgrestError>(body) {
            Ok(PostgrestError { code: Some(code), .. }) if code == UNIQUE_VIOLATION_CODE => {
                "duplicate registration".to_string()
            }
            Ok(PostgrestError { message: Some(message), .. }) => Self::truncate_body(&message),
            _ => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::describe_body(body);
        match status.as_u16() {
            408 => RepositoryError::Network(format!("request timed out: {}", detail)),
            409 => RepositoryError::Rejected(if detail.is_empty() {
                "duplicate registration".to_string()
            } else {
                detail
            }),
            429 => RepositoryError::Unknown(format!("rate limited: {}", detail)),
            400..=499 => RepositoryError::Rejected(format!("Status {}: {}", status, detail)),
            _ => RepositoryError::Unknown(format!("Status {}: {}", status, detail)),
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() {
            RepositoryError::Network(err.to_string())
        } else {
            RepositoryError::Unknown(err.to_string())
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_conflict_is_rejected() {
        let err = RepositoryError::from_status(StatusCode::CONFLICT, "");
        assert_eq!(err, RepositoryError::Rejected("duplicate registration".to_string()));
    }

    #[test]
    fn test_unique_violation_body_reads_as_duplicate() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"registrations_event_id_email_key\""}"#;
        let err = RepositoryError::from_status(StatusCode::BAD_REQUEST, body);
        assert_eq!(
            err,
            RepositoryError::Rejected("Status 400 Bad Request: duplicate registration".to_string())
        );
    }

    #[test]
    fn test_postgrest_message_is_extracted() {
        let body = r#"{"code":"23502","message":"null value in column \"name\""}"#;
        match RepositoryError::from_status(StatusCode::BAD_REQUEST, body) {
            RepositoryError::Rejected(msg) => assert!(msg.ends_with("null value in column \"name\"")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_status_classes() {
        assert!(matches!(
            RepositoryError::from_status(StatusCode::REQUEST_TIMEOUT, ""),
            RepositoryError::Network(_)
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::FORBIDDEN, "denied"),
            RepositoryError::Rejected(_)
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            RepositoryError::Unknown(_)
        ));
        assert!(matches!(
            RepositoryError::from_status(StatusCode::BAD_GATEWAY, "<html>"),
            RepositoryError::Unknown(_)
        ));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = RepositoryError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with(&format!("(truncated, {} total bytes)", long.len())));
        assert_eq!(RepositoryError::truncate_body("short"), "short");
    }
}
