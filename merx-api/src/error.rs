use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use merx_connect::ConnectError;
use merx_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    /// Request body failed validation before any work happened
    Validation(String),
    /// A domain calculation rejected its inputs
    Core(CoreError),
    /// A downstream collaborator failed; details are logged, not leaked
    Upstream(ConnectError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Core(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Upstream(err) => {
                tracing::error!("Upstream failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "generation failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<ConnectError> for AppError {
    fn from(err: ConnectError) -> Self {
        Self::Upstream(err)
    }
}

/// Require a non-blank string field
pub fn required_str<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Downgrade one optional data source: a failure becomes an explicit `None`
/// with a warn log, never a silently swallowed error
pub fn optional_source<T>(result: Result<T, ConnectError>, source: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(source, error = %err, "data source unavailable, continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_str() {
        assert_eq!(required_str("topic", Some("camping")).unwrap(), "camping");
        assert_eq!(required_str("topic", Some("  padded  ")).unwrap(), "padded");
        assert!(required_str("topic", None).is_err());
        assert!(required_str("topic", Some("   ")).is_err());
    }

    #[test]
    fn test_optional_source_downgrades_errors() {
        let ok: Result<u32, ConnectError> = Ok(7);
        assert_eq!(optional_source(ok, "shopping"), Some(7));

        let err: Result<u32, ConnectError> = Err(ConnectError::Status {
            status: 401,
            body: "no key".into(),
        });
        assert_eq!(optional_source(err, "shopping"), None);
    }
}
