use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use sas_annotate::AnnotateError;
use sas_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("no such user: {0}")]
    UserNotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("annotation error: {0}")]
    Annotate(#[from] AnnotateError),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownOwner(nickname) => Self::UserNotFound(nickname),
            other => Self::Store(other),
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::UserNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Annotate(e) if e.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(e) if e.is_transient() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ServerError::AuthFailed("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ServerError::from(StoreError::UnknownOwner("bob".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::from(AnnotateError::StoreUnavailable(StoreError::Unavailable("down".into()))).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServerError::from(AnnotateError::from(StoreError::LockPoisoned("x".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::from(AnnotateError::malformed(3, "no id")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::from(AnnotateError::InvalidViewer("blank".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
