use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use verdant_ingest::IngestError;

/// An error response: HTTP status plus a human-readable message.
///
/// Every error body is `{ "error": "<message>" }`; no further error codes
/// are defined.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        let status = match &err {
            IngestError::Validation(_)
            | IngestError::InvalidInput(_)
            | IngestError::MetadataCorrupt { .. } => StatusCode::BAD_REQUEST,
            IngestError::NotFound(_) => StatusCode::NOT_FOUND,
            IngestError::Media(_) | IngestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_types::IdentityError;

    #[test]
    fn ingest_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(IngestError::Validation("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(IngestError::InvalidInput(IdentityError::EmptySlug {
                    title: "!".into(),
                })),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(IngestError::NotFound("2024-05-01-x".into())),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status, status);
        }
    }
}
