use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use greenloop_core::DomainError;
use greenloop_infra::storage::StorageError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn storage_error_to_response(err: StorageError) -> axum::response::Response {
    match err {
        StorageError::NotFound(id) => json_error(StatusCode::NOT_FOUND, "not_found", format!("asset {id} not found")),
        other => {
            tracing::error!(error = %other, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", other.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
