use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// Error response for the REST surface.
///
/// Client errors carry a small JSON body; `404` is sent without one.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self { status, error, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NOT_FOUND {
            return self.status.into_response();
        }
        let body = serde_json::json!({"error": self.error, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            return Self::bad_request(e.to_string());
        }
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", None),
            other => {
                error!(err = %other, "ship request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some(other.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}
