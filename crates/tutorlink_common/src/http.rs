// --- File: crates/tutorlink_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, TutorlinkError};

/// Extension trait for TutorlinkError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for TutorlinkError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

impl IntoResponse for TutorlinkError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a domain result into the JSON result shape Axum handlers return.
pub fn handle_json_result<T, E>(result: Result<T, E>) -> Result<Json<T>, TutorlinkError>
where
    T: serde::Serialize,
    E: Into<TutorlinkError>,
{
    result.map(Json).map_err(Into::into)
}
