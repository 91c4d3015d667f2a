pub mod events;
pub mod queries;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use daybook_core::DaybookError;
use serde::Serialize;

/// Decoded form body or query string pairs.
///
/// Read the way `url.Values.Get` reads them: the first value of a repeated key
/// wins and a missing key reads as empty, so neither is a decoding error.
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, key: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }
}

impl From<Vec<(String, String)>> for Params {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Params(pairs)
    }
}

/// Standard API success response
#[derive(Serialize)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    pub fn json(result: T) -> Json<Self> {
        Json(ResultResponse { result })
    }
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert daybook errors to HTTP responses.
///
/// Invalid input maps to 400. Business-logic failures (duplicate id, unknown
/// id, nothing found) map to 503.
pub struct AppError(DaybookError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_validation() {
            tracing::info!(error = %self.0, "Request is not fulfilled");
        } else {
            tracing::warn!(error = %self.0, "Business logic error");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<DaybookError> for AppError {
    fn from(err: DaybookError) -> Self {
        Self(err)
    }
}
