//! `HmpiError` -> HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hmpi_core::error::{ClientCode, HmpiError};

#[derive(Debug)]
pub struct ApiError(pub HmpiError);

impl From<HmpiError> for ApiError {
    fn from(e: HmpiError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::InvalidFileFormat
        | ClientCode::NoRecognizedColumns
        | ClientCode::EmptySample
        | ClientCode::MalformedValue
        | ClientCode::BadRequest
        | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::InvalidReference | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let body = json!({
            "success": false,
            "error": {
                "code": code.as_str(),
                "message": self.0.to_string(),
            }
        });
        (status_for(code), Json(body)).into_response()
    }
}
