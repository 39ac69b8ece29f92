use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::Envelope;
use serde::Serialize;

/// `200 OK` with `{"data": ..., "status": "SUCCESS"}`.
#[derive(Debug)]
pub struct ApiSuccess<T>(pub T);

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        Json(Envelope::success(self.0)).into_response()
    }
}
