//! # Response Envelope
//!
//! Every response body, success or failure, has the same shape:
//!
//! ```json
//! {
//!   "description": "",
//!   "status_code": 201,
//!   "data": { "id": "…", "basket_id": "…", "product_id": "…", "quantity": 2 }
//! }
//! ```
//!
//! Errors put `{ "code", "message" }` in `data` (see [`crate::error::ApiError`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// The JSON body written for every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Empty on success; what went wrong otherwise.
    pub description: String,
    pub status_code: u16,
    pub data: T,
}

/// A successful handler result: status plus payload.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T> ApiResponse<T> {
    /// 200 OK.
    pub fn ok(data: T) -> Self {
        ApiResponse {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created.
    pub fn created(data: T) -> Self {
        ApiResponse {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        envelope(self.status, String::new(), self.data)
    }
}

/// Writes `data` wrapped in the envelope with the given status.
pub(crate) fn envelope<T: Serialize>(
    status: StatusCode,
    description: String,
    data: T,
) -> Response {
    let body = Envelope {
        description,
        status_code: status.as_u16(),
        data,
    };

    (status, Json(body)).into_response()
}
