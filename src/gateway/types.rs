//! Unified API response/error shape: `ApiResponse<T>`, `ApiResult<T>`,
//! `ApiError` with `IntoResponse`, and this crate's own `error_codes`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), (StatusCode, Json<ApiResponse<()>>)>;

#[inline]
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_FAILED, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::ITEM_NOT_FOUND, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg)
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err((self.status, Json(ApiResponse::<()>::error(self.code, self.message))))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.message));
        (self.status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

pub mod error_codes {
    pub const VALIDATION_FAILED: i32 = 1001;
    pub const ITEM_NOT_FOUND: i32 = 4001;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// `POST /complete` response body.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    #[serde(rename = "updatedOrderList")]
    pub updated_order_list: Vec<crate::domain::Item>,
    #[serde(rename = "updatedTotalOrders")]
    pub updated_total_orders: u64,
    #[serde(rename = "updatedTotalDrinks")]
    pub updated_total_drinks: u64,
}

/// `GET /history` response body.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    #[serde(rename = "completedItems")]
    pub completed_items: Vec<crate::domain::Order>,
    #[serde(rename = "ordersComplete")]
    pub orders_complete: u64,
    #[serde(rename = "drinksComplete")]
    pub drinks_complete: u64,
}
