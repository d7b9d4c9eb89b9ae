use crate::application::rental::RentalApplicationError;
use crate::domain::AvailabilityError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーとリクエスト不正をHTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(RentalApplicationError),
    BadRequest(String),
}

impl From<RentalApplicationError> for ApiError {
    fn from(err: RentalApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<AvailabilityError> for ApiError {
    fn from(err: AvailabilityError) -> Self {
        ApiError::Application(RentalApplicationError::InvalidRange(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse::new("BAD_REQUEST", msg));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::Application(err) => err,
        };

        let (status, body) = match &err {
            // 404 Not Found - リクエストされたリソースが存在しない
            RentalApplicationError::ToestelNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("TOESTEL_NOT_FOUND", "Toestel not found"),
            ),
            RentalApplicationError::RentalNotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("RENTAL_NOT_FOUND", "Rental not found"),
            ),

            // 400 Bad Request - 終了日が開始日より前
            RentalApplicationError::InvalidRange(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("INVALID_RANGE_ORDER", e.to_string()),
            ),

            RentalApplicationError::RangeTooLong { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("RANGE_TOO_LONG", err.to_string()),
            ),

            // 403 Forbidden - 出品者・借り手以外の操作
            RentalApplicationError::NotPermitted(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("NOT_PERMITTED", msg.as_str()),
            ),

            // 409 Conflict - 期間が予約できない
            RentalApplicationError::RangeUnavailable { conflicts } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "RANGE_UNAVAILABLE",
                    "Not every day in the requested period is available",
                )
                .with_conflicts(conflicts),
            ),
            RentalApplicationError::OutsideAvailabilityWindow { window } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(
                    "OUTSIDE_AVAILABILITY_WINDOW",
                    format!(
                        "Toestel is only available from {} to {}",
                        window.start(),
                        window.end()
                    ),
                ),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            RentalApplicationError::OwnToestel => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("OWN_TOESTEL", "Owners cannot rent their own toestel"),
            ),
            RentalApplicationError::InvalidToestel(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("INVALID_TOESTEL", msg.as_str()),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            RentalApplicationError::CatalogError(e) => {
                tracing::error!("Toestel catalog error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("CATALOG_ERROR", "Failed to access toestel catalog"),
                )
            }
            RentalApplicationError::RentalStoreError(e) => {
                tracing::error!("Rental store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("RENTAL_STORE_ERROR", "Failed to access rentals"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
