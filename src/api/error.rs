use crate::application::reservation::ReservationApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエストの形式エラーをまとめて
/// HTTPレスポンスへマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(ReservationApplicationError),
    /// 必須パラメータの欠落、JSON・パス・クエリの形式不正など
    BadRequest(String),
}

impl From<ReservationApplicationError> for ApiError {
    fn from(err: ReservationApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),

            // 400 Bad Request - 入力がポリシー違反
            ApiError::Application(err @ ReservationApplicationError::ValidationFailed(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string())
            }

            // 404 Not Found - リクエストされたリソースが存在しない
            ApiError::Application(err @ ReservationApplicationError::RoomNotFound(_)) => {
                (StatusCode::NOT_FOUND, "ROOM_NOT_FOUND", err.to_string())
            }
            ApiError::Application(err @ ReservationApplicationError::ReservationNotFound(_)) => (
                StatusCode::NOT_FOUND,
                "RESERVATION_NOT_FOUND",
                err.to_string(),
            ),

            // 409 Conflict - ビジネスルールによる拒否
            ApiError::Application(err @ ReservationApplicationError::RoomAlreadyBooked) => {
                (StatusCode::CONFLICT, "ROOM_ALREADY_BOOKED", err.to_string())
            }
            ApiError::Application(err @ ReservationApplicationError::CancelConflict(_)) => {
                (StatusCode::CONFLICT, "CANCEL_CONFLICT", err.to_string())
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(ReservationApplicationError::RepositoryError(e)) => {
                tracing::error!(error = %e, "Repository error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
