use crate::domain::{
    CancelReservationError, DateRangeError, InvalidIdError, ReservationId, ReservationStatus,
    RoomId,
};
use thiserror::Error;

/// エラーの分類
///
/// API層はこの分類ごとに異なるレスポンスを返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 入力が不正（修正すれば再試行可能）
    BadInput,
    /// 参照先が存在しない（同じIDでは再試行不可）
    NotFound,
    /// ビジネスルールによる拒否
    Conflict,
    /// システム障害
    Internal,
}

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ReservationApplicationError {
    /// 日付範囲やIDが不正
    #[error("{0}")]
    ValidationFailed(String),

    /// 部屋が存在しない
    #[error("Unable to find room with id: {0}")]
    RoomNotFound(RoomId),

    /// 期間の重なる確定予約が既にある
    #[error("The room is already booked for the provided dates")]
    RoomAlreadyBooked,

    /// 予約が存在しない
    #[error("Unable to find reservation with id {0}")]
    ReservationNotFound(ReservationId),

    /// 現在の状態ではキャンセルできない
    #[error("Unable to cancel reservation in status {0}")]
    CancelConflict(ReservationStatus),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReservationApplicationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReservationApplicationError::ValidationFailed(_) => ErrorCategory::BadInput,
            ReservationApplicationError::RoomNotFound(_)
            | ReservationApplicationError::ReservationNotFound(_) => ErrorCategory::NotFound,
            ReservationApplicationError::RoomAlreadyBooked
            | ReservationApplicationError::CancelConflict(_) => ErrorCategory::Conflict,
            ReservationApplicationError::RepositoryError(_) => ErrorCategory::Internal,
        }
    }
}

impl From<DateRangeError> for ReservationApplicationError {
    fn from(err: DateRangeError) -> Self {
        ReservationApplicationError::ValidationFailed(err.to_string())
    }
}

impl From<InvalidIdError> for ReservationApplicationError {
    fn from(err: InvalidIdError) -> Self {
        ReservationApplicationError::ValidationFailed(err.to_string())
    }
}

impl From<CancelReservationError> for ReservationApplicationError {
    fn from(err: CancelReservationError) -> Self {
        match err {
            CancelReservationError::InvalidStatus(status) => {
                ReservationApplicationError::CancelConflict(status)
            }
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ReservationApplicationError>;
