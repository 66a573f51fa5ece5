use thiserror::Error;

use super::ReservationStatus;

/// キャンセルのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelReservationError {
    /// CONFIRMED以外の状態からはキャンセルできない
    #[error("Unable to cancel reservation in status {0}")]
    InvalidStatus(ReservationStatus),
}
