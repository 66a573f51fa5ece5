use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ID不正エラー（0以下のID）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidIdError {
    #[error("Room id must be greater than 0, got {0}")]
    Room(i64),
    #[error("Reservation id must be greater than 0, got {0}")]
    Reservation(i64),
}

/// 部屋ID - 部屋テーブルの主キー
///
/// 永続化層で採番された値をそのまま保持する。
/// 外部入力から作る場合は`TryFrom`で正の値であることを検証する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(i32);

impl RoomId {
    /// 永続化層から読み出した値をそのまま包む
    pub fn from_i32(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for RoomId {
    type Error = InvalidIdError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(InvalidIdError::Room(i64::from(value)));
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約ID - 作成時に永続化層が一度だけ採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReservationId(i64);

impl ReservationId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ReservationId {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(InvalidIdError::Reservation(value));
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
