use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// コマンド：部屋を予約する
///
/// 値は外部入力のまま（未検証）。検証はアプリケーション層で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeReservation {
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// コマンド：予約をキャンセルする
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReservation {
    pub reservation_id: i64,
}
