use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CancelReservationError, DateRange, ReservationId, RoomId};

/// 予約ステータス
///
/// 状態遷移：
/// - INITIAL → CONFIRMED（作成時は直接CONFIRMEDで保存される）
/// - CONFIRMED → CANCELLED（キャンセル）
/// - EXPIRED は外部プロセスのみが設定する終端状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Initial,
    Confirmed,
    Cancelled,
    Expired,
}

impl ReservationStatus {
    /// 文字列表現を取得する（永続化・API共通）
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Initial => "INITIAL",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Expired => "EXPIRED",
        }
    }

    /// 空室判定の対象になるか（CONFIRMEDのみ）
    pub fn blocks_availability(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed)
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INITIAL" => Ok(ReservationStatus::Initial),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "EXPIRED" => Ok(ReservationStatus::Expired),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

/// 部屋
///
/// このサービスでは作成のみ（変更・削除なし）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: RoomId,
    pub room_number: String,
}

/// 予約集約
///
/// 部屋はIDでのみ参照する。部屋の詳細は必要になった時点で取得する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub room_id: RoomId,
    pub status: ReservationStatus,
    pub period: DateRange,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn start_date(&self) -> NaiveDate {
        self.period.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period.end()
    }

    /// 他の予約と同じ部屋を重複期間でブロックしているか
    pub fn conflicts_with(&self, room_id: RoomId, period: &DateRange) -> bool {
        self.room_id == room_id && self.status.blocks_availability() && self.period.overlaps(period)
    }
}

/// 未保存の予約
///
/// IDは永続化層が採番するため、保存前はIDを持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_id: RoomId,
    pub status: ReservationStatus,
    pub period: DateRange,
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    /// 採番されたIDを付与して予約集約にする
    pub fn into_reservation(self, reservation_id: ReservationId) -> Reservation {
        Reservation {
            reservation_id,
            room_id: self.room_id,
            status: self.status,
            period: self.period,
            created_at: self.created_at,
        }
    }
}

/// 純粋関数：予約を確定する
///
/// ビジネスルール：
/// - 新規予約は常にCONFIRMEDで作成される
/// - 期間は検証済みの`DateRange`のみ受け付ける（型で保証）
/// - 空き状況の確認は永続化層の排他制約で原子的に行う
///
/// 副作用なし。未保存の予約を返す。
pub fn confirm(room_id: RoomId, period: DateRange, created_at: DateTime<Utc>) -> NewReservation {
    NewReservation {
        room_id,
        status: ReservationStatus::Confirmed,
        period,
        created_at,
    }
}

/// 純粋関数：予約をキャンセルする
///
/// ビジネスルール：
/// - CONFIRMEDのみキャンセル可能
/// - CANCELLED, EXPIRED, INITIAL からは遷移できない
///
/// 副作用なし。新しい状態の予約を返す。
pub fn cancel(reservation: Reservation) -> Result<Reservation, CancelReservationError> {
    if !reservation.status.can_cancel() {
        return Err(CancelReservationError::InvalidStatus(reservation.status));
    }

    Ok(Reservation {
        status: ReservationStatus::Cancelled,
        ..reservation
    })
}
