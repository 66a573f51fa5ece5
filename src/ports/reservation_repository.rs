use crate::domain::{
    CancelReservationError, NewReservation, Reservation, ReservationId,
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 確定予約の保存結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// 保存された（IDが採番済み）
    Inserted(Reservation),
    /// 同じ部屋に期間の重なるCONFIRMEDの予約が既にある
    Overlapping,
    /// 参照先の部屋が存在しない
    RoomMissing,
}

/// キャンセルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// キャンセルされた（保存済み）
    Cancelled(Reservation),
    NotFound,
    /// 現在の状態からはキャンセルできない（何も変更していない）
    Rejected(CancelReservationError),
}

/// 予約リポジトリポート
///
/// 二重予約の防止は実装側の責務とする。
/// 重複確認と保存は1つの原子的な操作として行い、
/// 並行する呼び出しの両方が成功することはない。
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 期間の重なるCONFIRMEDの予約がなければ保存する（原子的な条件付きINSERT）
    async fn insert_confirmed(&self, reservation: NewReservation) -> Result<InsertOutcome>;

    /// IDで予約を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> Result<Option<Reservation>>;

    /// 予約をキャンセルする
    ///
    /// 読み取り、`domain::reservation::cancel`による遷移、保存を
    /// 1つのトランザクションで行う。
    async fn cancel(&self, reservation_id: ReservationId) -> Result<CancelOutcome>;
}
