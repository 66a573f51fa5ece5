use crate::domain::{DateRange, Room, RoomId, queries::PageRequest};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 部屋リポジトリポート
///
/// 部屋の参照と空室検索を抽象化する。
/// 空室判定ではCONFIRMEDの予約だけを考慮し、期間は半開区間で比較する。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// IDで部屋を取得する
    async fn find_by_id(&self, room_id: RoomId) -> Result<Option<Room>>;

    /// 期間内にCONFIRMEDの予約が重ならない部屋を取得する
    ///
    /// CANCELLED, EXPIREDの予約しか重ならない部屋は空室として返す。
    /// 並び順は`PageRequest`のソートキー、同順位はroom_idの昇順。
    async fn find_available(&self, period: &DateRange, page: &PageRequest) -> Result<Vec<Room>>;

    /// 部屋に期間の重なるCONFIRMEDの予約が1件もないか確認する
    async fn is_available(&self, room_id: RoomId, period: &DateRange) -> Result<bool>;
}
