use crate::domain::{
    self, Room, RoomId,
    queries::{CheckRoomAvailability, ListAvailableRooms},
};

use super::errors::{ReservationApplicationError, Result};
use super::reservation_service::ServiceDependencies;

/// 期間内の空室一覧を取得する
///
/// 期間は予約作成と同じルールで検証する。
/// CONFIRMEDの予約が重なる部屋は除外し、CANCELLED, EXPIREDの予約しか
/// 重ならない部屋は空室として含める。
pub async fn list_available_rooms(
    deps: &ServiceDependencies,
    query: ListAvailableRooms,
) -> Result<Vec<Room>> {
    let period = domain::validate_date_range(query.from, query.to, deps.today(), &deps.policy)?;

    let rooms = deps
        .room_repository
        .find_available(&period, &query.page)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?;

    tracing::debug!(
        period = %period,
        page = query.page.page,
        size = query.page.size,
        found = rooms.len(),
        "available rooms"
    );

    Ok(rooms)
}

/// 1部屋の空き状況を確認する
///
/// 部屋が存在しない場合は`RoomNotFound`。
pub async fn check_room_availability(
    deps: &ServiceDependencies,
    query: CheckRoomAvailability,
) -> Result<bool> {
    let period = domain::validate_date_range(query.from, query.to, deps.today(), &deps.policy)?;
    let room_id = RoomId::try_from(query.room_id)?;

    let room = deps
        .room_repository
        .find_by_id(room_id)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?;

    if room.is_none() {
        return Err(ReservationApplicationError::RoomNotFound(room_id));
    }

    deps.room_repository
        .is_available(room_id, &period)
        .await
        .map_err(ReservationApplicationError::RepositoryError)
}
