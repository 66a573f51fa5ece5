use crate::domain::{
    self, DateRange, NewReservation, Reservation, ReservationId, ReservationStatus, Room, RoomId,
    queries::{PageRequest, RoomSortKey, SortDirection},
};
use crate::ports::reservation_repository::{
    self, CancelOutcome, InsertOutcome, ReservationRepository,
};
use crate::ports::room_repository::{self, RoomRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    rooms: BTreeMap<RoomId, Room>,
    reservations: BTreeMap<ReservationId, Reservation>,
    next_room_id: i32,
    next_reservation_id: i64,
}

impl State {
    fn has_conflict(&self, room_id: RoomId, period: &DateRange) -> bool {
        self.reservations
            .values()
            .any(|r| r.conflicts_with(room_id, period))
    }
}

/// 部屋・予約リポジトリのインメモリ実装
///
/// ストア全体を1つのMutexで保護する。重複確認と保存は
/// ロックを保持したまま行うため、並行する予約の両方が成功することはない。
/// テストやデータベースなしでの動作確認に使用する。
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> reservation_repository::Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| "in-memory store mutex poisoned".into())
    }

    /// 部屋を登録する（IDは1からの連番）
    pub fn add_room(&self, room_number: &str) -> Room {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.next_room_id += 1;
        let room = Room {
            room_id: RoomId::from_i32(state.next_room_id),
            room_number: room_number.to_string(),
        };
        state.rooms.insert(room.room_id, room.clone());
        room
    }

    /// 任意の状態の予約を直接登録する
    ///
    /// EXPIREDなど、このサービスが生成しない状態のデータを用意するために使う。
    /// 重複チェックは行わない。
    pub fn put_reservation(
        &self,
        room_id: RoomId,
        period: DateRange,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
    ) -> Reservation {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.next_reservation_id += 1;
        let reservation = Reservation {
            reservation_id: ReservationId::from_i64(state.next_reservation_id),
            room_id,
            status,
            period,
            created_at,
        };
        state
            .reservations
            .insert(reservation.reservation_id, reservation.clone());
        reservation
    }

    /// 保存されているすべての予約（ID順）
    pub fn reservations(&self) -> Vec<Reservation> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.reservations.values().cloned().collect()
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn find_by_id(&self, room_id: RoomId) -> room_repository::Result<Option<Room>> {
        Ok(self.lock()?.rooms.get(&room_id).cloned())
    }

    async fn find_available(
        &self,
        period: &DateRange,
        page: &PageRequest,
    ) -> room_repository::Result<Vec<Room>> {
        let state = self.lock()?;

        let mut rooms: Vec<Room> = state
            .rooms
            .values()
            .filter(|room| !state.has_conflict(room.room_id, period))
            .cloned()
            .collect();

        rooms.sort_by(|a, b| {
            let ordering = match page.sort {
                RoomSortKey::RoomId => a.room_id.cmp(&b.room_id),
                RoomSortKey::RoomNumber => a.room_number.cmp(&b.room_number),
            };
            let ordering = match page.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.room_id.cmp(&b.room_id))
        });

        let offset = usize::try_from(page.offset())?;
        let limit = usize::try_from(page.limit())?;

        Ok(rooms.into_iter().skip(offset).take(limit).collect())
    }

    async fn is_available(
        &self,
        room_id: RoomId,
        period: &DateRange,
    ) -> room_repository::Result<bool> {
        Ok(!self.lock()?.has_conflict(room_id, period))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn insert_confirmed(
        &self,
        reservation: NewReservation,
    ) -> reservation_repository::Result<InsertOutcome> {
        let mut state = self.lock()?;

        if !state.rooms.contains_key(&reservation.room_id) {
            return Ok(InsertOutcome::RoomMissing);
        }

        if state.has_conflict(reservation.room_id, &reservation.period) {
            return Ok(InsertOutcome::Overlapping);
        }

        state.next_reservation_id += 1;
        let saved =
            reservation.into_reservation(ReservationId::from_i64(state.next_reservation_id));
        state.reservations.insert(saved.reservation_id, saved.clone());

        Ok(InsertOutcome::Inserted(saved))
    }

    async fn find_by_id(
        &self,
        reservation_id: ReservationId,
    ) -> reservation_repository::Result<Option<Reservation>> {
        Ok(self.lock()?.reservations.get(&reservation_id).cloned())
    }

    async fn cancel(
        &self,
        reservation_id: ReservationId,
    ) -> reservation_repository::Result<CancelOutcome> {
        let mut state = self.lock()?;

        let Some(current) = state.reservations.get(&reservation_id).cloned() else {
            return Ok(CancelOutcome::NotFound);
        };

        match domain::reservation::cancel(current) {
            Ok(cancelled) => {
                state.reservations.insert(reservation_id, cancelled.clone());
                Ok(CancelOutcome::Cancelled(cancelled))
            }
            Err(err) => Ok(CancelOutcome::Rejected(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn period(start_day: u32, end_day: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 7, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, end_day).unwrap(),
        )
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_insert_confirmed_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let room = store.add_room("101");

        let first = store
            .insert_confirmed(domain::reservation::confirm(room.room_id, period(1, 3), now()))
            .await
            .unwrap();
        let second = store
            .insert_confirmed(domain::reservation::confirm(room.room_id, period(3, 5), now()))
            .await
            .unwrap();

        match (first, second) {
            (InsertOutcome::Inserted(a), InsertOutcome::Inserted(b)) => {
                assert_eq!(a.reservation_id.value(), 1);
                assert_eq!(b.reservation_id.value(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_insert_confirmed_rejects_overlap() {
        let store = InMemoryStore::new();
        let room = store.add_room("101");

        store
            .insert_confirmed(domain::reservation::confirm(room.room_id, period(1, 5), now()))
            .await
            .unwrap();
        let outcome = store
            .insert_confirmed(domain::reservation::confirm(room.room_id, period(4, 8), now()))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::Overlapping);
        assert_eq!(store.reservations().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_confirmed_unknown_room() {
        let store = InMemoryStore::new();
        let outcome = store
            .insert_confirmed(domain::reservation::confirm(
                RoomId::from_i32(99),
                period(1, 2),
                now(),
            ))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::RoomMissing);
    }

    #[tokio::test]
    async fn test_cancelled_and_expired_do_not_block() {
        let store = InMemoryStore::new();
        let room = store.add_room("101");
        store.put_reservation(room.room_id, period(1, 5), ReservationStatus::Cancelled, now());
        store.put_reservation(room.room_id, period(2, 6), ReservationStatus::Expired, now());

        assert!(store.is_available(room.room_id, &period(1, 6)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_available_sorts_and_pages() {
        let store = InMemoryStore::new();
        store.add_room("300");
        store.add_room("100");
        store.add_room("200");

        let page = PageRequest::new(0, 2).sorted_by(RoomSortKey::RoomNumber, SortDirection::Asc);
        let rooms = store.find_available(&period(1, 2), &page).await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["100", "200"]);

        let page = PageRequest::new(1, 2).sorted_by(RoomSortKey::RoomNumber, SortDirection::Asc);
        let rooms = store.find_available(&period(1, 2), &page).await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["300"]);
    }
}
