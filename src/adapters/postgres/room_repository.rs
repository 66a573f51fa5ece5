use crate::domain::{
    DateRange, Room, RoomId,
    queries::{PageRequest, RoomSortKey, SortDirection},
};
use crate::ports::room_repository::{Result, RoomRepository as RoomRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_room(row: &PgRow) -> Room {
    Room {
        room_id: RoomId::from_i32(row.get("room_id")),
        room_number: row.get("room_number"),
    }
}

/// ORDER BY句を組み立てる
///
/// 列名・方向は列挙型から固定文字列を選ぶだけで、入力値は埋め込まない。
/// 同順位はroom_idの昇順で並べて、ページ間の順序を安定させる。
fn order_by_clause(page: &PageRequest) -> &'static str {
    match (page.sort, page.direction) {
        (RoomSortKey::RoomId, SortDirection::Asc) => "ORDER BY r.room_id ASC",
        (RoomSortKey::RoomId, SortDirection::Desc) => "ORDER BY r.room_id DESC",
        (RoomSortKey::RoomNumber, SortDirection::Asc) => {
            "ORDER BY r.room_number ASC, r.room_id ASC"
        }
        (RoomSortKey::RoomNumber, SortDirection::Desc) => {
            "ORDER BY r.room_number DESC, r.room_id ASC"
        }
    }
}

/// RoomRepositoryのPostgreSQL実装
///
/// 重複判定は半開区間：予約.start_date < $to AND $from < 予約.end_date
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepositoryTrait for RoomRepository {
    async fn find_by_id(&self, room_id: RoomId) -> Result<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT room_id, room_number
            FROM rooms
            WHERE room_id = $1
            "#,
        )
        .bind(room_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_room))
    }

    async fn find_available(&self, period: &DateRange, page: &PageRequest) -> Result<Vec<Room>> {
        let sql = format!(
            r#"
            SELECT r.room_id, r.room_number
            FROM rooms r
            WHERE NOT EXISTS (
                SELECT 1
                FROM reservations res
                WHERE res.room_id = r.room_id
                  AND res.status = 'CONFIRMED'
                  AND res.start_date < $2
                  AND $1 < res.end_date
            )
            {}
            LIMIT $3 OFFSET $4
            "#,
            order_by_clause(page)
        );

        let limit = i64::try_from(page.limit())?;
        let offset = i64::try_from(page.offset())?;

        let rows = sqlx::query(&sql)
            .bind(period.start())
            .bind(period.end())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row_to_room).collect())
    }

    async fn is_available(&self, room_id: RoomId, period: &DateRange) -> Result<bool> {
        let available: bool = sqlx::query_scalar(
            r#"
            SELECT NOT EXISTS (
                SELECT 1
                FROM reservations
                WHERE room_id = $1
                  AND status = 'CONFIRMED'
                  AND start_date < $3
                  AND $2 < end_date
            )
            "#,
        )
        .bind(room_id.value())
        .bind(period.start())
        .bind(period.end())
        .fetch_one(&self.pool)
        .await?;

        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_clause_breaks_ties_by_room_id() {
        let page = PageRequest::default().sorted_by(RoomSortKey::RoomNumber, SortDirection::Desc);
        assert_eq!(
            order_by_clause(&page),
            "ORDER BY r.room_number DESC, r.room_id ASC"
        );
        assert_eq!(
            order_by_clause(&PageRequest::default()),
            "ORDER BY r.room_id ASC"
        );
    }
}
