use crate::domain::{
    self, DateRange, NewReservation, Reservation, ReservationId, ReservationStatus, RoomId,
};
use crate::ports::reservation_repository::{
    CancelOutcome, InsertOutcome, ReservationRepository as ReservationRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// 排他制約違反（同じ部屋のCONFIRMED予約の期間重複）
const EXCLUSION_VIOLATION: &str = "23P01";

/// 外部キー制約違反（存在しない部屋）
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn invalid_data(message: String) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// PostgreSQLの行データをReservationに変換する
///
/// statusの文字列と期間の不変条件（start_date < end_date）を検証する。
fn map_row_to_reservation(row: &PgRow) -> Result<Reservation> {
    let status_str: &str = row.get("status");
    let status = ReservationStatus::from_str(status_str).map_err(invalid_data)?;

    let period = DateRange::new(row.get("start_date"), row.get("end_date"))
        .map_err(|e| invalid_data(format!("stored reservation has invalid period: {}", e)))?;

    Ok(Reservation {
        reservation_id: ReservationId::from_i64(row.get("reservation_id")),
        room_id: RoomId::from_i32(row.get("room_id")),
        status,
        period,
        created_at: row.get("created_at"),
    })
}

fn database_error_code(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    }
}

/// ReservationRepositoryのPostgreSQL実装
///
/// 二重予約は`reservations_no_overlapping_confirmed`排他制約で防ぐ。
/// 確認とINSERTを別々に行わないため、分離レベルに関係なく競合は起きない。
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepositoryTrait for ReservationRepository {
    /// 確定予約を保存する
    ///
    /// 単一のINSERTで保存し、排他制約違反を`Overlapping`として返す。
    async fn insert_confirmed(&self, reservation: NewReservation) -> Result<InsertOutcome> {
        // created_atはDB側の精度（マイクロ秒）に丸められた値を返す
        let result = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO reservations (
                room_id,
                status,
                start_date,
                end_date,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING reservation_id, created_at
            "#,
        )
        .bind(reservation.room_id.value())
        .bind(reservation.status.as_str())
        .bind(reservation.period.start())
        .bind(reservation.period.end())
        .bind(reservation.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id, created_at)) => Ok(InsertOutcome::Inserted(Reservation {
                created_at,
                ..reservation.into_reservation(ReservationId::from_i64(id))
            })),
            Err(err) => match database_error_code(&err).as_deref() {
                Some(EXCLUSION_VIOLATION) => Ok(InsertOutcome::Overlapping),
                Some(FOREIGN_KEY_VIOLATION) => Ok(InsertOutcome::RoomMissing),
                _ => Err(err.into()),
            },
        }
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> Result<Option<Reservation>> {
        let row = sqlx::query(
            r#"
            SELECT
                reservation_id,
                room_id,
                status,
                start_date,
                end_date,
                created_at
            FROM reservations
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_reservation).transpose()
    }

    /// 予約をキャンセルする
    ///
    /// SELECT ... FOR UPDATEで行をロックしてから状態遷移を判定する。
    /// 拒否・未検出の場合はトランザクションをロールバックする（変更なし）。
    async fn cancel(&self, reservation_id: ReservationId) -> Result<CancelOutcome> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT
                reservation_id,
                room_id,
                status,
                start_date,
                end_date,
                created_at
            FROM reservations
            WHERE reservation_id = $1
            FOR UPDATE
            "#,
        )
        .bind(reservation_id.value())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(CancelOutcome::NotFound);
        };

        let current = map_row_to_reservation(&row)?;

        let cancelled = match domain::reservation::cancel(current) {
            Ok(cancelled) => cancelled,
            Err(err) => {
                tx.rollback().await?;
                return Ok(CancelOutcome::Rejected(err));
            }
        };

        sqlx::query(
            r#"
            UPDATE reservations
            SET status = $2
            WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id.value())
        .bind(cancelled.status.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CancelOutcome::Cancelled(cancelled))
    }
}
