use crate::domain::{
    self, Reservation, ReservationId, ReservationPolicy, RoomId,
    commands::{CancelReservation, MakeReservation},
};
use crate::ports::*;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;

use super::errors::{ReservationApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に引数として渡す。
/// 時刻は`Clock`から取得するため、テストでは「今日」を固定できる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub room_repository: Arc<dyn RoomRepository>,
    pub reservation_repository: Arc<dyn ReservationRepository>,
    pub clock: Arc<dyn Clock>,
    pub policy: ReservationPolicy,
}

impl ServiceDependencies {
    /// 日付範囲の検証で使う「今日」（UTC）
    pub(super) fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

/// 部屋を予約する
///
/// ビジネスルール：
/// - 日付範囲がポリシーを満たすこと（最初の違反で打ち切り）
/// - 部屋IDが正の値であること
/// - 部屋が存在すること
/// - 同じ部屋に期間の重なるCONFIRMEDの予約がないこと
///
/// # 一貫性保証
///
/// 重複確認と保存はリポジトリの`insert_confirmed`で原子的に行う。
/// 同じ部屋・重なる期間への並行リクエストは1件だけが成功し、
/// 残りは`RoomAlreadyBooked`になる。失敗時は何も保存されない。
///
/// # 戻り値
/// 保存された予約（ID・作成日時が確定済み）
pub async fn make_reservation(deps: &ServiceDependencies, cmd: MakeReservation) -> Result<Reservation> {
    tracing::debug!(
        room_id = cmd.room_id,
        start_date = %cmd.start_date,
        end_date = %cmd.end_date,
        "make_reservation"
    );

    // 1. 日付範囲の検証
    let period =
        domain::validate_date_range(cmd.start_date, cmd.end_date, deps.today(), &deps.policy)?;

    // 2. 部屋IDの検証
    let room_id = RoomId::try_from(cmd.room_id)?;

    // 3. 部屋の存在確認
    let room = deps
        .room_repository
        .find_by_id(room_id)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?;

    if room.is_none() {
        return Err(ReservationApplicationError::RoomNotFound(room_id));
    }

    // 4. ドメイン層の純粋関数で確定予約を生成
    let new_reservation = domain::reservation::confirm(room_id, period, deps.clock.utc());

    // 5. 重複がなければ保存（原子的）
    let outcome = deps
        .reservation_repository
        .insert_confirmed(new_reservation)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?;

    match outcome {
        InsertOutcome::Inserted(reservation) => {
            tracing::debug!(
                reservation_id = %reservation.reservation_id,
                room_id = %room_id,
                period = %period,
                "reservation confirmed"
            );
            Ok(reservation)
        }
        InsertOutcome::Overlapping => {
            tracing::warn!(room_id = %room_id, period = %period, "room already booked");
            Err(ReservationApplicationError::RoomAlreadyBooked)
        }
        InsertOutcome::RoomMissing => Err(ReservationApplicationError::RoomNotFound(room_id)),
    }
}

/// 予約をキャンセルする
///
/// ビジネスルール：
/// - 予約IDが正の値であること
/// - 予約が存在すること
/// - CONFIRMEDの予約のみキャンセル可能（CANCELLED, EXPIREDは不可）
///
/// 状態遷移の判定はドメイン層の`cancel`で行い、
/// 読み取りから保存までをリポジトリが1トランザクションで実行する。
pub async fn cancel_reservation(
    deps: &ServiceDependencies,
    cmd: CancelReservation,
) -> Result<Reservation> {
    tracing::debug!(reservation_id = cmd.reservation_id, "cancel_reservation");

    let reservation_id = ReservationId::try_from(cmd.reservation_id)?;

    let outcome = deps
        .reservation_repository
        .cancel(reservation_id)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?;

    match outcome {
        CancelOutcome::Cancelled(reservation) => {
            tracing::debug!(reservation_id = %reservation_id, "reservation cancelled");
            Ok(reservation)
        }
        CancelOutcome::NotFound => Err(ReservationApplicationError::ReservationNotFound(
            reservation_id,
        )),
        CancelOutcome::Rejected(err) => {
            tracing::warn!(reservation_id = %reservation_id, error = %err, "cancel rejected");
            Err(err.into())
        }
    }
}

/// IDで予約を取得する
pub async fn get_reservation(deps: &ServiceDependencies, reservation_id: i64) -> Result<Reservation> {
    let reservation_id = ReservationId::try_from(reservation_id)?;

    deps.reservation_repository
        .find_by_id(reservation_id)
        .await
        .map_err(ReservationApplicationError::RepositoryError)?
        .ok_or(ReservationApplicationError::ReservationNotFound(
            reservation_id,
        ))
}
