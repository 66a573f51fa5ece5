use crate::application::reservation::{
    ServiceDependencies, cancel_reservation as execute_cancel_reservation,
    check_room_availability as execute_check_room_availability,
    get_reservation as execute_get_reservation, list_available_rooms as execute_list_available_rooms,
    make_reservation as execute_make_reservation,
};
use crate::domain::{
    commands::CancelReservation,
    queries::{CheckRoomAvailability, ListAvailableRooms},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AvailabilityQuery, AvailabilityResponse, ListRoomsQuery, MakeReservationRequest,
        ReservationResponse, RoomPageResponse, RoomResponse, required,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST / DELETE)
// ============================================================================

/// POST /reservations - 部屋を予約する
///
/// 成功時は201とLocationヘッダー（/reservations/{id}）を返す。
///
/// 強制されるビジネスルール:
/// - 日付範囲がポリシーを満たすこと（400）
/// - 部屋が存在すること（404）
/// - 期間の重なる確定予約がないこと（409）
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MakeReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<ReservationResponse>), ApiError> {
    let Json(req) = payload?;
    let cmd = req.to_command()?;

    let reservation = execute_make_reservation(&state.service_deps, cmd).await?;

    let mut headers = HeaderMap::new();
    let location = format!("/reservations/{}", reservation.reservation_id);
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, value);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(ReservationResponse::from(reservation)),
    ))
}

/// DELETE /reservations/:id - 予約をキャンセルする
///
/// 成功時は204（ボディなし）。
///
/// 強制されるビジネスルール:
/// - IDが正の値であること（400）
/// - 予約が存在すること（404）
/// - 予約がCONFIRMED状態であること（409）
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(reservation_id) = path?;
    let cmd = CancelReservation { reservation_id };

    execute_cancel_reservation(&state.service_deps, cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /reservations/:id - 予約をIDで取得
pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let Path(reservation_id) = path?;
    let reservation = execute_get_reservation(&state.service_deps, reservation_id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// GET /rooms - 期間内の空室一覧
///
/// クエリパラメータ:
/// - from, to: 期間（必須、YYYY-MM-DD）
/// - page: ページ番号（0始まり、デフォルト0）
/// - size: 1ページの件数（デフォルト10、最大100）
/// - sort: `room_id` または `room_number`、任意で `,asc` / `,desc`
pub async fn list_available_rooms(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListRoomsQuery>, QueryRejection>,
) -> Result<Json<RoomPageResponse>, ApiError> {
    let Query(query) = query?;
    let page = query.page_request()?;
    let list_query = ListAvailableRooms {
        from: required(query.from, "from")?,
        to: required(query.to, "to")?,
        page,
    };

    let rooms = execute_list_available_rooms(&state.service_deps, list_query).await?;

    let content: Vec<RoomResponse> = rooms.into_iter().map(RoomResponse::from).collect();

    Ok(Json(RoomPageResponse {
        number_of_elements: content.len(),
        content,
        page: page.page,
        size: page.size,
    }))
}

/// GET /rooms/:id/availability - 1部屋の空き状況
pub async fn get_room_availability(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let Path(room_id) = path?;
    let Query(query) = query?;
    let check = CheckRoomAvailability {
        room_id,
        from: required(query.from, "from")?,
        to: required(query.to, "to")?,
    };
    let (from, to) = (check.from, check.to);

    let available = execute_check_room_availability(&state.service_deps, check).await?;

    Ok(Json(AvailabilityResponse {
        room_id,
        from,
        to,
        available,
    }))
}
