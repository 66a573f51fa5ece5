use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Reservation, ReservationStatus, Room,
    commands::MakeReservation,
    queries::{DEFAULT_PAGE_SIZE, PageRequest, RoomSortKey, SortDirection},
};

use super::error::ApiError;

/// 予約作成リクエスト（POST /reservations）
///
/// 必須項目の欠落は400として返すため、すべてOptionで受ける。
#[derive(Debug, Clone, Deserialize)]
pub struct MakeReservationRequest {
    pub room_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl MakeReservationRequest {
    pub fn to_command(&self) -> Result<MakeReservation, ApiError> {
        Ok(MakeReservation {
            room_id: required(self.room_id, "room_id")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
        })
    }
}

/// 空室一覧のクエリパラメータ（GET /rooms）
#[derive(Debug, Deserialize)]
pub struct ListRoomsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// 0始まりのページ番号
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `room_id` または `room_number`、任意で `,asc` / `,desc`
    pub sort: Option<String>,
}

impl ListRoomsQuery {
    pub fn page_request(&self) -> Result<PageRequest, ApiError> {
        let page = PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        match &self.sort {
            Some(sort) => {
                let (key, direction) = parse_sort(sort).map_err(ApiError::BadRequest)?;
                Ok(page.sorted_by(key, direction))
            }
            None => Ok(page),
        }
    }
}

/// 空き状況確認のクエリパラメータ（GET /rooms/:id/availability）
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// 部屋レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room_id: i32,
    pub room_number: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            room_id: room.room_id.value(),
            room_number: room.room_number,
        }
    }
}

/// 空室一覧レスポンス（1ページ分）
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomPageResponse {
    pub content: Vec<RoomResponse>,
    pub page: u32,
    pub size: u32,
    pub number_of_elements: usize,
}

/// 空き状況レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub room_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub available: bool,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub reservation_id: i64,
    pub room_id: i32,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            reservation_id: reservation.reservation_id.value(),
            room_id: reservation.room_id.value(),
            status: reservation.status,
            start_date: reservation.start_date(),
            end_date: reservation.end_date(),
            created_at: reservation.created_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

pub(super) fn required<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{} is required", name)))
}

/// sortクエリパラメータのパース
///
/// 例: `room_number`, `room_number,desc`, `roomId,asc`
pub fn parse_sort(sort: &str) -> Result<(RoomSortKey, SortDirection), String> {
    let mut parts = sort.splitn(2, ',');
    let field = parts.next().unwrap_or_default().trim();
    let direction = parts.next().map(str::trim);

    let key = match field {
        "room_id" | "roomId" => RoomSortKey::RoomId,
        "room_number" | "roomNumber" => RoomSortKey::RoomNumber,
        _ => return Err(format!("Invalid sort field: {}", field)),
    };

    let direction = match direction.map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") => SortDirection::Asc,
        Some("desc") => SortDirection::Desc,
        Some(other) => return Err(format!("Invalid sort direction: {}", other)),
    };

    Ok((key, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_field_only() {
        assert_eq!(
            parse_sort("room_number"),
            Ok((RoomSortKey::RoomNumber, SortDirection::Asc))
        );
    }

    #[test]
    fn test_parse_sort_with_direction() {
        assert_eq!(
            parse_sort("roomId,DESC"),
            Ok((RoomSortKey::RoomId, SortDirection::Desc))
        );
    }

    #[test]
    fn test_parse_sort_rejects_unknown() {
        assert!(parse_sort("price").is_err());
        assert!(parse_sort("room_id,sideways").is_err());
    }

    #[test]
    fn test_to_command_requires_all_fields() {
        let request = MakeReservationRequest {
            room_id: Some(1),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            end_date: None,
        };

        match request.to_command() {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "end_date is required"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_page_request_defaults() {
        let query = ListRoomsQuery {
            from: None,
            to: None,
            page: None,
            size: None,
            sort: None,
        };
        assert_eq!(query.page_request().unwrap(), PageRequest::default());
    }
}
