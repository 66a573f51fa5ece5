use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 1ページあたりのデフォルト件数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 1ページあたりの最大件数
pub const MAX_PAGE_SIZE: u32 = 100;

/// 空室一覧の並び順のキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSortKey {
    #[default]
    RoomId,
    RoomNumber,
}

/// 並び順の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// ページ指定
///
/// 同じパラメータであれば常に同じ順序で返すため、
/// ソートキーが同じ部屋はroom_idの昇順で並べる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 0始まりのページ番号
    pub page: u32,
    pub size: u32,
    pub sort: RoomSortKey,
    pub direction: SortDirection,
}

impl PageRequest {
    /// ページ番号と件数から作成する（件数は1〜MAX_PAGE_SIZEに丸める）
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: RoomSortKey::default(),
            direction: SortDirection::default(),
        }
    }

    pub fn sorted_by(self, sort: RoomSortKey, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            ..self
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// クエリ：期間内の空室一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAvailableRooms {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub page: PageRequest,
}

/// クエリ：1部屋の空き状況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRoomAvailability {
    pub room_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default() {
        let page = PageRequest::default();
        assert_eq!(page.page, 0);
        assert_eq!(page.size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.sort, RoomSortKey::RoomId);
        assert_eq!(page.direction, SortDirection::Asc);
    }

    #[test]
    fn test_page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 1000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_request_offset() {
        let page = PageRequest::new(3, 20);
        assert_eq!(page.offset(), 60);
        assert_eq!(page.limit(), 20);
    }
}
