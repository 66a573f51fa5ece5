use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 予約ポリシーのデフォルト値：何日先まで予約できるか
pub const DEFAULT_ALLOWED_DAYS_AHEAD: u32 = 500;

/// 予約ポリシーのデフォルト値：1回の予約の最大日数
pub const DEFAULT_ALLOWED_RESERVATION_DURATION: u32 = 30;

/// 日付範囲のバリデーションエラー
///
/// 複数のルールに違反している場合、`validate_date_range`のチェック順で
/// 最初に違反したものだけが報告される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("Start date cannot be after end date")]
    StartAfterEnd,

    #[error("Reservation duration cannot be greater than: {max_days} days")]
    DurationExceeded { max_days: u32 },

    #[error("Reservation cannot be further ahead than: {max_days} days")]
    TooFarAhead { max_days: u32 },

    #[error("Reservation needs to be at least 1 day")]
    TooShort,

    #[error("Start date cannot be in the past")]
    StartInPast,
}

/// 予約ポリシー
///
/// 起動時に外部から与えられ、実行中は変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPolicy {
    /// 今日から何日先まで予約を受け付けるか
    pub allowed_days_ahead: u32,
    /// 1回の予約の最大日数
    pub allowed_reservation_duration: u32,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            allowed_days_ahead: DEFAULT_ALLOWED_DAYS_AHEAD,
            allowed_reservation_duration: DEFAULT_ALLOWED_RESERVATION_DURATION,
        }
    }
}

/// 日付範囲 [start, end)
///
/// 不変条件：start < end（長さ0の範囲は作れない）
/// 終了日は含まない半開区間として扱うため、ある予約の終了日に
/// 別の予約が開始しても重複しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// 構造上の不変条件（start < end）のみを検証して作成する
    ///
    /// 永続化済みデータの復元に使用する。新規の入力には
    /// ポリシーも検証する`validate_date_range`を使うこと。
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd);
        }
        if start == end {
            return Err(DateRangeError::TooShort);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 半開区間の重複判定：s1 < e2 かつ s2 < e1
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// 純粋関数：予約の日付範囲を検証する
///
/// チェック順（最初の違反で打ち切る）：
/// 1. 開始日が終了日より後
/// 2. 終了日が 開始日 + 最大日数 より後
/// 3. 終了日が 今日 + 受付日数 より後
/// 4. 開始日が 今日 + 受付日数 より後
/// 5. 開始日と終了日が同じ
/// 6. 開始日が過去
///
/// `today`は呼び出し側がClockから取得して渡す。副作用なし。
pub fn validate_date_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    policy: &ReservationPolicy,
) -> Result<DateRange, DateRangeError> {
    if start > end {
        return Err(DateRangeError::StartAfterEnd);
    }

    if end > add_days(start, policy.allowed_reservation_duration) {
        return Err(DateRangeError::DurationExceeded {
            max_days: policy.allowed_reservation_duration,
        });
    }

    let horizon = add_days(today, policy.allowed_days_ahead);

    if end > horizon {
        return Err(DateRangeError::TooFarAhead {
            max_days: policy.allowed_days_ahead,
        });
    }

    // 終了日が範囲内なら開始日も範囲内だが、ルールとしては独立して持つ
    if start > horizon {
        return Err(DateRangeError::TooFarAhead {
            max_days: policy.allowed_days_ahead,
        });
    }

    if start == end {
        return Err(DateRangeError::TooShort);
    }

    if start < today {
        return Err(DateRangeError::StartInPast);
    }

    Ok(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn day(offset: u32) -> NaiveDate {
        add_days(today(), offset)
    }

    fn policy() -> ReservationPolicy {
        ReservationPolicy {
            allowed_days_ahead: 500,
            allowed_reservation_duration: 30,
        }
    }

    #[test]
    fn test_valid_range_is_accepted() {
        let range = validate_date_range(day(1), day(5), today(), &policy()).unwrap();
        assert_eq!(range.start(), day(1));
        assert_eq!(range.end(), day(5));
    }

    #[test]
    fn test_range_starting_today_is_accepted() {
        assert!(validate_date_range(day(0), day(1), today(), &policy()).is_ok());
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let err = validate_date_range(day(5), day(1), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::StartAfterEnd);
        assert_eq!(err.to_string(), "Start date cannot be after end date");
    }

    #[test]
    fn test_duration_exactly_at_maximum_is_accepted() {
        assert!(validate_date_range(day(1), day(31), today(), &policy()).is_ok());
    }

    #[test]
    fn test_duration_over_maximum_is_rejected() {
        let err = validate_date_range(day(1), day(32), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::DurationExceeded { max_days: 30 });
        assert_eq!(
            err.to_string(),
            "Reservation duration cannot be greater than: 30 days"
        );
    }

    #[test]
    fn test_end_beyond_horizon_is_rejected() {
        let err = validate_date_range(day(495), day(501), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::TooFarAhead { max_days: 500 });
        assert_eq!(
            err.to_string(),
            "Reservation cannot be further ahead than: 500 days"
        );
    }

    #[test]
    fn test_end_on_horizon_is_accepted() {
        assert!(validate_date_range(day(499), day(500), today(), &policy()).is_ok());
    }

    #[test]
    fn test_start_beyond_horizon_with_equal_end_is_too_far_ahead() {
        // 開始日=終了日でも、受付期間チェックが先に評価される
        let err = validate_date_range(day(600), day(600), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::TooFarAhead { max_days: 500 });
    }

    #[test]
    fn test_zero_length_range_is_rejected() {
        let err = validate_date_range(day(3), day(3), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::TooShort);
        assert_eq!(err.to_string(), "Reservation needs to be at least 1 day");
    }

    #[test]
    fn test_start_in_past_is_rejected() {
        let yesterday = today().pred_opt().unwrap();
        let err = validate_date_range(yesterday, day(2), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::StartInPast);
    }

    #[test]
    fn test_start_after_end_wins_over_other_violations() {
        let yesterday = today().pred_opt().unwrap();
        let err = validate_date_range(day(900), yesterday, today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::StartAfterEnd);
    }

    #[test]
    fn test_duration_wins_over_horizon() {
        let err = validate_date_range(day(480), day(600), today(), &policy()).unwrap_err();
        assert_eq!(err, DateRangeError::DurationExceeded { max_days: 30 });
    }

    #[test]
    fn test_new_enforces_structural_invariant() {
        assert_eq!(
            DateRange::new(day(2), day(1)).unwrap_err(),
            DateRangeError::StartAfterEnd
        );
        assert_eq!(
            DateRange::new(day(2), day(2)).unwrap_err(),
            DateRangeError::TooShort
        );
        assert!(DateRange::new(day(1), day(2)).is_ok());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = DateRange::new(day(0), day(3)).unwrap();
        let back_to_back = DateRange::new(day(3), day(5)).unwrap();
        let inside = DateRange::new(day(1), day(2)).unwrap();
        let straddling = DateRange::new(day(2), day(4)).unwrap();

        assert!(!a.overlaps(&back_to_back));
        assert!(!back_to_back.overlaps(&a));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
        assert!(a.overlaps(&straddling));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_policy_default() {
        let policy = ReservationPolicy::default();
        assert_eq!(policy.allowed_days_ahead, 500);
        assert_eq!(policy.allowed_reservation_duration, 30);
    }
}
