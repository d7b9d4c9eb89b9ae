//! 貸出可能判定
//!
//! 呼び出し側が取得済みのスナップショット（貸出可能期間と既存予約の一覧）に対する
//! 純粋関数のみを提供する。データの取得や鮮度の保証は呼び出し側の責務。
//! 既存予約は統合（union）せず、それぞれ独立に判定する。

use chrono::NaiveDate;

use super::{AvailabilityError, DateRange};

/// 純粋関数：その日が予約可能か
///
/// - 貸出可能期間外なら false
/// - いずれかの既存予約に含まれるなら false
/// - それ以外は true
pub fn is_date_available(date: NaiveDate, window: &DateRange, bookings: &[DateRange]) -> bool {
    window.contains(date) && !bookings.iter().any(|booking| booking.contains(date))
}

/// 純粋関数：範囲内のすべての日が予約可能か
///
/// # エラー
/// end < start の場合は判定を行わず`AvailabilityError::InvalidRangeOrder`を返す
pub fn is_range_available(
    start: NaiveDate,
    end: NaiveDate,
    window: &DateRange,
    bookings: &[DateRange],
) -> Result<bool, AvailabilityError> {
    let range = DateRange::new(start, end)?;
    Ok(is_period_available(&range, window, bookings))
}

/// 純粋関数：構築済みの範囲に対する判定
///
/// 日ごとの判定の論理積と等価だが、区間同士の比較で求める。
pub fn is_period_available(range: &DateRange, window: &DateRange, bookings: &[DateRange]) -> bool {
    window.contains_range(range) && !bookings.iter().any(|booking| booking.overlaps(range))
}

/// 範囲と重なる既存予約を列挙する
pub fn find_conflicts(range: &DateRange, bookings: &[DateRange]) -> Vec<DateRange> {
    bookings
        .iter()
        .filter(|booking| booking.overlaps(range))
        .copied()
        .collect()
}

/// 指定範囲のうち予約可能な日付を昇順で返す
///
/// カレンダー表示で選択可能な日を決めるために使用される。
/// 走査するのは`within`と貸出可能期間が重なる部分のみ。
pub fn available_dates(
    within: &DateRange,
    window: &DateRange,
    bookings: &[DateRange],
) -> Vec<NaiveDate> {
    let Some(scan) = within.intersection(window) else {
        return Vec::new();
    };
    scan.days()
        .filter(|date| !bookings.iter().any(|booking| booking.contains(*date)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn june_window() -> DateRange {
        range(june(1), june(30))
    }

    #[test]
    fn test_scenario_a_free_date_inside_window() {
        assert!(is_date_available(june(15), &june_window(), &[]));
    }

    #[test]
    fn test_scenario_b_range_overlapping_booking() {
        let bookings = [range(june(10), june(12))];
        let result = is_range_available(june(9), june(11), &june_window(), &bookings);
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_scenario_c_range_after_booking() {
        let bookings = [range(june(10), june(12))];
        let result = is_range_available(june(13), june(20), &june_window(), &bookings);
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_scenario_d_date_outside_window() {
        let window = range(june(1), june(10));
        assert!(!is_date_available(june(11), &window, &[]));
    }

    #[test]
    fn test_scenario_e_reversed_range_is_an_error() {
        let result = is_range_available(june(20), june(13), &june_window(), &[]);
        assert_eq!(
            result,
            Err(AvailabilityError::InvalidRangeOrder {
                start: june(20),
                end: june(13),
            })
        );
    }

    #[test]
    fn test_dates_outside_window_are_never_available() {
        let window = range(june(5), june(25));
        let outside = NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .iter_days()
            .take(50)
            .filter(|d| !window.contains(*d));
        for date in outside {
            assert!(!is_date_available(date, &window, &[]), "{date}");
        }
    }

    #[test]
    fn test_booked_dates_are_unavailable_regardless_of_window() {
        let bookings = [range(june(3), june(4)), range(june(28), june(30))];
        let windows = [june_window(), range(june(1), june(3)), range(june(29), june(29))];
        for window in &windows {
            for booking in &bookings {
                for date in booking.days() {
                    assert!(!is_date_available(date, window, &bookings), "{date}");
                }
            }
        }
    }

    #[test]
    fn test_free_dates_inside_window_are_available() {
        let bookings = [range(june(10), june(12))];
        for date in june_window().days() {
            let booked = bookings[0].contains(date);
            assert_eq!(is_date_available(date, &june_window(), &bookings), !booked);
        }
    }

    #[test]
    fn test_adjacent_bookings_are_checked_independently() {
        let bookings = [range(june(10), june(12)), range(june(13), june(15))];
        assert!(!is_date_available(june(12), &june_window(), &bookings));
        assert!(!is_date_available(june(13), &june_window(), &bookings));
        assert!(is_date_available(june(16), &june_window(), &bookings));
        assert_eq!(
            is_range_available(june(16), june(16), &june_window(), &bookings),
            Ok(true)
        );
    }

    #[test]
    fn test_range_availability_matches_per_day_conjunction() {
        let window = range(june(3), june(20));
        let bookings = [range(june(8), june(9)), range(june(14), june(14))];

        for start in range(june(1), june(22)).days() {
            for end in range(start, june(22)).days() {
                let expected = range(start, end)
                    .days()
                    .all(|d| is_date_available(d, &window, &bookings));
                assert_eq!(
                    is_range_available(start, end, &window, &bookings),
                    Ok(expected),
                    "{start}..={end}"
                );
            }
        }
    }

    #[test]
    fn test_is_date_available_is_deterministic() {
        let bookings = [range(june(10), june(12))];
        let first = is_date_available(june(11), &june_window(), &bookings);
        let second = is_date_available(june(11), &june_window(), &bookings);
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_conflicts_returns_only_overlapping_bookings() {
        let bookings = [
            range(june(1), june(2)),
            range(june(10), june(12)),
            range(june(14), june(16)),
        ];
        let conflicts = find_conflicts(&range(june(11), june(14)), &bookings);
        assert_eq!(conflicts, vec![bookings[1], bookings[2]]);
    }

    #[test]
    fn test_available_dates_skips_booked_and_out_of_window_days() {
        let window = range(june(3), june(8));
        let bookings = [range(june(5), june(6))];
        let dates = available_dates(&range(june(1), june(10)), &window, &bookings);
        assert_eq!(dates, vec![june(3), june(4), june(7), june(8)]);
    }

    #[test]
    fn test_available_dates_only_scans_the_window() {
        let unbounded = range(NaiveDate::MIN, NaiveDate::MAX);
        let bookings = [range(june(10), june(12))];

        let dates = available_dates(&unbounded, &june_window(), &bookings);
        assert_eq!(dates.len(), 27);
        assert_eq!(dates.first(), Some(&june(1)));
        assert_eq!(dates.last(), Some(&june(30)));
    }

    #[test]
    fn test_available_dates_is_empty_when_range_misses_window() {
        let july = range(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
        );
        assert!(available_dates(&july, &june_window(), &[]).is_empty());
    }
}
