use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DateRange, SelectionError, availability};

/// 予約したい期間の選択状態
///
/// 状態遷移：
/// Empty -> StartSelected -> RangeSelected -> (次の選択で) StartSelected
///
/// 確定（confirm）で RangeSelected の範囲が予約作成に渡され、選択は破棄される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Empty,
    StartSelected {
        start: NaiveDate,
    },
    RangeSelected {
        range: DateRange,
    },
}

impl Selection {
    /// 選択中の開始日
    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            Selection::Empty => None,
            Selection::StartSelected { start } => Some(*start),
            Selection::RangeSelected { range } => Some(range.start()),
        }
    }

    /// 選択中の終了日
    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            Selection::RangeSelected { range } => Some(range.end()),
            _ => None,
        }
    }

    /// 日付が選択範囲の表示対象か
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match self {
            Selection::Empty => false,
            Selection::StartSelected { start } => *start == date,
            Selection::RangeSelected { range } => range.contains(date),
        }
    }

    /// 確定可能な範囲を取り出す
    ///
    /// 開始日と終了日の両方が選ばれている場合のみ`Some`を返す。
    pub fn confirm(&self) -> Option<DateRange> {
        match self {
            Selection::RangeSelected { range } => Some(*range),
            _ => None,
        }
    }
}

/// 純粋関数：日付をタップしたときの状態遷移
///
/// ビジネスルール：
/// - 予約不可の日は選択できない
/// - 開始日より後の日を選ぶと終了日になる（範囲全体が予約可能な場合のみ）
/// - 開始日以前の日を選ぶと開始日の選び直しになる
/// - 範囲選択済みの状態で選ぶと新しい開始日になる
///
/// # エラー
/// 失敗時は元の選択状態を保持したまま利用すること（開始日は維持される）。
pub fn select_date(
    selection: Selection,
    date: NaiveDate,
    window: &DateRange,
    bookings: &[DateRange],
) -> Result<Selection, SelectionError> {
    if !availability::is_date_available(date, window, bookings) {
        return Err(SelectionError::DateUnavailable(date));
    }

    match selection {
        Selection::StartSelected { start } if date > start => {
            let range = DateRange::spanning(start, date);
            if availability::is_period_available(&range, window, bookings) {
                Ok(Selection::RangeSelected { range })
            } else {
                Err(SelectionError::RangeUnavailable(range))
            }
        }
        Selection::Empty | Selection::StartSelected { .. } | Selection::RangeSelected { .. } => {
            Ok(Selection::StartSelected { start: date })
        }
    }
}
