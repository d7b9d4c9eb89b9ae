use chrono::NaiveDate;
use thiserror::Error;

use super::DateRange;

/// 日付範囲のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    /// 終了日が開始日より前
    #[error("end date {end} is before start date {start}")]
    InvalidRangeOrder { start: NaiveDate, end: NaiveDate },
}

/// 日付選択のエラー
///
/// いずれの場合も選択状態は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 貸出可能期間外、または既存予約と重なる日付
    #[error("date {0} is not available")]
    DateUnavailable(NaiveDate),
    /// 範囲内に貸出不可の日が含まれる
    #[error("not every day between {} and {} is available", .0.start(), .0.end())]
    RangeUnavailable(DateRange),
}

/// 出品のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterToestelError {
    /// 名称が空
    #[error("name must not be empty")]
    EmptyName,
    /// 価格が負、または数値でない
    #[error("price must be a non-negative number")]
    InvalidPrice,
}

/// 予約のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentToestelError {
    /// 自分の出品は借りられない
    #[error("owners cannot rent their own toestel")]
    OwnToestel,
    /// 貸出可能期間外の日が含まれる
    #[error("requested period falls outside the availability window")]
    OutsideAvailabilityWindow { window: DateRange },
    /// 既存予約と重なる
    #[error("requested period overlaps {} existing rental(s)", .conflicts.len())]
    AlreadyBooked { conflicts: Vec<DateRange> },
}

/// 予約キャンセルのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelRentalError {
    /// 借り手でも出品者でもない
    #[error("only the renter or the owner may cancel a rental")]
    NotPermitted,
}

/// 出品の変更・削除のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManageToestelError {
    /// 出品者以外による操作
    #[error("only the owner may change or remove a toestel")]
    NotOwner,
    /// 変更後の内容が不正
    #[error(transparent)]
    Invalid(#[from] RegisterToestelError),
}
