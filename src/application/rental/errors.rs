use thiserror::Error;

use crate::domain::{AvailabilityError, DateRange};

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum RentalApplicationError {
    /// toestel が存在しない
    #[error("Toestel not found")]
    ToestelNotFound,

    /// 予約が存在しない
    #[error("Rental not found")]
    RentalNotFound,

    /// 日付範囲の終了日が開始日より前
    #[error(transparent)]
    InvalidRange(#[from] AvailabilityError),

    /// 照会期間が長すぎる
    #[error("Requested period spans {days} days, at most {max_days} allowed")]
    RangeTooLong { days: i64, max_days: i64 },

    /// 出品内容が不正
    #[error("Invalid toestel: {0}")]
    InvalidToestel(String),

    /// 出品者が自分の toestel を予約しようとした
    #[error("Owners cannot rent their own toestel")]
    OwnToestel,

    /// 期間が貸出可能期間外
    #[error("Requested period is outside the availability window")]
    OutsideAvailabilityWindow { window: DateRange },

    /// 期間が既存予約と重なる
    #[error("Requested period is not available")]
    RangeUnavailable { conflicts: Vec<DateRange> },

    /// 操作権限がない（出品者・借り手以外）
    #[error("Not permitted: {0}")]
    NotPermitted(String),

    /// ToestelCatalogのエラー
    #[error("Toestel catalog error")]
    CatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// RentalStoreのエラー
    #[error("Rental store error")]
    RentalStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, RentalApplicationError>;
