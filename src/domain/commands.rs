use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, DateRange, RentalId, ToestelId, UserId};

/// コマンド：toestel を出品する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterToestel {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,
    pub availability: DateRange,
}

/// コマンド：貸出可能期間を変更する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAvailability {
    pub toestel_id: ToestelId,
    pub requested_by: UserId,
    pub availability: DateRange,
    pub updated_at: DateTime<Utc>,
}

/// コマンド：出品内容をまとめて変更する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateToestel {
    pub toestel_id: ToestelId,
    pub requested_by: UserId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,
    pub availability: DateRange,
    pub updated_at: DateTime<Utc>,
}

/// コマンド：出品を取り下げる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteToestel {
    pub toestel_id: ToestelId,
    pub requested_by: UserId,
    pub deleted_at: DateTime<Utc>,
}

/// コマンド：予約する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentToestel {
    pub toestel_id: ToestelId,
    pub renter_id: UserId,
    pub period: DateRange,
    pub requested_at: DateTime<Utc>,
}

/// コマンド：予約をキャンセルする
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRental {
    pub rental_id: RentalId,
    pub cancelled_by: UserId,
    pub cancelled_at: DateTime<Utc>,
}
