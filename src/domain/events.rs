use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DateRange, RentalId, ToestelId, UserId};

/// イベント：予約が作成された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalCreated {
    pub rental_id: RentalId,
    pub toestel_id: ToestelId,
    pub renter_id: UserId,
    pub period: DateRange,
    pub created_at: DateTime<Utc>,
}

/// イベント：予約がキャンセルされた
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalCancelled {
    pub rental_id: RentalId,
    pub toestel_id: ToestelId,
    pub period: DateRange,
    pub cancelled_by: UserId,
    pub cancelled_at: DateTime<Utc>,
}

/// イベント：貸出可能期間が変更された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityUpdated {
    pub toestel_id: ToestelId,
    pub old_availability: DateRange,
    pub new_availability: DateRange,
    pub updated_at: DateTime<Utc>,
}

/// イベント：出品内容が変更された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToestelUpdated {
    pub toestel_id: ToestelId,
    pub old_availability: DateRange,
    pub new_availability: DateRange,
    pub updated_at: DateTime<Utc>,
}

/// イベント：出品が取り下げられた
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToestelDeleted {
    pub toestel_id: ToestelId,
    pub deleted_by: UserId,
    pub deleted_at: DateTime<Utc>,
}
