use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AvailabilityError, Category, DateRange, ToestelId, UserId,
    commands::{RegisterToestel, RentToestel, UpdateToestel},
    rental::Rental,
    toestel::{ListingFilter, Toestel},
};

/// 出品リクエスト（POST /toestellen）
#[derive(Debug, Deserialize)]
pub struct RegisterToestelRequest {
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_price_unit")]
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
}

fn default_price_unit() -> String {
    "Dag".to_string()
}

impl RegisterToestelRequest {
    pub fn to_command(self) -> Result<RegisterToestel, AvailabilityError> {
        Ok(RegisterToestel {
            owner_id: UserId::from_uuid(self.owner_id),
            name: self.name,
            description: self.description,
            price: self.price,
            price_unit: self.price_unit,
            category: self.category,
            photo_url: self.photo_url,
            availability: DateRange::new(self.availability_start, self.availability_end)?,
        })
    }
}

/// 出品一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListToestellenQuery {
    /// 名称・説明の部分一致
    pub q: Option<String>,
    /// カテゴリでフィルタリング
    pub category: Option<String>,
    /// 出品者の toestel のみ
    pub owner_id: Option<Uuid>,
}

impl ListToestellenQuery {
    pub fn to_filter(&self) -> Result<ListingFilter, String> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?;
        Ok(ListingFilter {
            query: self.q.clone(),
            category,
        })
    }
}

/// toestel レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ToestelResponse {
    pub toestel_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Toestel> for ToestelResponse {
    fn from(toestel: Toestel) -> Self {
        Self {
            toestel_id: toestel.toestel_id.value(),
            owner_id: toestel.owner_id.value(),
            name: toestel.name,
            description: toestel.description,
            price: toestel.price,
            price_unit: toestel.price_unit,
            category: toestel.category,
            photo_url: toestel.photo_url,
            availability_start: toestel.availability.start(),
            availability_end: toestel.availability.end(),
            created_at: toestel.created_at,
            updated_at: toestel.updated_at,
        }
    }
}

/// 出品作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ToestelCreatedResponse {
    pub toestel_id: Uuid,
}

/// 出品内容変更リクエスト（PUT /toestellen/:id）
#[derive(Debug, Deserialize)]
pub struct UpdateToestelRequest {
    pub owner_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default = "default_price_unit")]
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
}

impl UpdateToestelRequest {
    pub fn to_command(self, toestel_id: ToestelId) -> Result<UpdateToestel, AvailabilityError> {
        Ok(UpdateToestel {
            toestel_id,
            requested_by: UserId::from_uuid(self.owner_id),
            name: self.name,
            description: self.description,
            price: self.price,
            price_unit: self.price_unit,
            category: self.category,
            photo_url: self.photo_url,
            availability: DateRange::new(self.availability_start, self.availability_end)?,
            updated_at: Utc::now(),
        })
    }
}

/// 出品取り下げリクエスト（DELETE /toestellen/:id）
#[derive(Debug, Deserialize)]
pub struct DeleteToestelRequest {
    pub owner_id: Uuid,
}

/// 貸出可能期間変更リクエスト（PUT /toestellen/:id/availability）
#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub owner_id: Uuid,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
}

/// 貸出可能状況のクエリパラメータ（GET /toestellen/:id/availability）
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// 予約リクエスト（POST /toestellen/:id/rentals）
#[derive(Debug, Deserialize)]
pub struct RentToestelRequest {
    pub renter_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RentToestelRequest {
    pub fn to_command(self, toestel_id: ToestelId) -> Result<RentToestel, AvailabilityError> {
        Ok(RentToestel {
            toestel_id,
            renter_id: UserId::from_uuid(self.renter_id),
            period: DateRange::new(self.start_date, self.end_date)?,
            requested_at: Utc::now(),
        })
    }
}

/// 予約キャンセルリクエスト（DELETE /rentals/:id）
#[derive(Debug, Deserialize)]
pub struct CancelRentalRequest {
    pub user_id: Uuid,
}

/// 借り手の予約一覧のクエリパラメータ（GET /rentals）
#[derive(Debug, Deserialize)]
pub struct ListRentalsQuery {
    pub renter_id: Uuid,
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct RentalResponse {
    pub rental_id: Uuid,
    pub toestel_id: Uuid,
    pub renter_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            rental_id: rental.rental_id.value(),
            toestel_id: rental.toestel_id.value(),
            renter_id: rental.renter_id.value(),
            start_date: rental.period.start(),
            end_date: rental.period.end(),
            created_at: rental.created_at,
        }
    }
}

/// 期間を表すレスポンス要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<DateRange> for PeriodResponse {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start(),
            end_date: range.end(),
        }
    }
}

/// 貸出可能状況レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub toestel_id: Uuid,
    pub availability_start: NaiveDate,
    pub availability_end: NaiveDate,
    pub available: bool,
    pub conflicts: Vec<PeriodResponse>,
    pub available_dates: Vec<NaiveDate>,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// 重なった予約（RANGE_UNAVAILABLEの場合のみ）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<PeriodResponse>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            conflicts: Vec::new(),
        }
    }

    pub fn with_conflicts(mut self, conflicts: &[DateRange]) -> Self {
        self.conflicts = conflicts.iter().copied().map(PeriodResponse::from).collect();
        self
    }
}
