use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    AvailabilityUpdated, Category, DateRange, ManageToestelError, RegisterToestelError,
    ToestelDeleted, ToestelId, ToestelUpdated, UserId,
    commands::{RegisterToestel, UpdateToestel},
};

/// Toestel集約 - 貸し出される1つの道具
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toestel {
    pub toestel_id: ToestelId,
    pub owner_id: UserId,

    pub name: String,
    pub description: String,
    pub price: f64,
    /// 価格の単位（例: "Dag"）
    pub price_unit: String,
    pub category: Category,
    pub photo_url: Option<String>,

    /// 貸出可能期間
    pub availability: DateRange,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 純粋関数：出品する
///
/// ビジネスルール：
/// - 名称は空白のみ不可
/// - 価格は0以上の有限値
///
/// 貸出可能期間は`DateRange`の時点で start <= end が保証されている。
pub fn register_toestel(
    cmd: RegisterToestel,
    now: DateTime<Utc>,
) -> Result<Toestel, RegisterToestelError> {
    let name = validate_listing(&cmd.name, cmd.price)?;

    Ok(Toestel {
        toestel_id: ToestelId::new(),
        owner_id: cmd.owner_id,
        name,
        description: cmd.description,
        price: cmd.price,
        price_unit: cmd.price_unit,
        category: cmd.category,
        photo_url: cmd.photo_url,
        availability: cmd.availability,
        created_at: now,
        updated_at: now,
    })
}

/// 名称と価格の検証。前後の空白を除いた名称を返す。
fn validate_listing(name: &str, price: f64) -> Result<String, RegisterToestelError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RegisterToestelError::EmptyName);
    }
    if !price.is_finite() || price < 0.0 {
        return Err(RegisterToestelError::InvalidPrice);
    }
    Ok(name.to_string())
}

/// 純粋関数：貸出可能期間を変更する
///
/// 出品者のみ変更可能。既存予約が新しい期間外になっても変更は受け付ける
/// （既存予約はそのまま有効）。
pub fn update_availability(
    toestel: &Toestel,
    requested_by: UserId,
    availability: DateRange,
    now: DateTime<Utc>,
) -> Result<(Toestel, AvailabilityUpdated), ManageToestelError> {
    if toestel.owner_id != requested_by {
        return Err(ManageToestelError::NotOwner);
    }

    let event = AvailabilityUpdated {
        toestel_id: toestel.toestel_id,
        old_availability: toestel.availability,
        new_availability: availability,
        updated_at: now,
    };

    let updated = Toestel {
        availability,
        updated_at: now,
        ..toestel.clone()
    };

    Ok((updated, event))
}

/// 純粋関数：出品内容をまとめて変更する
///
/// 出品者のみ。名称・説明・価格・カテゴリ・写真・貸出可能期間を置き換える。
/// 検証は出品時と同じ。出品者と作成日時は変わらない。
pub fn update_toestel(
    toestel: &Toestel,
    cmd: UpdateToestel,
) -> Result<(Toestel, ToestelUpdated), ManageToestelError> {
    if toestel.owner_id != cmd.requested_by {
        return Err(ManageToestelError::NotOwner);
    }
    let name = validate_listing(&cmd.name, cmd.price)?;

    let event = ToestelUpdated {
        toestel_id: toestel.toestel_id,
        old_availability: toestel.availability,
        new_availability: cmd.availability,
        updated_at: cmd.updated_at,
    };

    let updated = Toestel {
        name,
        description: cmd.description,
        price: cmd.price,
        price_unit: cmd.price_unit,
        category: cmd.category,
        photo_url: cmd.photo_url,
        availability: cmd.availability,
        updated_at: cmd.updated_at,
        ..toestel.clone()
    };

    Ok((updated, event))
}

/// 純粋関数：出品を取り下げる
///
/// 出品者のみ。既存予約は出品とともに削除される。
pub fn delete_toestel(
    toestel: &Toestel,
    requested_by: UserId,
    now: DateTime<Utc>,
) -> Result<ToestelDeleted, ManageToestelError> {
    if toestel.owner_id != requested_by {
        return Err(ManageToestelError::NotOwner);
    }

    Ok(ToestelDeleted {
        toestel_id: toestel.toestel_id,
        deleted_by: requested_by,
        deleted_at: now,
    })
}

/// 出品一覧の絞り込み条件
///
/// - query: 名称または説明に含まれる文字列（大文字小文字を区別しない）
/// - category: カテゴリ一致
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub query: Option<String>,
    pub category: Option<Category>,
}

impl ListingFilter {
    pub fn matches(&self, toestel: &Toestel) -> bool {
        let matches_query = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                toestel.name.to_lowercase().contains(&q)
                    || toestel.description.to_lowercase().contains(&q)
            }
        };
        let matches_category = self.category.is_none_or(|c| c == toestel.category);
        matches_query && matches_category
    }
}
