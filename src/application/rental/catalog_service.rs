use crate::domain::{
    self, ManageToestelError, ToestelId, UserId,
    commands::{DeleteToestel, RegisterToestel, UpdateAvailability, UpdateToestel},
    toestel::{ListingFilter, Toestel},
};

use super::errors::{RentalApplicationError, Result};
use super::rental_service::{ServiceDependencies, load_toestel};

impl From<ManageToestelError> for RentalApplicationError {
    fn from(err: ManageToestelError) -> Self {
        let message = err.to_string();
        match err {
            ManageToestelError::NotOwner => RentalApplicationError::NotPermitted(message),
            ManageToestelError::Invalid(_) => RentalApplicationError::InvalidToestel(message),
        }
    }
}

/// 出品する
///
/// 出品時点では予約が存在しないため、貸出可能期間の妥当性のみ確認する。
pub async fn register_toestel(deps: &ServiceDependencies, cmd: RegisterToestel) -> Result<ToestelId> {
    let toestel = domain::toestel::register_toestel(cmd, chrono::Utc::now())
        .map_err(|e| RentalApplicationError::InvalidToestel(e.to_string()))?;
    let toestel_id = toestel.toestel_id;

    deps.toestel_catalog
        .save(toestel)
        .await
        .map_err(RentalApplicationError::CatalogError)?;

    tracing::info!(toestel_id = %toestel_id.value(), "toestel registered");
    Ok(toestel_id)
}

/// 貸出可能期間を変更する
///
/// 出品者のみ。既存予約は変更後の期間外でも残る。
pub async fn update_availability(deps: &ServiceDependencies, cmd: UpdateAvailability) -> Result<()> {
    let toestel = load_toestel(&deps.toestel_catalog, cmd.toestel_id).await?;

    let (updated, event) = domain::toestel::update_availability(
        &toestel,
        cmd.requested_by,
        cmd.availability,
        cmd.updated_at,
    )?;

    deps.toestel_catalog
        .save(updated)
        .await
        .map_err(RentalApplicationError::CatalogError)?;

    tracing::info!(
        toestel_id = %event.toestel_id.value(),
        start = %event.new_availability.start(),
        end = %event.new_availability.end(),
        "availability window updated"
    );
    Ok(())
}

/// 出品内容を変更する
///
/// 出品者のみ。名称・説明・価格・カテゴリ・写真・貸出可能期間をまとめて置き換える。
pub async fn update_toestel(deps: &ServiceDependencies, cmd: UpdateToestel) -> Result<()> {
    let toestel = load_toestel(&deps.toestel_catalog, cmd.toestel_id).await?;

    let (updated, event) = domain::toestel::update_toestel(&toestel, cmd)?;

    deps.toestel_catalog
        .save(updated)
        .await
        .map_err(RentalApplicationError::CatalogError)?;

    tracing::info!(toestel_id = %event.toestel_id.value(), "toestel updated");
    Ok(())
}

/// 出品を取り下げる
///
/// 出品者のみ。予約も合わせて削除される。
pub async fn delete_toestel(deps: &ServiceDependencies, cmd: DeleteToestel) -> Result<()> {
    let toestel = load_toestel(&deps.toestel_catalog, cmd.toestel_id).await?;

    let event = domain::toestel::delete_toestel(&toestel, cmd.requested_by, cmd.deleted_at)?;

    let deleted = deps
        .toestel_catalog
        .delete(cmd.toestel_id)
        .await
        .map_err(RentalApplicationError::CatalogError)?;

    if !deleted {
        return Err(RentalApplicationError::ToestelNotFound);
    }

    tracing::info!(
        toestel_id = %event.toestel_id.value(),
        deleted_by = %event.deleted_by.value(),
        "toestel deleted"
    );
    Ok(())
}

/// IDで toestel を取得する
pub async fn get_toestel(deps: &ServiceDependencies, toestel_id: ToestelId) -> Result<Toestel> {
    load_toestel(&deps.toestel_catalog, toestel_id).await
}

/// 出品一覧を検索する
pub async fn search_toestellen(
    deps: &ServiceDependencies,
    filter: &ListingFilter,
) -> Result<Vec<Toestel>> {
    deps.toestel_catalog
        .search(filter)
        .await
        .map_err(RentalApplicationError::CatalogError)
}

/// 出品者自身の toestel 一覧
pub async fn toestellen_for_owner(
    deps: &ServiceDependencies,
    owner_id: UserId,
) -> Result<Vec<Toestel>> {
    deps.toestel_catalog
        .find_by_owner(owner_id)
        .await
        .map_err(RentalApplicationError::CatalogError)
}
