use crate::domain::{
    self, DateRange, RentToestelError, ToestelId, UserId, availability,
    commands::{CancelRental, RentToestel},
    rental::Rental,
    toestel::Toestel,
    value_objects::RentalId,
};
use crate::ports::*;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::errors::{RentalApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、各ユースケース関数に明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub toestel_catalog: Arc<dyn ToestelCatalog>,
    pub rental_store: Arc<dyn RentalStore>,
}

/// 貸出可能状況を一度に照会できる最大日数
pub const MAX_AVAILABILITY_QUERY_DAYS: i64 = 366;

/// 貸出可能判定の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub toestel_id: ToestelId,
    pub window: DateRange,
    pub requested: DateRange,
    /// requested の全日が予約可能か
    pub available: bool,
    /// requested と重なる既存予約
    pub conflicts: Vec<DateRange>,
    /// requested のうち予約可能な日
    pub available_dates: Vec<NaiveDate>,
}

/// ToestelCatalogから toestel を取得するヘルパー関数
///
/// # エラー
/// - CatalogError: 読み込み失敗
/// - ToestelNotFound: 存在しない
pub(super) async fn load_toestel(
    catalog: &Arc<dyn ToestelCatalog>,
    toestel_id: ToestelId,
) -> Result<Toestel> {
    catalog
        .get_by_id(toestel_id)
        .await
        .map_err(RentalApplicationError::CatalogError)?
        .ok_or(RentalApplicationError::ToestelNotFound)
}

async fn load_rentals(store: &Arc<dyn RentalStore>, toestel_id: ToestelId) -> Result<Vec<Rental>> {
    store
        .find_by_toestel(toestel_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)
}

impl From<RentToestelError> for RentalApplicationError {
    fn from(err: RentToestelError) -> Self {
        match err {
            RentToestelError::OwnToestel => RentalApplicationError::OwnToestel,
            RentToestelError::OutsideAvailabilityWindow { window } => {
                RentalApplicationError::OutsideAvailabilityWindow { window }
            }
            RentToestelError::AlreadyBooked { conflicts } => {
                RentalApplicationError::RangeUnavailable { conflicts }
            }
        }
    }
}

/// 予約する
///
/// ビジネスルール：
/// - toestel が存在すること
/// - 出品者本人でないこと
/// - 期間全体が貸出可能期間内で、既存予約と重ならないこと
///
/// # 一貫性保証
///
/// 事前チェックは取得済みスナップショットに対して行い、
/// 保存時に`RentalStore::insert_if_available`で不可分に再検証する。
/// 事前チェック後に他の予約が入った場合は`RangeUnavailable`、
/// 貸出可能期間が変更された場合は変更後の期間で`OutsideAvailabilityWindow`となる。
pub async fn rent_toestel(deps: &ServiceDependencies, cmd: RentToestel) -> Result<RentalId> {
    // 1. toestel と既存予約を並行して取得
    let (toestel, rentals) = futures::try_join!(
        load_toestel(&deps.toestel_catalog, cmd.toestel_id),
        load_rentals(&deps.rental_store, cmd.toestel_id),
    )?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (rental, event) = domain::rental::rent_toestel(
        &toestel,
        cmd.renter_id,
        cmd.period,
        &rentals,
        cmd.requested_at,
    )
    .inspect_err(|e| {
        tracing::debug!(toestel_id = %cmd.toestel_id.value(), error = %e, "rental rejected");
    })?;

    let rental_id = rental.rental_id;

    // 3. 条件付きで保存
    let outcome = deps
        .rental_store
        .insert_if_available(rental)
        .await
        .map_err(RentalApplicationError::RentalStoreError)?;

    match outcome {
        InsertOutcome::Inserted => {
            tracing::info!(
                rental_id = %event.rental_id.value(),
                toestel_id = %event.toestel_id.value(),
                start = %event.period.start(),
                end = %event.period.end(),
                "rental created"
            );
            Ok(rental_id)
        }
        InsertOutcome::OutsideAvailabilityWindow { window } => {
            tracing::warn!(
                toestel_id = %cmd.toestel_id.value(),
                start = %window.start(),
                end = %window.end(),
                "availability window changed before the rental was stored"
            );
            Err(RentalApplicationError::OutsideAvailabilityWindow { window })
        }
        InsertOutcome::Conflict(conflicts) => {
            tracing::warn!(
                toestel_id = %cmd.toestel_id.value(),
                conflicts = conflicts.len(),
                "rental lost a race with a concurrent booking"
            );
            Err(RentalApplicationError::RangeUnavailable { conflicts })
        }
        InsertOutcome::ToestelMissing => Err(RentalApplicationError::ToestelNotFound),
    }
}

/// 予約をキャンセルする
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 借り手または出品者による操作であること
pub async fn cancel_rental(deps: &ServiceDependencies, cmd: CancelRental) -> Result<()> {
    let rental = deps
        .rental_store
        .get_by_id(cmd.rental_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)?
        .ok_or(RentalApplicationError::RentalNotFound)?;

    let toestel = load_toestel(&deps.toestel_catalog, rental.toestel_id).await?;

    let event =
        domain::rental::cancel_rental(&rental, toestel.owner_id, cmd.cancelled_by, cmd.cancelled_at)
            .map_err(|e| RentalApplicationError::NotPermitted(e.to_string()))?;

    let deleted = deps
        .rental_store
        .delete(cmd.rental_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)?;

    if !deleted {
        // 取得後に別の操作で削除された
        return Err(RentalApplicationError::RentalNotFound);
    }

    tracing::info!(
        rental_id = %event.rental_id.value(),
        cancelled_by = %event.cancelled_by.value(),
        "rental cancelled"
    );

    Ok(())
}

/// 期間の貸出可能状況を調べる
///
/// カレンダー表示と予約確定前の確認に使用される。副作用なし。
/// 照会期間は`MAX_AVAILABILITY_QUERY_DAYS`日まで。
pub async fn check_availability(
    deps: &ServiceDependencies,
    toestel_id: ToestelId,
    requested: DateRange,
) -> Result<AvailabilityReport> {
    let days = requested.len_days();
    if days > MAX_AVAILABILITY_QUERY_DAYS {
        return Err(RentalApplicationError::RangeTooLong {
            days,
            max_days: MAX_AVAILABILITY_QUERY_DAYS,
        });
    }

    let (toestel, rentals) = futures::try_join!(
        load_toestel(&deps.toestel_catalog, toestel_id),
        load_rentals(&deps.rental_store, toestel_id),
    )?;

    let window = toestel.availability;
    let bookings = domain::rental::booked_periods(&rentals);

    Ok(AvailabilityReport {
        toestel_id,
        window,
        requested,
        available: availability::is_period_available(&requested, &window, &bookings),
        conflicts: availability::find_conflicts(&requested, &bookings),
        available_dates: availability::available_dates(&requested, &window, &bookings),
    })
}

/// toestel の予約一覧
pub async fn rentals_for_toestel(
    deps: &ServiceDependencies,
    toestel_id: ToestelId,
) -> Result<Vec<Rental>> {
    load_toestel(&deps.toestel_catalog, toestel_id).await?;
    load_rentals(&deps.rental_store, toestel_id).await
}

/// 借り手の予約一覧
pub async fn rentals_for_renter(deps: &ServiceDependencies, renter_id: UserId) -> Result<Vec<Rental>> {
    deps.rental_store
        .find_by_renter(renter_id)
        .await
        .map_err(RentalApplicationError::RentalStoreError)
}
