use crate::application::rental::{
    ServiceDependencies, cancel_rental as execute_cancel_rental,
    check_availability as execute_check_availability, delete_toestel as execute_delete_toestel,
    get_toestel as execute_get_toestel, register_toestel as execute_register_toestel,
    rent_toestel as execute_rent_toestel, rentals_for_renter, rentals_for_toestel,
    search_toestellen as execute_search_toestellen, toestellen_for_owner,
    update_availability as execute_update_availability,
    update_toestel as execute_update_toestel,
};
use crate::domain::{
    DateRange,
    commands::{CancelRental, DeleteToestel, UpdateAvailability},
    value_objects::{RentalId, ToestelId, UserId},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AvailabilityQuery, AvailabilityResponse, CancelRentalRequest, DeleteToestelRequest,
        ListRentalsQuery, ListToestellenQuery, PeriodResponse, RegisterToestelRequest,
        RentToestelRequest, RentalResponse, ToestelCreatedResponse, ToestelResponse,
        UpdateAvailabilityRequest, UpdateToestelRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Toestel handlers
// ============================================================================

/// POST /toestellen - 出品する
pub async fn create_toestel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterToestelRequest>,
) -> Result<(StatusCode, Json<ToestelCreatedResponse>), ApiError> {
    let cmd = req.to_command()?;
    let toestel_id = execute_register_toestel(&state.service_deps, cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ToestelCreatedResponse {
            toestel_id: toestel_id.value(),
        }),
    ))
}

/// GET /toestellen - 出品一覧（q, category, owner_id で絞り込み）
pub async fn list_toestellen(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListToestellenQuery>,
) -> Result<Json<Vec<ToestelResponse>>, ApiError> {
    let filter = query.to_filter().map_err(ApiError::BadRequest)?;
    let toestellen = match query.owner_id {
        Some(owner_id) => {
            let mut own =
                toestellen_for_owner(&state.service_deps, UserId::from_uuid(owner_id)).await?;
            own.retain(|t| filter.matches(t));
            own
        }
        None => execute_search_toestellen(&state.service_deps, &filter).await?,
    };

    Ok(Json(
        toestellen.into_iter().map(ToestelResponse::from).collect(),
    ))
}

/// GET /toestellen/:id - 出品詳細
pub async fn get_toestel(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
) -> Result<Json<ToestelResponse>, ApiError> {
    let toestel =
        execute_get_toestel(&state.service_deps, ToestelId::from_uuid(toestel_id)).await?;
    Ok(Json(ToestelResponse::from(toestel)))
}

/// PUT /toestellen/:id - 出品内容を変更
///
/// 強制されるビジネスルール:
/// - 出品者本人であること
/// - 名称が空でなく、価格が0以上であること
/// - 開始日 <= 終了日
pub async fn update_toestel(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
    Json(req): Json<UpdateToestelRequest>,
) -> Result<StatusCode, ApiError> {
    let cmd = req.to_command(ToestelId::from_uuid(toestel_id))?;
    execute_update_toestel(&state.service_deps, cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /toestellen/:id - 出品を取り下げる（予約も削除される）
pub async fn delete_toestel(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
    Json(req): Json<DeleteToestelRequest>,
) -> Result<StatusCode, ApiError> {
    let cmd = DeleteToestel {
        toestel_id: ToestelId::from_uuid(toestel_id),
        requested_by: UserId::from_uuid(req.owner_id),
        deleted_at: chrono::Utc::now(),
    };

    execute_delete_toestel(&state.service_deps, cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /toestellen/:id/availability - 貸出可能期間を変更
///
/// 強制されるビジネスルール:
/// - 出品者本人であること
/// - 開始日 <= 終了日
pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
    Json(req): Json<UpdateAvailabilityRequest>,
) -> Result<StatusCode, ApiError> {
    let cmd = UpdateAvailability {
        toestel_id: ToestelId::from_uuid(toestel_id),
        requested_by: UserId::from_uuid(req.owner_id),
        availability: DateRange::new(req.availability_start, req.availability_end)?,
        updated_at: chrono::Utc::now(),
    };

    execute_update_availability(&state.service_deps, cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /toestellen/:id/availability?start=&end= - 期間の貸出可能状況
///
/// end < start の場合、または照会期間が366日を超える場合は 400 を返す。
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let requested = DateRange::new(query.start, query.end)?;
    let report = execute_check_availability(
        &state.service_deps,
        ToestelId::from_uuid(toestel_id),
        requested,
    )
    .await?;

    Ok(Json(AvailabilityResponse {
        toestel_id: report.toestel_id.value(),
        availability_start: report.window.start(),
        availability_end: report.window.end(),
        available: report.available,
        conflicts: report
            .conflicts
            .into_iter()
            .map(PeriodResponse::from)
            .collect(),
        available_dates: report.available_dates,
    }))
}

// ============================================================================
// Rental handlers
// ============================================================================

/// POST /toestellen/:id/rentals - 予約する
///
/// 強制されるビジネスルール:
/// - toestel が存在すること
/// - 出品者本人でないこと
/// - 期間全体が貸出可能期間内で、既存予約と重ならないこと
pub async fn create_rental(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
    Json(req): Json<RentToestelRequest>,
) -> Result<(StatusCode, Json<RentalResponse>), ApiError> {
    let cmd = req.to_command(ToestelId::from_uuid(toestel_id))?;
    let (renter_id, period, requested_at) = (cmd.renter_id, cmd.period, cmd.requested_at);

    let rental_id = execute_rent_toestel(&state.service_deps, cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(RentalResponse {
            rental_id: rental_id.value(),
            toestel_id,
            renter_id: renter_id.value(),
            start_date: period.start(),
            end_date: period.end(),
            created_at: requested_at,
        }),
    ))
}

/// GET /toestellen/:id/rentals - toestel の予約一覧
pub async fn list_toestel_rentals(
    State(state): State<Arc<AppState>>,
    Path(toestel_id): Path<Uuid>,
) -> Result<Json<Vec<RentalResponse>>, ApiError> {
    let rentals =
        rentals_for_toestel(&state.service_deps, ToestelId::from_uuid(toestel_id)).await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// GET /rentals?renter_id= - 借り手の予約一覧
pub async fn list_renter_rentals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListRentalsQuery>,
) -> Result<Json<Vec<RentalResponse>>, ApiError> {
    let rentals = rentals_for_renter(&state.service_deps, UserId::from_uuid(query.renter_id)).await?;
    Ok(Json(rentals.into_iter().map(RentalResponse::from).collect()))
}

/// DELETE /rentals/:id - 予約をキャンセル
///
/// 借り手または出品者のみ実行可能。
pub async fn cancel_rental(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
    Json(req): Json<CancelRentalRequest>,
) -> Result<StatusCode, ApiError> {
    let cmd = CancelRental {
        rental_id: RentalId::from_uuid(rental_id),
        cancelled_by: UserId::from_uuid(req.user_id),
        cancelled_at: chrono::Utc::now(),
    };

    execute_cancel_rental(&state.service_deps, cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
