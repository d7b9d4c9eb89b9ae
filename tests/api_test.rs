use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use toestel_rental::api::handlers::AppState;
use toestel_rental::api::router::create_router;
use toestel_rental::api::types::*;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

// ============================================================================
// ヘルパー関数
// ============================================================================

/// インメモリアダプターでルーターを構築
fn setup_app() -> axum::Router {
    let service_deps = common::in_memory_deps();
    create_router(Arc::new(AppState { service_deps }))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

/// 6月1日〜30日に貸出可能な toestel を出品する
async fn create_toestel(app: &axum::Router, owner_id: Uuid, name: &str, category: &str) -> Uuid {
    let (status, body) = send(
        app,
        "POST",
        "/toestellen",
        Some(json!({
            "owner_id": owner_id,
            "name": name,
            "description": "Te huur in Gent",
            "price": 12.5,
            "category": category,
            "availability_start": "2025-06-01",
            "availability_end": "2025-06-30",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: ToestelCreatedResponse = serde_json::from_slice(&body).unwrap();
    created.toestel_id
}

async fn rent(app: &axum::Router, toestel_id: Uuid, renter_id: Uuid, start: &str, end: &str) -> (StatusCode, Vec<u8>) {
    send(
        app,
        "POST",
        &format!("/toestellen/{}/rentals", toestel_id),
        Some(json!({
            "renter_id": renter_id,
            "start_date": start,
            "end_date": end,
        })),
    )
    .await
}

// ============================================================================
// テスト
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_full_rental_flow() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    let renter_id = Uuid::new_v4();

    // Step 1: 出品（POST /toestellen）
    let toestel_id = create_toestel(&app, owner_id, "Hogedrukreiniger", "Schoonmaakapparatuur").await;

    // Step 2: 出品詳細（GET /toestellen/:id）
    let (status, body) = send(&app, "GET", &format!("/toestellen/{}", toestel_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let toestel: ToestelResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(toestel.name, "Hogedrukreiniger");
    assert_eq!(toestel.price_unit, "Dag");

    // Step 3: 予約（POST /toestellen/:id/rentals）
    let (status, body) = rent(&app, toestel_id, renter_id, "2025-06-10", "2025-06-12").await;
    assert_eq!(status, StatusCode::CREATED);
    let rental: RentalResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(rental.toestel_id, toestel_id);
    assert_eq!(rental.start_date.to_string(), "2025-06-10");

    // Step 4: 重なる期間は 409
    let (status, body) = rent(&app, toestel_id, Uuid::new_v4(), "2025-06-09", "2025-06-11").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "RANGE_UNAVAILABLE");
    assert_eq!(error.conflicts.len(), 1);
    assert_eq!(error.conflicts[0].start_date.to_string(), "2025-06-10");

    // Step 5: 貸出可能状況（GET /toestellen/:id/availability）
    let (status, body) = send(
        &app,
        "GET",
        &format!("/toestellen/{}/availability?start=2025-06-13&end=2025-06-20", toestel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let availability: AvailabilityResponse = serde_json::from_slice(&body).unwrap();
    assert!(availability.available);
    assert_eq!(availability.available_dates.len(), 8);

    // Step 6: 予約一覧
    let (status, body) = send(&app, "GET", &format!("/rentals?renter_id={}", renter_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let rentals: Vec<RentalResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(rentals.len(), 1);

    // Step 7: キャンセル（DELETE /rentals/:id）
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/rentals/{}", rental.rental_id),
        Some(json!({ "user_id": renter_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &format!("/toestellen/{}/rentals", toestel_id), None).await;
    let rentals: Vec<RentalResponse> = serde_json::from_slice(&body).unwrap();
    assert!(rentals.is_empty());
}

#[tokio::test]
async fn test_reversed_range_is_bad_request() {
    let app = setup_app();
    let toestel_id = create_toestel(&app, Uuid::new_v4(), "Boormachine", "Gereedschap").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/toestellen/{}/availability?start=2025-06-20&end=2025-06-13", toestel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "INVALID_RANGE_ORDER");

    let (status, _) = rent(&app, toestel_id, Uuid::new_v4(), "2025-06-20", "2025-06-13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rent_unknown_toestel_is_not_found() {
    let app = setup_app();
    let (status, body) = rent(&app, Uuid::new_v4(), Uuid::new_v4(), "2025-06-01", "2025-06-02").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "TOESTEL_NOT_FOUND");
}

#[tokio::test]
async fn test_rent_outside_window_is_conflict() {
    let app = setup_app();
    let toestel_id = create_toestel(&app, Uuid::new_v4(), "Boormachine", "Gereedschap").await;

    let (status, body) = rent(&app, toestel_id, Uuid::new_v4(), "2025-06-29", "2025-07-02").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "OUTSIDE_AVAILABILITY_WINDOW");
}

#[tokio::test]
async fn test_owner_cannot_rent_own_toestel() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    let toestel_id = create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;

    let (status, _) = rent(&app, toestel_id, owner_id, "2025-06-01", "2025-06-02").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_availability_requires_owner() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    let toestel_id = create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;
    let uri = format!("/toestellen/{}/availability", toestel_id);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "owner_id": Uuid::new_v4(),
            "availability_start": "2025-07-01",
            "availability_end": "2025-07-31",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({
            "owner_id": owner_id,
            "availability_start": "2025-07-01",
            "availability_end": "2025-07-31",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &format!("/toestellen/{}", toestel_id), None).await;
    let toestel: ToestelResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(toestel.availability_start.to_string(), "2025-07-01");
}

#[tokio::test]
async fn test_list_toestellen_with_filters() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;
    create_toestel(&app, owner_id, "Partytent", "Feest & Events").await;

    let (status, body) = send(&app, "GET", "/toestellen?q=boor", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<ToestelResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Boormachine");

    let (status, body) = send(&app, "GET", "/toestellen?category=Feest%20%26%20Events", None).await;
    assert_eq!(status, StatusCode::OK);
    let found: Vec<ToestelResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Partytent");

    let (status, _) = send(&app, "GET", "/toestellen?category=Boeken", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_query_span_is_capped() {
    let app = setup_app();
    let toestel_id = create_toestel(&app, Uuid::new_v4(), "Boormachine", "Gereedschap").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/toestellen/{}/availability?start=0001-01-01&end=9999-12-31", toestel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "RANGE_TOO_LONG");

    // 貸出可能期間より広い1年間の照会は、期間内の日だけを返す
    let (status, body) = send(
        &app,
        "GET",
        &format!("/toestellen/{}/availability?start=2025-01-01&end=2025-12-31", toestel_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let availability: AvailabilityResponse = serde_json::from_slice(&body).unwrap();
    assert!(!availability.available);
    assert_eq!(availability.available_dates.len(), 30);
}

#[tokio::test]
async fn test_list_toestellen_of_owner() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;
    create_toestel(&app, owner_id, "Partytent", "Feest & Events").await;
    create_toestel(&app, Uuid::new_v4(), "Grasmaaier", "Tuingereedschap").await;

    let (status, body) = send(&app, "GET", &format!("/toestellen?owner_id={}", owner_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let own: Vec<ToestelResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(own.len(), 2);
    assert!(own.iter().all(|t| t.owner_id == owner_id));

    let (_, body) = send(
        &app,
        "GET",
        &format!("/toestellen?owner_id={}&q=tent", owner_id),
        None,
    )
    .await;
    let own: Vec<ToestelResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].name, "Partytent");
}

#[tokio::test]
async fn test_edit_toestel() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    let toestel_id = create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;
    let uri = format!("/toestellen/{}", toestel_id);
    let edit = |owner_id: Uuid, name: &str| {
        json!({
            "owner_id": owner_id,
            "name": name,
            "description": "Met koffer",
            "price": 20.0,
            "category": "Electronica",
            "photo_url": "https://img.example/boor.jpg",
            "availability_start": "2025-07-01",
            "availability_end": "2025-07-15",
        })
    };

    let (status, _) = send(&app, "PUT", &uri, Some(edit(Uuid::new_v4(), "Klopboor"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "PUT", &uri, Some(edit(owner_id, " "))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "INVALID_TOESTEL");

    let (status, _) = send(&app, "PUT", &uri, Some(edit(owner_id, "Klopboor"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", &uri, None).await;
    let toestel: ToestelResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(toestel.name, "Klopboor");
    assert_eq!(toestel.description, "Met koffer");
    assert_eq!(toestel.price, 20.0);
    assert_eq!(toestel.price_unit, "Dag");
    assert_eq!(toestel.photo_url.as_deref(), Some("https://img.example/boor.jpg"));
    assert_eq!(toestel.availability_end.to_string(), "2025-07-15");
}

#[tokio::test]
async fn test_delete_toestel() {
    let app = setup_app();
    let owner_id = Uuid::new_v4();
    let renter_id = Uuid::new_v4();
    let toestel_id = create_toestel(&app, owner_id, "Boormachine", "Gereedschap").await;
    let uri = format!("/toestellen/{}", toestel_id);

    let (status, _) = rent(&app, toestel_id, renter_id, "2025-06-10", "2025-06-12").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({ "owner_id": renter_id }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({ "owner_id": owner_id }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", &format!("/rentals?renter_id={}", renter_id), None).await;
    let rentals: Vec<RentalResponse> = serde_json::from_slice(&body).unwrap();
    assert!(rentals.is_empty());

    let (status, _) = send(&app, "DELETE", &uri, Some(json!({ "owner_id": owner_id }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
