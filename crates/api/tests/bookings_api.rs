//! HTTP-level integration tests for availability, booked days, booking
//! creation, visibility rules and invoices.

mod common;

use axum::http::StatusCode;
use bookit_db::models::room::Room;
use bookit_db::models::user::User;
use bookit_db::repositories::UserRepo;
use common::{
    body_json, create_admin, create_room, create_verified_user, delete_auth, get, get_auth,
    post_json, post_json_auth, token_for,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    admin: User,
    guest: User,
    room: Room,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let admin = create_admin(pool, "admin").await;
    let guest = create_verified_user(pool, "guest").await;
    let room = create_room(pool, admin.id, "Sea View").await;
    Fixture { admin, guest, room }
}

fn booking_body(room_id: i64, check_in: &str, check_out: &str) -> serde_json::Value {
    json!({
        "room_id": room_id,
        "check_in_date": check_in,
        "check_out_date": check_out,
        "amount_paid_cents": 50_000,
        "payment_info": { "id": "pi_123", "status": "paid" },
    })
}

async fn book(app: axum::Router, user: &User, room_id: i64, check_in: &str, check_out: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        booking_body(room_id, check_in, check_out),
        &token_for(user),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn is_available(app: axum::Router, room_id: i64, check_in: &str, check_out: &str) -> bool {
    let uri = format!(
        "/api/v1/bookings/availability?room_id={room_id}&check_in_date={check_in}&check_out_date={check_out}"
    );
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["is_available"]
        .as_bool()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_room_without_bookings_is_available(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    assert!(is_available(app, f.room.id, "2024-01-10T00:00:00Z", "2024-01-15T00:00:00Z").await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_january_availability_scenario(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    book(app.clone(), &f.guest, f.room.id, "2024-01-10T00:00:00Z", "2024-01-15T00:00:00Z").await;

    assert!(is_available(app.clone(), f.room.id, "2024-01-16T00:00:00Z", "2024-01-18T00:00:00Z").await);
    assert!(!is_available(app.clone(), f.room.id, "2024-01-14T00:00:00Z", "2024-01-20T00:00:00Z").await);
    // Checking in on the existing check-out day conflicts.
    assert!(!is_available(app.clone(), f.room.id, "2024-01-15T00:00:00Z", "2024-01-17T00:00:00Z").await);
    // The exact booked range conflicts.
    assert!(!is_available(app.clone(), f.room.id, "2024-01-10T00:00:00Z", "2024-01-15T00:00:00Z").await);
    // Entirely before.
    assert!(is_available(app, f.room.id, "2024-01-01T00:00:00Z", "2024-01-09T00:00:00Z").await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_availability_rejects_malformed_dates(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let uri = format!(
        "/api/v1/bookings/availability?room_id={}&check_in_date=tomorrow&check_out_date=2024-01-15T00:00:00Z",
        f.room.id
    );
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_booked_days_lists_each_day(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    book(app.clone(), &f.guest, f.room.id, "2024-03-01T00:00:00Z", "2024-03-03T00:00:00Z").await;
    book(app.clone(), &f.guest, f.room.id, "2024-03-10T00:00:00Z", "2024-03-11T00:00:00Z").await;

    let response = get(app, &format!("/api/v1/bookings/booked-days?room_id={}", f.room.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let mut days: Vec<String> = json["data"]["booked_dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect();
    days.sort();
    assert_eq!(
        days,
        vec!["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-10", "2024-03-11"]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_booked_days_for_unbooked_room_is_empty(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/bookings/booked-days?room_id={}", f.room.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["booked_dates"], json!([]));
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_booking_requires_auth(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-02-01T00:00:00Z", "2024-02-03T00:00:00Z"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_booking_for_deleted_account_is_unauthorized(pool: PgPool) {
    let f = fixture(&pool).await;
    let token = token_for(&f.guest);
    assert!(UserRepo::delete(&pool, f.guest.id).await.unwrap());
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app.clone(),
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-02-01T00:00:00Z", "2024-02-03T00:00:00Z"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    assert!(is_available(app, f.room.id, "2024-02-01T00:00:00Z", "2024-02-03T00:00:00Z").await);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_booking_derives_days_of_stay(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-02-01T00:00:00Z", "2024-02-04T00:00:00Z"),
        &token_for(&f.guest),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["days_of_stay"], 3);
    assert_eq!(json["data"]["user_id"], f.guest.id);
    assert_eq!(json["data"]["payment_info"]["status"], "paid");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overlapping_booking_conflicts(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    book(app.clone(), &f.guest, f.room.id, "2024-04-10T00:00:00Z", "2024-04-15T00:00:00Z").await;

    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-04-15T00:00:00Z", "2024-04-18T00:00:00Z"),
        &token_for(&f.admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_booking_validates_input(pool: PgPool) {
    let f = fixture(&pool).await;
    let token = token_for(&f.guest);
    let app = common::build_test_app(pool);

    // Check-out before check-in.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-02-05T00:00:00Z", "2024-02-01T00:00:00Z"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Stay longer than a year.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/bookings",
        booking_body(f.room.id, "2024-02-01T00:00:00Z", "2025-02-05T00:00:00Z"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Unknown room.
    let response = post_json_auth(
        app,
        "/api/v1/bookings",
        booking_body(999_999, "2024-02-01T00:00:00Z", "2024-02-05T00:00:00Z"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Visibility and invoices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_booking_visible_to_owner_and_admin_only(pool: PgPool) {
    let f = fixture(&pool).await;
    let stranger = create_verified_user(&pool, "stranger").await;
    let app = common::build_test_app(pool);

    let id = book(app.clone(), &f.guest, f.room.id, "2024-05-01T00:00:00Z", "2024-05-03T00:00:00Z").await;
    let uri = format!("/api/v1/bookings/{id}");

    let response = get_auth(app.clone(), &uri, &token_for(&f.guest)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["room_name"], "Sea View");
    assert_eq!(json["data"]["user_email"], "guest@test.com");

    let response = get_auth(app.clone(), &uri, &token_for(&f.admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &uri, &token_for(&stranger)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/bookings/999999", &token_for(&f.guest)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_my_bookings_lists_only_own(pool: PgPool) {
    let f = fixture(&pool).await;
    let other_room = create_room(&pool, f.admin.id, "Garden").await;
    let app = common::build_test_app(pool);

    book(app.clone(), &f.guest, f.room.id, "2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z").await;
    book(app.clone(), &f.admin, other_room.id, "2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z").await;

    let response = get_auth(app.clone(), "/api/v1/bookings/me", &token_for(&f.guest)).await;
    let json = body_json(response).await;
    let mine = json["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["room_name"], "Sea View");

    let response = get_auth(app.clone(), "/api/v1/admin/bookings", &token_for(&f.admin)).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = get_auth(app, "/api/v1/admin/bookings", &token_for(&f.guest)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invoice_bills_each_night(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let id = book(app.clone(), &f.guest, f.room.id, "2024-07-01T00:00:00Z", "2024-07-04T00:00:00Z").await;

    let response = get_auth(app, &format!("/api/v1/bookings/{id}/invoice"), &token_for(&f.guest)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let invoice = &json["data"];
    assert_eq!(invoice["invoice_number"], id.to_string());
    assert_eq!(invoice["client"]["name"], "guest");
    assert_eq!(invoice["client"]["email"], "guest@test.com");
    assert_eq!(invoice["items"][0]["description"], "Sea View");
    assert_eq!(invoice["items"][0]["quantity"], 3);
    assert_eq!(invoice["items"][0]["unit_price_cents"], 10_000);
    assert_eq!(invoice["total_cents"], 30_000);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_delete_frees_dates(pool: PgPool) {
    let f = fixture(&pool).await;
    let token = token_for(&f.admin);
    let app = common::build_test_app(pool);

    let id = book(app.clone(), &f.guest, f.room.id, "2024-08-01T00:00:00Z", "2024-08-05T00:00:00Z").await;
    assert!(!is_available(app.clone(), f.room.id, "2024-08-02T00:00:00Z", "2024-08-03T00:00:00Z").await);

    let uri = format!("/api/v1/admin/bookings/{id}");
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(is_available(app, f.room.id, "2024-08-02T00:00:00Z", "2024-08-03T00:00:00Z").await);
}
