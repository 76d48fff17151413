#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bookit_api::app::build_app;
use bookit_api::auth::jwt::{generate_access_token, JwtConfig};
use bookit_api::auth::password::hash_password;
use bookit_api::config::ServerConfig;
use bookit_api::state::AppState;
use bookit_core::roles::ROLE_ADMIN;
use bookit_core::types::DbId;
use bookit_db::models::room::{CreateRoom, Room};
use bookit_db::models::user::{CreateUser, UpdateUser, User};
use bookit_db::repositories::{RoomRepo, UserRepo};
use chrono::FixedOffset;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Plaintext password given to every seeded user.
pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Calendar days are cut in UTC so booked-day expectations do not depend on
/// the machine running the tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        calendar_offset: Some(FixedOffset::east_opt(0).unwrap()),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(AppState::new(pool, test_config()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, None, body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a verified user with [`TEST_PASSWORD`].
pub async fn create_verified_user(pool: &PgPool, name: &str) -> User {
    let verify_token = format!("verify-{name}");
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{name}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        verify_token: verify_token.clone(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    UserRepo::verify(pool, &verify_token)
        .await
        .expect("verification should succeed")
        .expect("token should match the new user")
}

/// Create a verified admin.
pub async fn create_admin(pool: &PgPool, name: &str) -> User {
    let user = create_verified_user(pool, name).await;
    let promote = UpdateUser {
        name: None,
        email: None,
        role: Some(ROLE_ADMIN.to_string()),
    };
    UserRepo::update(pool, user.id, &promote)
        .await
        .expect("promotion should succeed")
        .expect("user should exist")
}

/// Mint an access token for `user` without going through login.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

pub async fn create_room(pool: &PgPool, created_by: DbId, name: &str) -> Room {
    let input = CreateRoom {
        name: name.to_string(),
        description: "A bright room with a view".to_string(),
        address: "7 Marine Drive, Mumbai".to_string(),
        price_per_night_cents: 10_000,
        guest_capacity: 2,
        num_of_beds: 1,
        internet: true,
        breakfast: true,
        air_conditioned: true,
        pets_allowed: false,
        room_cleaning: true,
        category: "King".to_string(),
    };
    RoomRepo::create(pool, &input, created_by)
        .await
        .expect("room creation should succeed")
}
