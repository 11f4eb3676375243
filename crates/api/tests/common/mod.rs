//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL database named by
//! `TEST_DATABASE_URL`. When the variable is unset every test returns early.

// Not every test file uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::models::parking::CreateParkingRequest;
use domain::models::user_parking::UserParkingKey;
use domain::models::UserRole;
use fake::{faker::internet::en::Username, Fake};
use parking_api::{app::create_app, config::Config};
use persistence::repositories::{AppUserRepository, ParkingRepository, UserParkingRepository};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-of-sufficient-length";
pub const TEST_PASSWORD: &str = "Lot-Admin-P@ss-2024";

/// Pool plus router for one test.
pub struct TestContext {
    pub pool: PgPool,
    pub app: Router,
}

/// Connects and migrates, or `None` when no test database is configured.
pub async fn test_context() -> Option<TestContext> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("TEST_DATABASE_URL not set; skipping");
            return None;
        }
    };

    let config = test_config(&url);
    let pool = persistence::db::create_pool(&config.database.pool_config())
        .await
        .expect("Failed to connect to test database");
    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let app = create_app(config, pool.clone()).expect("Failed to build router");
    Some(TestContext { pool, app })
}

pub fn test_config(database_url: &str) -> Config {
    Config::load_for_test(&[
        ("database.url", database_url),
        ("jwt.secret", TEST_JWT_SECRET),
    ])
    .expect("Failed to build test config")
}

/// A username no other test run will pick.
pub fn unique_username() -> String {
    let base: String = Username().fake();
    format!("{}_{}", base, uuid::Uuid::new_v4().simple())
}

/// An account created straight through the repository.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}

pub async fn create_user(pool: &PgPool, role: UserRole, is_active: bool) -> TestUser {
    let username = unique_username();
    let hash = shared::password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    let entity = AppUserRepository::new(pool.clone())
        .create(&username, &hash, role, is_active)
        .await
        .expect("Failed to create user");

    TestUser {
        id: entity.id,
        username,
        password: TEST_PASSWORD.to_string(),
    }
}

pub async fn create_parking(pool: &PgPool, is_active: bool) -> i64 {
    ParkingRepository::new(pool.clone())
        .create(&CreateParkingRequest {
            name: format!("Lot {}", uuid::Uuid::new_v4().simple()),
            address: "12 Harbour Road".to_string(),
            total_spots: 10,
            latitude: Some(59.33),
            longitude: Some(18.06),
            is_active,
        })
        .await
        .expect("Failed to create parking")
        .id
}

pub async fn grant(pool: &PgPool, user_id: i64, parking_id: i64) {
    UserParkingRepository::new(pool.clone())
        .create(UserParkingKey { user_id, parking_id })
        .await
        .expect("Failed to link user to parking");
}

/// Logs in through the API and returns the bearer token.
pub async fn login(app: &Router, user: &TestUser) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": user.username, "password": user.password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    body["data"]["token"]
        .as_str()
        .expect("token missing from login response")
        .to_string()
}

pub async fn service_admin_token(ctx: &TestContext) -> String {
    let admin = create_user(&ctx.pool, UserRole::ServiceAdmin, true).await;
    login(&ctx.app, &admin).await
}

/// Sends one request and returns the status with the parsed body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Ids from a `{"status":"success","data":[...]}` list body.
pub fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect()
}
