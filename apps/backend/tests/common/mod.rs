#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use backend::state::app_state::AppState;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Fresh in-memory SQLite database migrated with the real migrator.
///
/// The pool is pinned to a single connection so every query sees the same
/// in-memory database; a second pooled connection would get its own empty
/// one.
pub async fn test_state() -> AppState {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);

    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    AppState::new(db)
}

/// Read and parse a JSON response body.
pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body should be valid JSON")
}

/// Today's date as the API serializes it (ISO `yyyy-mm-dd`).
pub fn today_iso() -> String {
    time::OffsetDateTime::now_utc().date().to_string()
}
