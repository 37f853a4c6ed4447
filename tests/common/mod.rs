//! Shared setup for the HTTP integration tests.
#![allow(dead_code, unused_macros)]

use hrms_lite::db::{init_db, init_schema};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied.
///
/// The unique name keeps tests isolated when they run in parallel; a single
/// connection keeps the in-memory database alive for the whole test.
pub async fn setup_test_db() -> SqlitePool {
    let db_url = format!(
        "sqlite:file:test_db_{}?mode=memory&cache=shared",
        Uuid::new_v4().to_simple()
    );
    let pool = init_db(&db_url, 1)
        .await
        .expect("Failed to create SQLite pool");
    init_schema(&pool).await.expect("Failed to create schema");
    pool
}

/// Database file under the temp dir, for tests that need several connections
/// writing and reading at once. Remove it with [`remove_file_db`].
pub async fn setup_file_db(max_connections: u32) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("hrms_test_{}.db", Uuid::new_v4().to_simple()));
    let pool = init_db(&format!("sqlite://{}", path.display()), max_connections)
        .await
        .expect("Failed to create SQLite pool");
    init_schema(&pool).await.expect("Failed to create schema");
    (pool, path)
}

pub async fn remove_file_db(pool: SqlitePool, path: &Path) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

/// Builds the application service over `$pool` with the default `/api` prefix.
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(|cfg| hrms_lite::routes::configure(cfg, "/api")),
        )
        .await
    };
}

/// Sends a `TestRequest` and returns `(status, json body)`; an empty body is `Null`.
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };
        (status, body)
    }};
}
