use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        employee_id TEXT PRIMARY KEY NOT NULL,
        full_name   TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        department  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id          TEXT PRIMARY KEY NOT NULL,
        employee_id TEXT NOT NULL REFERENCES employees (employee_id),
        date        DATE NOT NULL,
        status      TEXT NOT NULL CHECK (status IN ('Present', 'Absent')),
        CONSTRAINT unique_employee_date UNIQUE (employee_id, date)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)",
];

/// Opens the pool. Foreign keys are switched on for every connection.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates the tables if they are missing. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(statements = SCHEMA.len(), "Schema ready");
    Ok(())
}
