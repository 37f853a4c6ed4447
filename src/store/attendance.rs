use crate::{
    error::AppResult,
    model::attendance::{Attendance, AttendanceStatus, AttendanceWithName},
};
use chrono::NaiveDate;
use sqlx::{Executor, Sqlite};

const SELECT_WITH_NAME: &str = r#"
    SELECT a.id, a.employee_id, a.date, a.status, e.full_name AS employee_name
    FROM attendance a
    LEFT JOIN employees e ON e.employee_id = a.employee_id
"#;

/// Optional filters for listing attendance. Date bounds are inclusive.
#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// Helper enum for typed binding of the dynamic WHERE clause
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

pub async fn insert<'e, E>(db: E, record: &Attendance) -> AppResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO attendance (id, employee_id, date, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.employee_id)
    .bind(record.date)
    .bind(record.status)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_by_id<'e, E>(db: E, id: &str) -> AppResult<Option<AttendanceWithName>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SELECT_WITH_NAME} WHERE a.id = ?");
    let record = sqlx::query_as::<_, AttendanceWithName>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(record)
}

pub async fn find_for_day<'e, E>(
    db: E,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<Option<Attendance>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let record = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        WHERE employee_id = ? AND date = ?
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(record)
}

/// Newest first; ties on the same date are ordered by employee id.
pub async fn list<'e, E>(db: E, filter: &AttendanceFilter) -> AppResult<Vec<AttendanceWithName>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if let Some(employee_id) = &filter.employee_id {
        conditions.push("a.employee_id = ?");
        bindings.push(FilterValue::Str(employee_id));
    }
    if let Some(start) = filter.start_date {
        conditions.push("a.date >= ?");
        bindings.push(FilterValue::Date(start));
    }
    if let Some(end) = filter.end_date {
        conditions.push("a.date <= ?");
        bindings.push(FilterValue::Date(end));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let sql = format!("{SELECT_WITH_NAME} {where_clause} ORDER BY a.date DESC, a.employee_id");
    tracing::debug!(sql = %sql, ?filter, "Listing attendance");

    let mut query = sqlx::query_as::<_, AttendanceWithName>(&sql);
    for value in bindings {
        query = match value {
            FilterValue::Str(v) => query.bind(v),
            FilterValue::Date(v) => query.bind(v),
        };
    }

    Ok(query.fetch_all(db).await?)
}

/// Returns `false` when no record has that id.
pub async fn update_status<'e, E>(db: E, id: &str, status: AttendanceStatus) -> AppResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let affected = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(affected > 0)
}

/// Grouped `(employee_id, status, count)` rows, optionally for one employee.
pub async fn counts_by_employee<'e, E>(
    db: E,
    employee_id: Option<&str>,
) -> AppResult<Vec<(String, AttendanceStatus, i64)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, (String, AttendanceStatus, i64)>(
        r#"
        SELECT employee_id, status, COUNT(*)
        FROM attendance
        WHERE ?1 IS NULL OR employee_id = ?1
        GROUP BY employee_id, status
        "#,
    )
    .bind(employee_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Grouped `(date, status, count)` rows for `start..=end`.
pub async fn counts_by_date<'e, E>(
    db: E,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<(NaiveDate, AttendanceStatus, i64)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, (NaiveDate, AttendanceStatus, i64)>(
        r#"
        SELECT date, status, COUNT(*)
        FROM attendance
        WHERE date BETWEEN ? AND ?
        GROUP BY date, status
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Grouped `(status, count)` rows over every record.
pub async fn counts_by_status<'e, E>(db: E) -> AppResult<Vec<(AttendanceStatus, i64)>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, (AttendanceStatus, i64)>(
        "SELECT status, COUNT(*) FROM attendance GROUP BY status",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}
