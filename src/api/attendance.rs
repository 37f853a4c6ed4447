use crate::{
    api::employee::employee_not_found,
    error::{AppError, AppResult, ErrorResponse},
    model::attendance::{Attendance, AttendanceStatus, AttendanceWithName},
    store::{self, attendance::AttendanceFilter},
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "E001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

/// Only `status` is applied; the other create fields may be sent and are ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "Absent")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Filter by employee ID
    #[param(example = "E001")]
    pub employee_id: Option<String>,
    /// Earliest date, inclusive
    #[param(example = "2026-01-01", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive
    #[param(example = "2026-01-31", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "4f6f6bb4-6c1b-4d8e-9d59-0b1f0e7f2a10",
    "employee_id": "E001",
    "date": "2026-01-01",
    "status": "Present",
    "employee_name": "Alice Smith"
}))]
pub struct AttendanceResponse {
    pub id: String,
    pub employee_id: String,
    #[schema(format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    /// `null` once the employee no longer exists
    pub employee_name: Option<String>,
}

impl From<AttendanceWithName> for AttendanceResponse {
    fn from(row: AttendanceWithName) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: row.status,
            employee_name: row.employee_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceResponse>,
    #[schema(example = 3)]
    pub total: usize,
    #[schema(example = 2)]
    pub total_present: usize,
    #[schema(example = 1)]
    pub total_absent: usize,
}

/// List attendance records, newest first
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Filtered attendance records", body = AttendanceListResponse),
        (status = 404, description = "Employee filter names an unknown employee", body = ErrorResponse),
        (status = 422, description = "Malformed date", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let employee_id = query.employee_id.filter(|id| !id.is_empty());

    if let Some(id) = &employee_id {
        if store::employee::find_by_id(pool.get_ref(), id).await?.is_none() {
            return Err(employee_not_found(id));
        }
    }

    let filter = AttendanceFilter {
        employee_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let records = store::attendance::list(pool.get_ref(), &filter).await?;

    let total_present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let total = records.len();
    debug!(total, total_present, "Attendance listed");

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        total,
        total_present,
        total_absent: total - total_present,
        records: records.into_iter().map(AttendanceResponse::from).collect(),
    }))
}

/// Mark attendance for one employee and day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 409, description = "Attendance already marked for that day", body = ErrorResponse, example = json!({
            "detail": "Attendance for employee 'E001' on 2026-01-01 is already marked"
        })),
        (status = 422, description = "Malformed body", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "mark_attendance",
    skip(pool, payload),
    fields(employee_id = %payload.employee_id, date = %payload.date)
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateAttendance>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();

    let employee = store::employee::find_by_id(pool.get_ref(), &payload.employee_id)
        .await?
        .ok_or_else(|| employee_not_found(&payload.employee_id))?;

    if store::attendance::find_for_day(pool.get_ref(), &payload.employee_id, payload.date)
        .await?
        .is_some()
    {
        info!("Attendance already marked");
        return Err(already_marked(&payload.employee_id, payload.date));
    }

    let record = Attendance {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id,
        date: payload.date,
        status: payload.status,
    };

    store::attendance::insert(pool.get_ref(), &record)
        .await
        .map_err(|e| insert_failure(e, &record))?;
    info!(id = %record.id, status = %record.status, "Attendance marked");

    Ok(HttpResponse::Created().json(AttendanceResponse {
        id: record.id,
        employee_id: record.employee_id,
        date: record.date,
        status: record.status,
        employee_name: Some(employee.full_name),
    }))
}

/// Change the status of an attendance record
#[utoipa::path(
    put,
    path = "/api/attendance/{attendance_id}",
    params(
        ("attendance_id", Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceResponse),
        (status = 404, description = "Attendance record not found", body = ErrorResponse),
        (status = 422, description = "Malformed body", body = ErrorResponse)
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendance>,
) -> AppResult<HttpResponse> {
    let attendance_id = path.into_inner();

    if !store::attendance::update_status(pool.get_ref(), &attendance_id, payload.status).await? {
        return Err(attendance_not_found(&attendance_id));
    }

    let record = store::attendance::find_by_id(pool.get_ref(), &attendance_id)
        .await?
        .ok_or_else(|| attendance_not_found(&attendance_id))?;
    info!(id = %attendance_id, status = %record.status, "Attendance updated");

    Ok(HttpResponse::Ok().json(AttendanceResponse::from(record)))
}

/// Rewrites the constraint errors of a racing insert into the messages the
/// checked path returns.
fn insert_failure(err: AppError, record: &Attendance) -> AppError {
    match err {
        AppError::Conflict(_) => already_marked(&record.employee_id, record.date),
        AppError::NotFound(_) => employee_not_found(&record.employee_id),
        other => other,
    }
}

fn already_marked(employee_id: &str, date: NaiveDate) -> AppError {
    AppError::conflict(format!(
        "Attendance for employee '{employee_id}' on {date} is already marked"
    ))
}

fn attendance_not_found(attendance_id: &str) -> AppError {
    AppError::not_found(format!(
        "Attendance record with ID '{attendance_id}' not found"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Attendance {
        Attendance {
            id: "a1".into(),
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn insert_conflict_names_employee_and_day() {
        let err = insert_failure(AppError::conflict("Record already exists"), &record());
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Attendance for employee 'E1' on 2026-02-10 is already marked"
        );
    }

    #[test]
    fn insert_missing_employee_names_the_id() {
        let err = insert_failure(
            AppError::not_found("Referenced employee not found"),
            &record(),
        );
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Employee with ID 'E1' not found");
    }

    #[test]
    fn other_insert_errors_pass_through() {
        let err = insert_failure(AppError::Database(sqlx::Error::PoolTimedOut), &record());
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolTimedOut)));
    }
}
