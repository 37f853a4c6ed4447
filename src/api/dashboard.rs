use crate::{
    error::{AppResult, ErrorResponse},
    stats::{self, DashboardStats},
};
use actix_web::{HttpResponse, web};
use chrono::Local;
use sqlx::SqlitePool;

/// Organisation-wide attendance figures for today plus the last 7 days
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(pool: web::Data<SqlitePool>) -> AppResult<HttpResponse> {
    let today = Local::now().date_naive();
    let stats = stats::dashboard(pool.get_ref(), today).await?;
    Ok(HttpResponse::Ok().json(stats))
}
