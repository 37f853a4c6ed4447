use actix_web::{Responder, get, web};
use serde_json::json;

/// Liveness check; never touches the database
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "healthy"
        }))
    ),
    tag = "Health"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    web::Json(json!({ "status": "healthy" }))
}
