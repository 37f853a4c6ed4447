#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use chrono::Local;
use serde_json::json;

fn new_employee(id: &str, name: &str, email: &str, dept: &str) -> TestRequest {
    TestRequest::post().uri("/api/employees").set_json(json!({
        "employee_id": id,
        "full_name": name,
        "email": email,
        "department": dept,
    }))
}

#[actix_web::test]
async fn health_is_always_healthy() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);

    let (status, body) = call!(app, TestRequest::get().uri("/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn create_returns_employee_with_zero_counts() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);

    let (status, body) = call!(
        app,
        new_employee(" E1 ", "  Alice ", "alice@x.com", "Eng")
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "employee_id": "E1",
            "full_name": "Alice",
            "email": "alice@x.com",
            "department": "Eng",
            "total_present": 0,
            "total_absent": 0,
        })
    );

    let (status, body) = call!(app, TestRequest::get().uri("/api/employees/E1"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["full_name"], "Alice");
}

#[actix_web::test]
async fn duplicate_id_or_email_conflicts() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);

    let (status, _) = call!(app, new_employee("E1", "Alice", "alice@x.com", "Eng"));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(app, new_employee("E1", "Bob", "bob@x.com", "Ops"));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Employee with ID 'E1' already exists");

    let (status, body) = call!(app, new_employee("E2", "Alicia", "alice@x.com", "Ops"));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Employee with email 'alice@x.com' already exists");

    let (_, body) = call!(app, TestRequest::get().uri("/api/employees"));
    assert_eq!(body["total"], 1);
}

#[actix_web::test]
async fn invalid_input_is_rejected_and_not_persisted() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);

    for req in [
        new_employee("   ", "Alice", "alice@x.com", "Eng"),
        new_employee("E1", "", "alice@x.com", "Eng"),
        new_employee("E1", "Alice", "alice@x.com", " \t "),
        new_employee("E1", "Alice", "not-an-email", "Eng"),
        new_employee("E1", "Alice", "alice@", "Eng"),
    ] {
        let (status, body) = call!(app, req);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    // missing field
    let (status, body) = call!(
        app,
        TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({ "employee_id": "E1", "full_name": "Alice" }))
    );
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) = call!(app, TestRequest::get().uri("/api/employees"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "employees": [], "total": 0 }));
}

#[actix_web::test]
async fn unknown_employee_is_not_found() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);

    let (status, body) = call!(app, TestRequest::get().uri("/api/employees/NOPE"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Employee with ID 'NOPE' not found");

    let (status, _) = call!(app, TestRequest::delete().uri("/api/employees/NOPE"));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn counts_follow_marking_and_status_updates() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);
    let day = "2026-01-05";

    call!(app, new_employee("E1", "Alice", "alice@x.com", "Eng"));
    call!(app, new_employee("E2", "Bob", "bob@x.com", "Ops"));

    let (status, marked) = call!(
        app,
        TestRequest::post().uri("/api/attendance").set_json(json!({
            "employee_id": "E1", "date": day, "status": "Present"
        }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call!(app, TestRequest::get().uri("/api/employees"));
    assert_eq!(body["total"], 2);
    assert_eq!(body["employees"][0]["employee_id"], "E1");
    assert_eq!(body["employees"][0]["total_present"], 1);
    assert_eq!(body["employees"][0]["total_absent"], 0);
    assert_eq!(body["employees"][1]["total_present"], 0);

    let (status, _) = call!(
        app,
        TestRequest::post().uri("/api/attendance").set_json(json!({
            "employee_id": "E1", "date": day, "status": "Present"
        }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let id = marked["id"].as_str().unwrap();
    let (status, updated) = call!(
        app,
        TestRequest::put()
            .uri(&format!("/api/attendance/{id}"))
            .set_json(json!({ "status": "Absent" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Absent");

    let (_, body) = call!(app, TestRequest::get().uri("/api/employees/E1"));
    assert_eq!(body["total_present"], 0);
    assert_eq!(body["total_absent"], 1);
}

#[actix_web::test]
async fn delete_cascades_to_attendance() {
    let pool = common::setup_test_db().await;
    let app = test_app!(pool);
    let today = Local::now().date_naive().to_string();

    call!(app, new_employee("E1", "Alice", "alice@x.com", "Eng"));
    call!(app, new_employee("E2", "Bob", "bob@x.com", "Ops"));
    for (id, status) in [("E1", "Present"), ("E2", "Absent")] {
        call!(
            app,
            TestRequest::post().uri("/api/attendance").set_json(json!({
                "employee_id": id, "date": today, "status": status
            }))
        );
    }

    let (status, body) = call!(app, TestRequest::delete().uri("/api/employees/E1"));
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = call!(
        app,
        TestRequest::get().uri("/api/attendance?employee_id=E1")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call!(app, TestRequest::get().uri("/api/attendance"));
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["employee_id"], "E2");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE employee_id = 'E1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    // the id and email are free again
    let (status, _) = call!(app, new_employee("E1", "Alice", "alice@x.com", "Eng"));
    assert_eq!(status, StatusCode::CREATED);
}
