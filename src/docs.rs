use crate::api::attendance::{
    AttendanceListResponse, AttendanceResponse, CreateAttendance, UpdateAttendance,
};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeResponse};
use crate::error::ErrorResponse;
use crate::model::attendance::AttendanceStatus;
use crate::stats::{DailyAttendance, DashboardStats};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management API.

### Key Features
- **Employee Management**
  - Create, list, view and delete employees, each with attendance totals
- **Attendance Management**
  - Mark daily Present/Absent status, correct it, and filter the history
- **Dashboard**
  - Today's figures, the overall attendance rate and a 7-day trend

### Response Format
- JSON bodies; every error is `{"detail": "..."}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::mark_attendance,
        crate::api::attendance::update_attendance,

        crate::api::dashboard::get_dashboard
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeResponse,
            EmployeeListResponse,
            AttendanceStatus,
            CreateAttendance,
            UpdateAttendance,
            AttendanceResponse,
            AttendanceListResponse,
            DailyAttendance,
            DashboardStats,
            ErrorResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Aggregated attendance statistics"),
    )
)]
pub struct ApiDoc;
