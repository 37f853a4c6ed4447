use crate::{
    error::{AppError, AppResult, ErrorResponse},
    model::employee::Employee,
    stats::{self, AttendanceCounts},
    store,
    validation::{require_non_empty, validate_email},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E001", value_type = String)]
    pub employee_id: String,
    #[schema(example = "Alice Smith", value_type = String)]
    pub full_name: String,
    #[schema(example = "alice@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl CreateEmployee {
    /// Trims the text fields and checks the email, without touching the store.
    pub fn validate(&self) -> AppResult<Employee> {
        Ok(Employee {
            employee_id: require_non_empty("employee_id", &self.employee_id)
                .map_err(AppError::Validation)?,
            full_name: require_non_empty("full_name", &self.full_name)
                .map_err(AppError::Validation)?,
            email: validate_email(&self.email).map_err(|e| AppError::validation(e.to_string()))?,
            department: require_non_empty("department", &self.department)
                .map_err(AppError::Validation)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "E001",
        "full_name": "Alice Smith",
        "email": "alice@company.com",
        "department": "Engineering",
        "total_present": 18,
        "total_absent": 2
    })
)]
pub struct EmployeeResponse {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub total_present: i64,
    pub total_absent: i64,
}

impl EmployeeResponse {
    fn new(employee: Employee, counts: AttendanceCounts) -> Self {
        Self {
            employee_id: employee.employee_id,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            total_present: counts.present,
            total_absent: counts.absent,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeResponse>,
    #[schema(example = 1)]
    pub total: usize,
}

/// List employees with their attendance totals
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = EmployeeListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> AppResult<HttpResponse> {
    let employees = store::employee::list_all(pool.get_ref()).await?;
    let counts = stats::employee_counts(pool.get_ref(), None).await?;

    let employees: Vec<EmployeeResponse> = employees
        .into_iter()
        .map(|emp| {
            let c = counts.get(&emp.employee_id).copied().unwrap_or_default();
            EmployeeResponse::new(emp, c)
        })
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: employees.len(),
        employees,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse, example = json!({
            "detail": "Employee with ID 'E001' not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();

    let employee = store::employee::find_by_id(pool.get_ref(), &employee_id)
        .await?
        .ok_or_else(|| employee_not_found(&employee_id))?;

    let counts = stats::employee_counts(pool.get_ref(), Some(employee_id.as_str())).await?;
    let c = counts.get(&employee_id).copied().unwrap_or_default();

    Ok(HttpResponse::Ok().json(EmployeeResponse::new(employee, c)))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 409, description = "Duplicate employee id or email", body = ErrorResponse, example = json!({
            "detail": "Employee with ID 'E001' already exists"
        })),
        (status = 422, description = "Empty field or malformed email", body = ErrorResponse, example = json!({
            "detail": "full_name cannot be empty"
        }))
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(pool, payload), fields(employee_id = %payload.employee_id))]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> AppResult<HttpResponse> {
    let employee = payload.validate()?;

    if let Some(err) = duplicate_of(pool.get_ref(), &employee).await? {
        return Err(err);
    }

    // an insert racing past the check still hits the unique constraints
    if let Err(err) = store::employee::insert(pool.get_ref(), &employee).await {
        return Err(match err {
            AppError::Conflict(_) => duplicate_of(pool.get_ref(), &employee)
                .await?
                .unwrap_or_else(|| duplicate_id(&employee.employee_id)),
            other => other,
        });
    }
    info!("Employee created");

    let created = EmployeeResponse::new(employee, AttendanceCounts::default());
    Ok(HttpResponse::Created().json(created))
}

/// Delete Employee and their attendance
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee and attendance deleted"),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();

    if !store::employee::delete_cascade(pool.get_ref(), &employee_id).await? {
        return Err(employee_not_found(&employee_id));
    }

    info!(employee_id = %employee_id, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// The 409 to return when `employee` clashes with a stored id or email, id first.
pub async fn duplicate_of(pool: &SqlitePool, employee: &Employee) -> AppResult<Option<AppError>> {
    if store::employee::find_by_id(pool, &employee.employee_id)
        .await?
        .is_some()
    {
        info!("Duplicate employee id");
        return Ok(Some(duplicate_id(&employee.employee_id)));
    }

    if store::employee::find_by_email(pool, &employee.email)
        .await?
        .is_some()
    {
        info!(email = %employee.email, "Duplicate employee email");
        return Ok(Some(AppError::conflict(format!(
            "Employee with email '{}' already exists",
            employee.email
        ))));
    }

    Ok(None)
}

fn duplicate_id(employee_id: &str) -> AppError {
    AppError::conflict(format!("Employee with ID '{employee_id}' already exists"))
}

pub(crate) fn employee_not_found(employee_id: &str) -> AppError {
    AppError::not_found(format!("Employee with ID '{employee_id}' not found"))
}
