use crate::{error::AppResult, model::employee::Employee};
use sqlx::{Executor, Sqlite, SqlitePool};

pub async fn insert<'e, E>(db: E, employee: &Employee) -> AppResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&employee.employee_id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_by_id<'e, E>(db: E, employee_id: &str) -> AppResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT employee_id, full_name, email, department
        FROM employees
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(db)
    .await?;
    Ok(employee)
}

pub async fn find_by_email<'e, E>(db: E, email: &str) -> AppResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT employee_id, full_name, email, department
        FROM employees
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(employee)
}

pub async fn list_all<'e, E>(db: E) -> AppResult<Vec<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT employee_id, full_name, email, department
        FROM employees
        ORDER BY employee_id
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(employees)
}

/// Deletes the employee and every attendance row they own in one transaction.
/// Returns `false` (and changes nothing) when the id is unknown.
pub async fn delete_cascade(pool: &SqlitePool, employee_id: &str) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    let removed_attendance = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let removed = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    tracing::debug!(employee_id, removed_attendance, "Employee deleted");
    Ok(true)
}

/// `(total_employees, total_departments)`
pub async fn totals<'e, E>(db: E) -> AppResult<(i64, i64)>
where
    E: Executor<'e, Database = Sqlite>,
{
    let totals = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COUNT(DISTINCT department) FROM employees",
    )
    .fetch_one(db)
    .await?;
    Ok(totals)
}
