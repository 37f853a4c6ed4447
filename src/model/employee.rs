#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}
