use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

/// Daily attendance outcome. Stored and serialized as `Present` / `Absent`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    ToSchema,
    sqlx::Type,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Attendance {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Attendance row joined with the owning employee's name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceWithName {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub employee_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_displays_its_name() {
        assert_eq!(AttendanceStatus::Present.to_string(), "Present");
        assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
    }

    #[test]
    fn status_json_uses_exact_names() {
        let json = serde_json::to_string(&AttendanceStatus::Present).unwrap();
        assert_eq!(json, "\"Present\"");
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"Absent\"").unwrap(),
            AttendanceStatus::Absent
        );
        assert!(serde_json::from_str::<AttendanceStatus>("\"present\"").is_err());
        assert!(serde_json::from_str::<AttendanceStatus>("\"Late\"").is_err());
    }
}
