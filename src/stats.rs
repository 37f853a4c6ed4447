//! Attendance aggregation: per-employee counts, dashboard figures and the
//! rolling 7-day trend.
//!
//! Every figure comes from a grouped query whose rows are folded in memory, so
//! the number of store round trips does not grow with the number of employees
//! or days.

use crate::{error::AppResult, model::attendance::AttendanceStatus, store};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Number of calendar days in the trend, today included.
pub const TREND_DAYS: u64 = 7;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
}

impl AttendanceCounts {
    fn add(&mut self, status: AttendanceStatus, count: i64) {
        match status {
            AttendanceStatus::Present => self.present += count,
            AttendanceStatus::Absent => self.absent += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.present + self.absent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendance {
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = 8)]
    pub present: i64,
    #[schema(example = 2)]
    pub absent: i64,
    #[schema(example = 80.0)]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 12)]
    pub total_employees: i64,
    #[schema(example = 3)]
    pub total_departments: i64,
    #[schema(example = 8)]
    pub todays_present: i64,
    #[schema(example = 2)]
    pub todays_absent: i64,
    #[schema(example = 2)]
    pub todays_unmarked: i64,
    #[schema(example = 86.4)]
    pub attendance_rate: f64,
    pub recent_trend: Vec<DailyAttendance>,
}

/// Rounds half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `present / total * 100` to one decimal, `0` when there is nothing to divide.
pub fn attendance_rate(present: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round1(present as f64 / total as f64 * 100.0)
}

/// First day of the trend window ending on `today`.
pub fn trend_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(TREND_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

pub fn fold_employee_counts<I>(rows: I) -> HashMap<String, AttendanceCounts>
where
    I: IntoIterator<Item = (String, AttendanceStatus, i64)>,
{
    let mut counts: HashMap<String, AttendanceCounts> = HashMap::new();
    for (employee_id, status, count) in rows {
        counts.entry(employee_id).or_default().add(status, count);
    }
    counts
}

/// One entry per day of the window ending on `today`, oldest first. Days with
/// no rows get zero counts and a zero rate; rows outside the window are ignored.
pub fn fold_trend<I>(today: NaiveDate, rows: I) -> Vec<DailyAttendance>
where
    I: IntoIterator<Item = (NaiveDate, AttendanceStatus, i64)>,
{
    let mut by_day: HashMap<NaiveDate, AttendanceCounts> = HashMap::new();
    for (date, status, count) in rows {
        by_day.entry(date).or_default().add(status, count);
    }

    trend_start(today)
        .iter_days()
        .take(TREND_DAYS as usize)
        .map(|date| {
            let counts = by_day.get(&date).copied().unwrap_or_default();
            DailyAttendance {
                date,
                present: counts.present,
                absent: counts.absent,
                rate: attendance_rate(counts.present, counts.total()),
            }
        })
        .collect()
}

/// Present/absent counts keyed by employee id. Pass `Some(id)` to restrict the
/// grouped query to a single employee.
pub async fn employee_counts(
    pool: &SqlitePool,
    employee_id: Option<&str>,
) -> AppResult<HashMap<String, AttendanceCounts>> {
    let rows = store::attendance::counts_by_employee(pool, employee_id).await?;
    Ok(fold_employee_counts(rows))
}

/// Dashboard figures for `today`. The three grouped reads share one
/// transaction so totals and today's counts come from the same snapshot.
pub async fn dashboard(pool: &SqlitePool, today: NaiveDate) -> AppResult<DashboardStats> {
    let mut tx = pool.begin().await?;

    let (total_employees, total_departments) = store::employee::totals(&mut *tx).await?;

    let mut overall = AttendanceCounts::default();
    for (status, count) in store::attendance::counts_by_status(&mut *tx).await? {
        overall.add(status, count);
    }

    let window = store::attendance::counts_by_date(&mut *tx, trend_start(today), today).await?;
    tx.commit().await?;

    let recent_trend = fold_trend(today, window);

    // the window always ends on today
    let (todays_present, todays_absent) = recent_trend
        .last()
        .map(|day| (day.present, day.absent))
        .unwrap_or_default();

    let todays_unmarked = total_employees - (todays_present + todays_absent);
    if todays_unmarked < 0 {
        tracing::warn!(
            total_employees,
            todays_present,
            todays_absent,
            "More attendance records today than employees"
        );
    }

    Ok(DashboardStats {
        total_employees,
        total_departments,
        todays_present,
        todays_absent,
        todays_unmarked,
        attendance_rate: attendance_rate(overall.present, overall.total()),
        recent_trend,
    })
}
