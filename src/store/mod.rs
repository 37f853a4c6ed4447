//! Persistence for employees and attendance records.
//!
//! Functions take any SQLite executor, so the same call works against the
//! pool or inside a transaction.

pub mod attendance;
pub mod employee;
