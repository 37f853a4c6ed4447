//! HRMS Lite: employee records, daily attendance and dashboard statistics
//! served over HTTP/JSON.

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod stats;
pub mod store;
pub mod validation;
