//! Domain aggregates exposed by the salon service layer.

pub mod appointment;
pub mod client;
pub mod dashboard;
pub mod search;
pub mod service;
pub mod types;
