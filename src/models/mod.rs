//! Database models shared across the salon repository.

pub mod appointment;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod service;
