//! HTTP handlers. Shared page helpers come from `pushkind_common::routes`.

pub mod api;
pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod main;
