//! Data models: orders, reports, and configuration.

pub mod config;
pub mod order;
pub mod report;
