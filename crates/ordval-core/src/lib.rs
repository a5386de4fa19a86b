//! Core library for order document validation.
//!
//! This crate provides:
//! - Order extraction from a `{ "orders": [...] }` document
//! - Business rules (identity, line integrity, email, payment/refund, shipping)
//! - Summary building with per-order problem reports

pub mod error;
pub mod models;
pub mod orders;

pub use error::{ExtractionError, OrdvalError, Result};
pub use models::config::{FeePolicy, OrdvalConfig, OutputConfig, RuleConfig};
pub use models::order::{Customer, Line, Order, OrderId, OrderStatus, Payment, Refund, Shipping};
pub use models::report::{OrderReport, Problem, Summary};
pub use orders::rules::{distinct_ids, SeenIds};
pub use orders::{
    count_lines, extract_lines, extract_orders, parse_document, summarize, validate_document,
    validate_str, Summarizer,
};
