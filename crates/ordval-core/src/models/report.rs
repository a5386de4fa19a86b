//! Validation problems and the aggregated summary report.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::order::OrderId;

/// One violated rule instance, scoped to an order.
///
/// Line positions are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Identifier absent, empty, or not a string.
    MissingId,
    /// Identifier already used by an earlier order.
    DuplicateId(String),
    /// PAID/PENDING order without line items.
    EmptyLines,
    /// Line without a SKU (only reported when enabled).
    MissingSku { line: usize },
    /// Line quantity is zero, negative, or missing.
    QtyNotPositive { line: usize, qty: f64 },
    /// Line price is negative or missing.
    PriceNegative { line: usize, price: f64 },
    /// Customer email absent.
    MissingEmail,
    /// Customer email does not look like an address.
    InvalidEmail(String),
    /// PAID order whose payment was not captured.
    PaymentNotCaptured,
    /// Refund of a cancelled order differs from the line total.
    RefundMismatch { actual: f64, expected: f64 },
    /// Shipping fee absent (only reported when required).
    MissingShippingFee,
    /// Shipping fee violates the configured sign policy.
    InvalidShippingFee(f64),
}

impl Problem {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Problem::MissingId => "missing_id",
            Problem::DuplicateId(_) => "duplicate_id",
            Problem::EmptyLines => "empty_lines",
            Problem::MissingSku { .. } => "missing_sku",
            Problem::QtyNotPositive { .. } => "qty_not_positive",
            Problem::PriceNegative { .. } => "price_negative",
            Problem::MissingEmail => "missing_email",
            Problem::InvalidEmail(_) => "invalid_email",
            Problem::PaymentNotCaptured => "payment_not_captured",
            Problem::RefundMismatch { .. } => "refund_mismatch",
            Problem::MissingShippingFee => "missing_shipping_fee",
            Problem::InvalidShippingFee(_) => "invalid_shipping_fee",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::MissingId => write!(f, "missing/invalid id"),
            Problem::DuplicateId(id) => write!(f, "duplicate id '{}'", id),
            Problem::EmptyLines => write!(f, "empty lines"),
            Problem::MissingSku { line } => write!(f, "line {} missing sku", line),
            Problem::QtyNotPositive { line, qty } => {
                write!(f, "line {} qty not positive ({})", line, qty)
            }
            Problem::PriceNegative { line, price } => {
                write!(f, "line {} price negative ({})", line, price)
            }
            Problem::MissingEmail => write!(f, "missing email"),
            Problem::InvalidEmail(email) => write!(f, "invalid email '{}'", email),
            Problem::PaymentNotCaptured => write!(f, "payment not captured"),
            Problem::RefundMismatch { actual, expected } => {
                write!(f, "refund mismatch, got {} expected {}", actual, expected)
            }
            Problem::MissingShippingFee => write!(f, "missing shipping fee"),
            Problem::InvalidShippingFee(fee) => write!(f, "invalid shipping fee {}", fee),
        }
    }
}

impl Serialize for Problem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Problems found for one invalid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReport {
    /// Order identifier, `None` when absent or null.
    pub id: Option<OrderId>,
    /// Problems in rule order.
    pub reasons: Vec<Problem>,
}

/// Aggregated validation report across all orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Number of orders in the document.
    pub total_orders: usize,
    /// Number of line items across all orders.
    pub total_line_items: usize,
    /// Number of orders with at least one problem.
    pub invalid_orders_count: usize,
    /// Invalid orders in document order.
    pub problematic_orders: Vec<OrderReport>,
}

impl Summary {
    /// True when no order has a problem.
    pub fn is_clean(&self) -> bool {
        self.invalid_orders_count == 0
    }

    /// Problems reported for the first invalid order with this identifier.
    pub fn reasons_for(&self, id: &str) -> Option<&[Problem]> {
        self.problematic_orders
            .iter()
            .find(|r| r.id.as_ref().is_some_and(|i| i.as_valid() == Some(id)))
            .map(|r| r.reasons.as_slice())
    }

    /// Number of problems per problem code.
    pub fn problem_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for problem in self.problematic_orders.iter().flat_map(|r| &r.reasons) {
            *counts.entry(problem.code()).or_insert(0) += 1;
        }
        counts
    }
}
