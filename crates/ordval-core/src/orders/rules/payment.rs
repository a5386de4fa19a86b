//! Payment capture and refund consistency.

use crate::models::config::RuleConfig;
use crate::models::order::{Order, OrderStatus};
use crate::models::report::Problem;

use super::OrderRule;

/// Payment/refund rule.
pub struct PaymentRule {
    tolerance: f64,
}

impl PaymentRule {
    /// Create a rule with the default refund tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: RuleConfig::default().refund_tolerance,
        }
    }

    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            tolerance: config.refund_tolerance,
        }
    }

    /// Set the absolute refund tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for PaymentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRule for PaymentRule {
    fn name(&self) -> &'static str {
        "payment"
    }

    fn check(&self, order: &Order, problems: &mut Vec<Problem>) {
        match order.status {
            Some(OrderStatus::Paid) => {
                if !order.is_captured() {
                    problems.push(Problem::PaymentNotCaptured);
                }
            }
            Some(OrderStatus::Cancelled) if !order.lines().is_empty() => {
                let expected = expected_refund(order);
                let actual = order.refund_amount();
                if (actual - expected).abs() > self.tolerance {
                    problems.push(Problem::RefundMismatch { actual, expected });
                }
            }
            _ => {}
        }
    }
}

/// Refund owed for a cancelled order: sum of qty × price over all lines.
pub fn expected_refund(order: &Order) -> f64 {
    order.lines_total()
}
