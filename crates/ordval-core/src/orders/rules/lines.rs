//! Line item integrity for orders awaiting or holding payment.

use crate::models::config::RuleConfig;
use crate::models::order::{Order, OrderStatus};
use crate::models::report::Problem;

use super::OrderRule;

/// Price assumed for a line without one, so a missing price is reported.
const MISSING_PRICE: f64 = -1.0;

/// Line integrity rule.
pub struct LineIntegrityRule {
    statuses: Vec<OrderStatus>,
    flag_missing_sku: bool,
}

impl LineIntegrityRule {
    /// Create a rule checking PAID and PENDING orders.
    pub fn new() -> Self {
        Self {
            statuses: vec![OrderStatus::Paid, OrderStatus::Pending],
            flag_missing_sku: false,
        }
    }

    pub fn from_config(config: &RuleConfig) -> Self {
        Self {
            statuses: config.line_checked_statuses.clone(),
            flag_missing_sku: config.flag_missing_sku,
        }
    }

    /// Set whether lines without a SKU are reported.
    pub fn with_missing_sku(mut self, flag: bool) -> Self {
        self.flag_missing_sku = flag;
        self
    }

    fn applies_to(&self, order: &Order) -> bool {
        order
            .status
            .as_ref()
            .is_some_and(|s| self.statuses.contains(s))
    }
}

impl Default for LineIntegrityRule {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRule for LineIntegrityRule {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn check(&self, order: &Order, problems: &mut Vec<Problem>) {
        if !self.applies_to(order) {
            return;
        }

        let lines = order.lines();
        if lines.is_empty() {
            problems.push(Problem::EmptyLines);
            return;
        }

        for (idx, line) in lines.iter().enumerate() {
            let position = idx + 1;

            // Lines without a SKU are exempt from qty/price checks
            if line.sku().is_none() {
                if self.flag_missing_sku {
                    problems.push(Problem::MissingSku { line: position });
                }
                continue;
            }

            let qty = line.qty.unwrap_or(0.0);
            if qty <= 0.0 {
                problems.push(Problem::QtyNotPositive { line: position, qty });
            }

            let price = line.price.unwrap_or(MISSING_PRICE);
            if price < 0.0 {
                problems.push(Problem::PriceNegative { line: position, price });
            }
        }
    }
}
