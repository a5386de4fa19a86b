//! Rule engine driver and summary aggregation.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::models::config::RuleConfig;
use crate::models::order::Order;
use crate::models::report::{OrderReport, Problem, Summary};

use super::extractor::extract_lines;
use super::rules::{check_identity, standard_rules, OrderRule, SeenIds};

/// Applies every rule to each order and aggregates the results.
pub struct Summarizer {
    rules: Vec<Box<dyn OrderRule + Send + Sync>>,
}

impl Summarizer {
    /// Create a summarizer with the default rule configuration.
    pub fn new() -> Self {
        Self::with_config(&RuleConfig::default())
    }

    /// Create a summarizer from a rule configuration.
    pub fn with_config(config: &RuleConfig) -> Self {
        Self {
            rules: standard_rules(config),
        }
    }

    /// Run all rules on one order.
    ///
    /// Problems are ordered identity, lines, email, payment/refund, shipping.
    pub fn check_order(&self, order: &Order, seen: &mut SeenIds) -> Vec<Problem> {
        let mut problems = Vec::new();

        check_identity(order, seen, &mut problems);
        for rule in &self.rules {
            let before = problems.len();
            rule.check(order, &mut problems);
            if problems.len() > before {
                trace!("Rule '{}' reported {} problems", rule.name(), problems.len() - before);
            }
        }

        problems
    }

    /// Validate all orders in document order and build the summary.
    pub fn summarize(&self, orders: &[Order]) -> Summary {
        let start = Instant::now();
        let mut seen = SeenIds::new();
        let mut summary = Summary {
            total_orders: orders.len(),
            ..Default::default()
        };

        for order in orders {
            summary.total_line_items += extract_lines(order).len();

            let problems = self.check_order(order, &mut seen);
            if problems.is_empty() {
                continue;
            }

            debug!(
                "Order {} has {} problems",
                order.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "<none>".to_string()),
                problems.len()
            );

            summary.invalid_orders_count += 1;
            summary.problematic_orders.push(OrderReport {
                id: order.id.clone(),
                reasons: problems,
            });
        }

        info!(
            "Validated {} orders ({} line items): {} invalid in {:?}",
            summary.total_orders,
            summary.total_line_items,
            summary.invalid_orders_count,
            start.elapsed()
        );

        summary
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarize orders with the given rule configuration.
pub fn summarize(orders: &[Order], config: &RuleConfig) -> Summary {
    Summarizer::with_config(config).summarize(orders)
}
