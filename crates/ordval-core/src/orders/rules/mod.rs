//! Business rules applied to each order.
//!
//! Rules are independent of each other. Only the identity rule carries state
//! between orders, held in an explicit [`SeenIds`] accumulator.

pub mod identity;
pub mod lines;
pub mod email;
pub mod payment;
pub mod shipping;
pub mod patterns;

pub use identity::{check_identity, distinct_ids, SeenIds};
pub use lines::LineIntegrityRule;
pub use email::{validate_email, EmailRule};
pub use payment::{expected_refund, PaymentRule};
pub use shipping::ShippingRule;

use crate::models::config::RuleConfig;
use crate::models::order::Order;
use crate::models::report::Problem;

/// Trait for stateless order rules.
pub trait OrderRule {
    /// Short rule name used in logs.
    fn name(&self) -> &'static str;

    /// Append every problem found in `order`.
    fn check(&self, order: &Order, problems: &mut Vec<Problem>);
}

/// The stateless rules in reporting order: lines, email, payment/refund, shipping.
pub fn standard_rules(config: &RuleConfig) -> Vec<Box<dyn OrderRule + Send + Sync>> {
    let mut rules: Vec<Box<dyn OrderRule + Send + Sync>> = Vec::with_capacity(4);
    rules.push(Box::new(LineIntegrityRule::from_config(config)));
    rules.push(Box::new(EmailRule::new()));
    rules.push(Box::new(PaymentRule::from_config(config)));
    rules.push(Box::new(ShippingRule::from_config(config)));
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules_order() {
        let names: Vec<_> = standard_rules(&RuleConfig::default())
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["lines", "email", "payment", "shipping"]);
    }
}
