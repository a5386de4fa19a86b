//! Shipping fee sanity.

use tracing::warn;

use crate::models::config::{FeePolicy, RuleConfig};
use crate::models::order::Order;
use crate::models::report::Problem;

use super::OrderRule;

/// Shipping fee rule.
pub struct ShippingRule {
    policy: FeePolicy,
    require_fee: bool,
}

impl ShippingRule {
    /// Create a rule accepting non-negative fees, absent fees allowed.
    pub fn new() -> Self {
        Self {
            policy: FeePolicy::NonNegative,
            require_fee: false,
        }
    }

    pub fn from_config(config: &RuleConfig) -> Self {
        if config.shipping_fee_policy == FeePolicy::Negative {
            warn!("Shipping fee policy 'negative' rejects every non-negative fee");
        }
        Self {
            policy: config.shipping_fee_policy,
            require_fee: config.require_shipping_fee,
        }
    }

    /// Set the fee sign policy.
    pub fn with_policy(mut self, policy: FeePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set whether an absent fee is reported.
    pub fn with_required_fee(mut self, require: bool) -> Self {
        self.require_fee = require;
        self
    }
}

impl Default for ShippingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRule for ShippingRule {
    fn name(&self) -> &'static str {
        "shipping"
    }

    fn check(&self, order: &Order, problems: &mut Vec<Problem>) {
        match order.shipping_fee() {
            Some(fee) if !self.policy.accepts(fee) => {
                problems.push(Problem::InvalidShippingFee(fee))
            }
            Some(_) => {}
            None if self.require_fee => problems.push(Problem::MissingShippingFee),
            None => {}
        }
    }
}
