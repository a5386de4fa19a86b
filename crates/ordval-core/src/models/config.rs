//! Configuration structures for order validation.

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;
use crate::error::{OrdvalError, Result};

/// Main configuration for ordval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdvalConfig {
    /// Rule configuration.
    pub rules: RuleConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Business rule configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Absolute tolerance for the refund comparison.
    pub refund_tolerance: f64,

    /// Accepted sign of the shipping fee.
    pub shipping_fee_policy: FeePolicy,

    /// Report orders without a shipping fee.
    pub require_shipping_fee: bool,

    /// Report lines without a SKU.
    pub flag_missing_sku: bool,

    /// Statuses whose lines are checked for integrity.
    pub line_checked_statuses: Vec<OrderStatus>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            refund_tolerance: 1e-6,
            shipping_fee_policy: FeePolicy::NonNegative,
            require_shipping_fee: false,
            flag_missing_sku: false,
            line_checked_statuses: vec![OrderStatus::Paid, OrderStatus::Pending],
        }
    }
}

impl RuleConfig {
    /// Check that the configuration can be applied.
    pub fn validate(&self) -> Result<()> {
        if !self.refund_tolerance.is_finite() || self.refund_tolerance < 0.0 {
            return Err(OrdvalError::Config(format!(
                "refund_tolerance must be a non-negative number, got {}",
                self.refund_tolerance
            )));
        }
        Ok(())
    }
}

/// Shipping fee sign policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePolicy {
    /// fee >= 0
    #[default]
    NonNegative,
    /// fee > 0
    Positive,
    /// fee < 0 (legacy inverted check)
    Negative,
    /// Any value accepted.
    Any,
}

impl FeePolicy {
    /// Whether `fee` satisfies the policy.
    pub fn accepts(&self, fee: f64) -> bool {
        match self {
            FeePolicy::NonNegative => fee >= 0.0,
            FeePolicy::Positive => fee > 0.0,
            FeePolicy::Negative => fee < 0.0,
            FeePolicy::Any => true,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl OrdvalConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
