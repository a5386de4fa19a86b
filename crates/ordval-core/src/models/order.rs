//! Order data models as they appear in an order document.
//!
//! Every field is optional. A field holding a value of the wrong JSON type
//! decodes as absent, so malformed fields surface as validation problems
//! instead of aborting the run.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single order record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier, kept verbatim for reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,

    /// Lifecycle status.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,

    /// Customer contact details.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,

    /// Line items in document order.
    #[serde(default, deserialize_with = "lenient_lines", skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<Line>>,

    /// Payment state.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,

    /// Refund issued on cancellation.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub refund: Option<Refund>,

    /// Shipping charges.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Shipping>,
}

/// Order identifier as found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    /// String identifier (valid when non-empty).
    Text(String),
    /// Any other JSON value (number, object, ...). Numbers keep their
    /// source text.
    Other(Value),
}

impl OrderId {
    /// The identifier if it is a non-empty string.
    pub fn as_valid(&self) -> Option<&str> {
        match self {
            OrderId::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Text(s) => write!(f, "{}", s),
            OrderId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId::Text(s.to_string())
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Paid in full.
    Paid,
    /// Awaiting payment.
    Pending,
    /// Cancelled, possibly refunded.
    Cancelled,
    /// Any other status; no status-specific rule applies.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
            OrderStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Customer contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Email address.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A single line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Stock keeping unit. Lines without one are exempt from qty/price checks.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Quantity ordered.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,

    /// Unit price.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Payment state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Whether the charged funds were collected.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub captured: Option<bool>,
}

/// Refund issued to the customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    /// Refunded amount.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Shipping charges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    /// Shipping fee.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

impl Order {
    /// The identifier if it is a non-empty string.
    pub fn valid_id(&self) -> Option<&str> {
        self.id.as_ref().and_then(OrderId::as_valid)
    }

    /// Line items, empty when the field is absent or null.
    pub fn lines(&self) -> &[Line] {
        self.lines.as_deref().unwrap_or(&[])
    }

    /// Customer email, `None` when absent or empty.
    pub fn email(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .filter(|e| !e.is_empty())
    }

    /// Whether payment was captured. Absent payment counts as not captured.
    pub fn is_captured(&self) -> bool {
        self.payment
            .as_ref()
            .and_then(|p| p.captured)
            .unwrap_or(false)
    }

    /// Refunded amount, 0 when absent.
    pub fn refund_amount(&self) -> f64 {
        self.refund.as_ref().and_then(|r| r.amount).unwrap_or(0.0)
    }

    /// Shipping fee if present.
    pub fn shipping_fee(&self) -> Option<f64> {
        self.shipping.as_ref().and_then(|s| s.fee)
    }

    /// Sum of qty × price over all lines, missing values counting as 0.
    pub fn lines_total(&self) -> f64 {
        self.lines().iter().map(Line::subtotal).sum()
    }
}

impl Line {
    /// SKU, `None` when absent or empty.
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref().filter(|s| !s.is_empty())
    }

    /// qty × price, missing values counting as 0.
    pub fn subtotal(&self) -> f64 {
        self.qty.unwrap_or(0.0) * self.price.unwrap_or(0.0)
    }
}

/// Decode a field, treating a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Decode the lines array. Entries that are not line objects become empty lines
/// so they still count as present.
fn lenient_lines<'de, D>(deserializer: D) -> Result<Option<Vec<Line>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}
