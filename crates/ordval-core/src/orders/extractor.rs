//! Order extraction from a parsed order document.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::order::{Line, Order};

/// Name of the top-level collection holding the orders.
pub const ORDERS_FIELD: &str = "orders";

/// Extract orders from a document of shape `{ "orders": [ ... ] }`.
///
/// Orders are returned in document order.
pub fn extract_orders(document: &Value) -> Result<Vec<Order>, ExtractionError> {
    let root = document.as_object().ok_or(ExtractionError::NotAnObject {
        found: json_type(document),
    })?;

    let orders = match root.get(ORDERS_FIELD) {
        None => return Err(ExtractionError::MissingOrders),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ExtractionError::OrdersNotSequence {
                found: json_type(other),
            });
        }
    };

    let mut result = Vec::with_capacity(orders.len());
    for (index, item) in orders.iter().enumerate() {
        if !item.is_object() {
            return Err(ExtractionError::MalformedOrder {
                index,
                found: json_type(item),
            });
        }
        result.push(decode_at(index, item)?);
    }

    debug!("Extracted {} orders", result.len());

    Ok(result)
}

/// Decode the entry at `index` of the orders collection.
fn decode_at<T: DeserializeOwned>(index: usize, item: &Value) -> Result<T, ExtractionError> {
    T::deserialize(item).map_err(|e| ExtractionError::UndecodableOrder {
        index,
        reason: e.to_string(),
    })
}

/// Line items of an order, empty when the field is absent or null.
pub fn extract_lines(order: &Order) -> &[Line] {
    order.lines()
}

/// Count line items across all orders.
pub fn count_lines(orders: &[Order]) -> usize {
    orders.iter().map(|o| extract_lines(o).len()).sum()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{OrderId, OrderStatus};
    use serde_json::json;

    #[test]
    fn test_extract_orders_in_document_order() {
        let doc = json!({"orders": [
            {"id": "A-1", "status": "PAID"},
            {"id": "A-2", "status": "PENDING"},
            {"id": "A-3"}
        ]});

        let orders = extract_orders(&doc).unwrap();
        let ids: Vec<_> = orders.iter().filter_map(|o| o.valid_id()).collect();
        assert_eq!(ids, vec!["A-1", "A-2", "A-3"]);
        assert_eq!(orders[1].status, Some(OrderStatus::Pending));
    }

    #[test]
    fn test_empty_orders() {
        let orders = extract_orders(&json!({"orders": []})).unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_missing_orders_is_structural() {
        assert_eq!(
            extract_orders(&json!({"items": []})),
            Err(ExtractionError::MissingOrders)
        );
    }

    #[test]
    fn test_orders_not_array() {
        assert_eq!(
            extract_orders(&json!({"orders": {"id": "A-1"}})),
            Err(ExtractionError::OrdersNotSequence { found: "object" })
        );
        assert_eq!(
            extract_orders(&json!({"orders": null})),
            Err(ExtractionError::OrdersNotSequence { found: "null" })
        );
    }

    #[test]
    fn test_root_not_object() {
        assert_eq!(
            extract_orders(&json!([1, 2])),
            Err(ExtractionError::NotAnObject { found: "array" })
        );
    }

    #[test]
    fn test_malformed_order_entry() {
        assert_eq!(
            extract_orders(&json!({"orders": [{"id": "A-1"}, "A-2"]})),
            Err(ExtractionError::MalformedOrder { index: 1, found: "string" })
        );
    }

    #[test]
    fn test_decode_failure_is_reported() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            id: u32,
        }

        let err = decode_at::<Strict>(3, &json!({"id": "A-1"})).unwrap_err();
        assert!(matches!(err, ExtractionError::UndecodableOrder { index: 3, .. }));
        assert!(err.to_string().starts_with("order at index 3 could not be decoded"));

        let order: Order = decode_at(0, &json!({"id": "A-1", "status": 5})).unwrap();
        assert_eq!(order.valid_id(), Some("A-1"));
        assert_eq!(order.status, None);
    }

    #[test]
    fn test_wrong_typed_id_is_kept() {
        let orders = extract_orders(&json!({"orders": [{"id": 7}]})).unwrap();
        assert_eq!(orders[0].id, Some(OrderId::Other(json!(7))));
    }

    #[test]
    fn test_extract_lines() {
        let orders = extract_orders(&json!({"orders": [
            {"lines": [{"sku": "X"}, {"sku": null}]},
            {"lines": null},
            {}
        ]}))
        .unwrap();

        assert_eq!(extract_lines(&orders[0]).len(), 2);
        assert!(extract_lines(&orders[1]).is_empty());
        assert!(extract_lines(&orders[2]).is_empty());
        assert_eq!(count_lines(&orders), 2);
    }
}
