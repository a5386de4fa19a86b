//! Order extraction, business rules, and summary building.

mod extractor;
mod summarizer;
pub mod rules;

pub use extractor::{count_lines, extract_lines, extract_orders, ORDERS_FIELD};
pub use summarizer::{summarize, Summarizer};

use serde_json::Value;

use crate::error::Result;
use crate::models::config::RuleConfig;
use crate::models::report::Summary;

/// Parse an order document from JSON text.
pub fn parse_document(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Extract the orders of a parsed document and summarize them.
pub fn validate_document(document: &Value, config: &RuleConfig) -> Result<Summary> {
    config.validate()?;
    let orders = extract_orders(document)?;
    Ok(summarize(&orders, config))
}

/// Parse, extract, and summarize an order document in one call.
pub fn validate_str(text: &str, config: &RuleConfig) -> Result<Summary> {
    validate_document(&parse_document(text)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, OrdvalError};

    #[test]
    fn test_validate_str() {
        let text = r#"{"orders": [
            {"id": "A-1", "status": "PENDING", "customer": {"email": "a@b.co"},
             "lines": [{"sku": "X", "qty": 1, "price": 2}]},
            {"id": "A-1", "status": "PENDING", "customer": {"email": "a@b.co"},
             "lines": [{"sku": "X", "qty": 1, "price": 2}]}
        ]}"#;

        let summary = validate_str(text, &RuleConfig::default()).unwrap();
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_line_items, 2);
        assert_eq!(summary.invalid_orders_count, 1);
    }

    #[test]
    fn test_numeric_id_reported_verbatim() {
        let text = r#"{"orders": [{"id": 12345678901234567890123, "customer": {"email": "a@b.co"}}]}"#;

        let summary = validate_str(text, &RuleConfig::default()).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""id":12345678901234567890123"#));
        assert!(json.contains("missing/invalid id"));
    }

    #[test]
    fn test_unparseable_document() {
        let err = validate_str("{orders: ", &RuleConfig::default()).unwrap_err();
        assert!(matches!(err, OrdvalError::Json(_)));
    }

    #[test]
    fn test_structural_error() {
        let err = validate_str(r#"{"order": []}"#, &RuleConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            OrdvalError::Extraction(ExtractionError::MissingOrders)
        ));
        assert_eq!(
            err.to_string(),
            "extraction error: document has no \"orders\" collection"
        );
    }
}
