//! Customer email presence and format.

use crate::models::order::Order;
use crate::models::report::Problem;

use super::patterns::EMAIL;
use super::OrderRule;

/// Email rule.
pub struct EmailRule;

impl EmailRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRule for EmailRule {
    fn name(&self) -> &'static str {
        "email"
    }

    fn check(&self, order: &Order, problems: &mut Vec<Problem>) {
        match order.email() {
            None => problems.push(Problem::MissingEmail),
            Some(email) if !validate_email(email) => {
                problems.push(Problem::InvalidEmail(email.to_string()))
            }
            Some(_) => {}
        }
    }
}

/// Check that `email` has the shape `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
