//! Order identifier presence and uniqueness.

use std::collections::{BTreeSet, HashSet};

use crate::models::order::Order;
use crate::models::report::Problem;

/// Valid identifiers seen so far in a validation pass.
#[derive(Debug, Clone, Default)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`, returning false if it was already seen.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Check the order identifier against the identifiers seen earlier.
///
/// Orders must be checked in document order: the first occurrence of an
/// identifier passes, every later one is a duplicate.
pub fn check_identity(order: &Order, seen: &mut SeenIds, problems: &mut Vec<Problem>) {
    match order.valid_id() {
        None => problems.push(Problem::MissingId),
        Some(id) => {
            if !seen.insert(id) {
                problems.push(Problem::DuplicateId(id.to_string()));
            }
        }
    }
}

/// Distinct valid identifiers across all orders.
pub fn distinct_ids(orders: &[Order]) -> BTreeSet<String> {
    orders
        .iter()
        .filter_map(Order::valid_id)
        .map(str::to_string)
        .collect()
}
