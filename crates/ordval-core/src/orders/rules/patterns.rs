//! Common regex patterns for order field validation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Email: local-part@domain.tld, no whitespace or '@' in either part
    pub static ref EMAIL: Regex = Regex::new(
        r"^[^@\s]+@[^@\s]+\.[^@\s]+$"
    ).unwrap();
}
