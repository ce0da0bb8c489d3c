use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One monitored account's observation row.
///
/// Feature values are stored as `f64` regardless of whether the source column
/// held a count or a 0/1 flag. Non-numeric columns outside the schema are kept
/// verbatim in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub values: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ip: None,
            values: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style setter for a numeric column.
    pub fn with(mut self, column: &str, value: f64) -> Self {
        self.values.insert(column.to_owned(), value);
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Numeric value of a column, if the record carries it.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Numeric value of a column, treating an absent column as zero.
    pub fn value_or_zero(&self, column: &str) -> f64 {
        self.value(column).unwrap_or(0.0)
    }
}

/// Parse a raw cell into a non-negative numeric value.
///
/// Accepts integers, decimals and the literals `true`/`false` (any case).
pub(crate) fn parse_cell(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.eq_ignore_ascii_case("true") {
        return Some(1.0);
    }
    if s.eq_ignore_ascii_case("false") {
        return Some(0.0);
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_accepts_counts_and_flags() {
        assert_eq!(parse_cell("42"), Some(42.0));
        assert_eq!(parse_cell(" 7 "), Some(7.0));
        assert_eq!(parse_cell("TRUE"), Some(1.0));
        assert_eq!(parse_cell("false"), Some(0.0));
        assert_eq!(parse_cell("2.5"), Some(2.5));
    }

    #[test]
    fn parse_cell_rejects_negative_and_garbage() {
        assert_eq!(parse_cell("-1"), None);
        assert_eq!(parse_cell("abc"), None);
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("NaN"), None);
        assert_eq!(parse_cell("inf"), None);
    }

    #[test]
    fn missing_value_defaults_to_zero() {
        let record = Record::new("u1").with("login_count", 3.0);
        assert_eq!(record.value("login_count"), Some(3.0));
        assert_eq!(record.value("usb_usage"), None);
        assert_eq!(record.value_or_zero("usb_usage"), 0.0);
    }
}
