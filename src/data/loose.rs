//! Loosely-typed numeric values crossing the batch boundary.
//!
//! Spreadsheet cells and CSV fields arrive as numbers or as numeric-looking text.
//! They are coerced exactly once, by truncation, when an identifier or refinement
//! level is needed. Text that is not numeric coerces to 0, so it never matches a
//! catalog id and never passes a positive-id filter.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl Default for LooseNumber {
    fn default() -> Self {
        LooseNumber::Text(String::new())
    }
}

impl LooseNumber {
    /// Numeric value; empty text is 0, unparseable text is NaN.
    pub fn to_f64(&self) -> f64 {
        match self {
            LooseNumber::Number(value) => *value,
            LooseNumber::Text(text) => parse_text(text),
        }
    }

    /// Truncating 32-bit integer coercion. NaN and infinities become 0; values
    /// outside the 32-bit range wrap.
    pub fn truncate(&self) -> i32 {
        to_int32(self.to_f64())
    }

    /// Identifier form used for catalog lookups and row/slot filtering.
    pub fn as_id(&self) -> i64 {
        i64::from(self.truncate())
    }

    pub fn is_positive_id(&self) -> bool {
        self.as_id() > 0
    }
}

fn parse_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"));
    if let Some(digits) = hex {
        return i64::from_str_radix(digits, 16)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN);
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    // `as i64` saturates; the narrowing cast keeps the low 32 bits.
    (value.trunc() as i64) as i32
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseNumber::Number(value) => write!(f, "{value}"),
            LooseNumber::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for LooseNumber {
    fn from(value: i64) -> Self {
        LooseNumber::Number(value as f64)
    }
}

impl From<i32> for LooseNumber {
    fn from(value: i32) -> Self {
        LooseNumber::Number(f64::from(value))
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> Self {
        LooseNumber::Number(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        LooseNumber::Text(value.to_string())
    }
}

impl From<String> for LooseNumber {
    fn from(value: String) -> Self {
        LooseNumber::Text(value)
    }
}

impl From<&calamine::Data> for LooseNumber {
    fn from(cell: &calamine::Data) -> Self {
        match cell {
            calamine::Data::Int(i) => LooseNumber::Number(*i as f64),
            calamine::Data::Float(f) => LooseNumber::Number(*f),
            calamine::Data::Bool(b) => LooseNumber::Number(if *b { 1.0 } else { 0.0 }),
            calamine::Data::String(s) => LooseNumber::Text(s.clone()),
            calamine::Data::Empty => LooseNumber::default(),
            other => LooseNumber::Text(format!("{other:?}")),
        }
    }
}

/// Build a row of loose values from plain integers. Handy for callers that
/// already hold typed ids.
pub fn loose_row<T: Copy + Into<LooseNumber>>(values: &[T]) -> Vec<LooseNumber> {
    values.iter().map(|value| (*value).into()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_truncates_like_a_number() {
        assert_eq!(LooseNumber::from("42").as_id(), 42);
        assert_eq!(LooseNumber::from(" 12.9 ").as_id(), 12);
        assert_eq!(LooseNumber::from("-3.7").as_id(), -3);
        assert_eq!(LooseNumber::from(7.99).truncate(), 7);
    }

    #[test]
    fn empty_and_garbage_text_coerce_to_zero() {
        assert_eq!(LooseNumber::from("").as_id(), 0);
        assert_eq!(LooseNumber::default().as_id(), 0);
        assert_eq!(LooseNumber::from("Type96").as_id(), 0);
        assert!(!LooseNumber::from("abc").is_positive_id());
    }

    #[test]
    fn non_finite_and_out_of_range_values_follow_int32_rules() {
        assert_eq!(LooseNumber::from(f64::INFINITY).truncate(), 0);
        assert_eq!(LooseNumber::from(f64::NAN).truncate(), 0);
        assert_eq!(LooseNumber::from(4_294_967_297.0).truncate(), 1);
        assert_eq!(LooseNumber::from("0x1A").as_id(), 26);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let row: Vec<LooseNumber> = serde_json::from_str(r#"[1, "2", 3.5, ""]"#).unwrap();
        let ids: Vec<i64> = row.iter().map(LooseNumber::as_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 0]);
    }
}
