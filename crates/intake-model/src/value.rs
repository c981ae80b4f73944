//! Cell and field value types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A decoded source cell, as produced by a tabular reader.
///
/// Readers decide the variant: spreadsheet engines report numeric and
/// boolean cells natively, CSV columns are typed numeric only when every
/// non-empty cell parses as a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Returns true when the cell carries no usable value.
    ///
    /// Non-finite floats count as empty: they are how dataframe-style readers
    /// represent missing numeric cells.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(v) => !v.is_finite(),
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// Returns true for numeric cells (booleans included).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Int(_) | Self::Float(_))
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{}", format_float(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A canonical scalar stored in a [`CanonicalRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric interpretation of the value.
    ///
    /// Text is trimmed and parsed as a float; `None` when it does not parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Returns the text content for text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for zero-length text. Numbers are never blank.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Equality where numbers compare by value (`1 == 1.0`) and text exactly.
    ///
    /// Numbers never equal text, even when the text spells the same number.
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Text(_), _) | (_, Self::Text(_)) => false,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{}", format_float(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// One transformed row: target field name to value.
///
/// Sparse by construction: a missing key means the source had no value.
pub type CanonicalRecord = BTreeMap<String, FieldValue>;

/// The integer a whole float represents, or `None` for fractional,
/// non-finite or out-of-range values.
pub fn whole_number(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if value.is_finite() && value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) {
        Some(value as i64)
    } else {
        None
    }
}

/// Whole floats keep a trailing `.0` so they stay distinguishable from integers.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_emptiness() {
        assert!(RawValue::Null.is_empty());
        assert!(RawValue::Text("   ".to_string()).is_empty());
        assert!(RawValue::Float(f64::NAN).is_empty());
        assert!(!RawValue::Int(0).is_empty());
        assert!(!RawValue::Bool(false).is_empty());
        assert!(!RawValue::Text("0".to_string()).is_empty());
    }

    #[test]
    fn field_value_numeric_text() {
        assert_eq!(FieldValue::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::Int(-3).as_f64(), Some(-3.0));
    }

    #[test]
    fn loose_equality_compares_numbers_by_value() {
        assert!(FieldValue::Int(1).loosely_equals(&FieldValue::Float(1.0)));
        assert!(!FieldValue::Int(1).loosely_equals(&FieldValue::from("1")));
        assert!(FieldValue::from("X").loosely_equals(&FieldValue::from("X")));
    }

    #[test]
    fn whole_numbers_fit_in_i64() {
        assert_eq!(whole_number(10.0), Some(10));
        assert_eq!(whole_number(-3.0), Some(-3));
        assert_eq!(whole_number(2.5), None);
        assert_eq!(whole_number(1e19), None);
        assert_eq!(whole_number(f64::INFINITY), None);
    }

    #[test]
    fn float_display_keeps_decimal_point() {
        assert_eq!(FieldValue::Float(10.0).to_string(), "10.0");
        assert_eq!(FieldValue::Float(2.25).to_string(), "2.25");
        assert_eq!(FieldValue::Int(10).to_string(), "10");
    }
}
