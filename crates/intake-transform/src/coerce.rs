//! Raw cell to canonical value coercion.

use intake_model::{FieldValue, RawValue, whole_number};

/// Floats at or above this magnitude print in exponent form, without a
/// decimal point, and are stored as integers when whole.
const EXPONENT_FORM_MIN: f64 = 1e16;

/// Coerce one source cell, or `None` when the cell is empty.
///
/// Integers and booleans become integers, floats stay floats (except whole
/// floats of exponent-form magnitude) and text is trimmed. Malformed values
/// pass through as text for the validator.
pub fn coerce(raw: &RawValue) -> Option<FieldValue> {
    if raw.is_empty() {
        return None;
    }
    let value = match raw {
        RawValue::Int(v) => FieldValue::Int(*v),
        RawValue::Float(v) if v.abs() >= EXPONENT_FORM_MIN => {
            whole_number(*v).map_or(FieldValue::Float(*v), FieldValue::Int)
        }
        RawValue::Float(v) => FieldValue::Float(*v),
        RawValue::Bool(b) => FieldValue::Int(i64::from(*b)),
        RawValue::Text(s) => FieldValue::Text(s.trim().to_string()),
        RawValue::Null => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(coerce(&RawValue::Int(10)), Some(FieldValue::Int(10)));
        assert_eq!(coerce(&RawValue::Float(10.0)), Some(FieldValue::Float(10.0)));
        assert_eq!(coerce(&RawValue::Bool(true)), Some(FieldValue::Int(1)));
    }

    #[test]
    fn exponent_form_whole_floats_become_integers() {
        assert_eq!(
            coerce(&RawValue::Float(1e17)),
            Some(FieldValue::Int(100_000_000_000_000_000))
        );
        assert_eq!(coerce(&RawValue::Float(1e20)), Some(FieldValue::Float(1e20)));
        assert_eq!(coerce(&RawValue::Float(1e-5)), Some(FieldValue::Float(1e-5)));
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(coerce(&RawValue::from("  lbs ")), Some(FieldValue::from("lbs")));
        assert_eq!(coerce(&RawValue::from("abc")), Some(FieldValue::from("abc")));
    }

    #[test]
    fn empty_cells_are_dropped() {
        assert_eq!(coerce(&RawValue::Null), None);
        assert_eq!(coerce(&RawValue::from("   ")), None);
        assert_eq!(coerce(&RawValue::Float(f64::NAN)), None);
    }
}
