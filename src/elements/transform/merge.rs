//! Merge policies: how a selected value is combined with its partner's.

use crate::record::Value;

/// Combines a selected attribute value with the partner record's value.
///
/// The filter only calls [`merge`](MergePolicy::merge) when the partner
/// record exists; an absent partner always yields [`Value::Missing`].
pub trait MergePolicy: Send {
    /// Combine the current value with the partner value.
    fn merge(&self, current: Value, partner: Value) -> Value;

    /// One-letter tag used to rename selected attributes (`"x d-1"`).
    fn tag(&self) -> char;

    /// Whether selected attributes must be numeric.
    fn requires_numeric(&self) -> bool {
        true
    }

    /// Policy name (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// `current - partner`, missing if either side is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delta;

impl MergePolicy for Delta {
    #[inline]
    fn merge(&self, current: Value, partner: Value) -> Value {
        match (current, partner) {
            (Value::Number(c), Value::Number(p)) => Value::Number(c - p),
            _ => Value::Missing,
        }
    }

    fn tag(&self) -> char {
        'd'
    }

    fn name(&self) -> &'static str {
        "delta"
    }
}

/// Replace the current value with the partner's value.
///
/// Values are copied, not computed on, so any attribute kind is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translate;

impl MergePolicy for Translate {
    #[inline]
    fn merge(&self, _current: Value, partner: Value) -> Value {
        partner
    }

    fn tag(&self) -> char {
        't'
    }

    fn requires_numeric(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_delta_subtracts() {
        assert_eq!(Delta.merge(n(12.0), n(10.0)), Value::Number(2.0));
        assert_eq!(Delta.merge(n(11.0), n(15.0)), Value::Number(-4.0));
    }

    #[test]
    fn test_delta_missing_either_side() {
        assert_eq!(Delta.merge(Value::Missing, n(1.0)), Value::Missing);
        assert_eq!(Delta.merge(n(1.0), Value::Missing), Value::Missing);
        assert_eq!(Delta.merge(Value::Missing, Value::Missing), Value::Missing);
    }

    #[test]
    fn test_delta_is_exact() {
        let c = 0.3;
        let p = 0.1;
        assert_eq!(Delta.merge(n(c), n(p)), Value::Number(c - p));
    }

    #[test]
    fn test_translate_copies_partner() {
        assert_eq!(Translate.merge(n(1.0), n(7.0)), Value::Number(7.0));
        assert_eq!(Translate.merge(n(1.0), Value::Missing), Value::Missing);
        assert!(!Translate.requires_numeric());
        assert!(Delta.requires_numeric());
        assert_eq!((Delta.tag(), Translate.tag()), ('d', 't'));
    }
}
