//! Record values.
//!
//! A [`Record`] is one row of the stream: a small vector of [`Value`]s, one per
//! schema attribute, plus a weight that is carried through untouched.
//! Records are value objects. Filters build new records instead of mutating
//! their input.

use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for record values before spilling to the heap.
const INLINE_VALUES: usize = 8;

/// A single attribute value: a number or the missing marker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value {
    /// A present numeric value.
    Number(f64),
    /// The value is unknown.
    #[default]
    Missing,
}

impl Value {
    /// Check if this is the missing marker.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Get the number, or `None` when missing.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Missing => None,
        }
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Option<f64>> for Value {
    #[inline]
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) => Self::Number(v),
            None => Self::Missing,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Missing => f.write_str("?"),
        }
    }
}

/// One row of the tabular stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: SmallVec<[Value; INLINE_VALUES]>,
    weight: f64,
}

impl Record {
    /// Create a record with weight 1.0.
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self::with_weight(values, 1.0)
    }

    /// Create a record with an explicit weight.
    pub fn with_weight(values: impl IntoIterator<Item = Value>, weight: f64) -> Self {
        Self {
            values: values.into_iter().collect(),
            weight,
        }
    }

    /// Create a record of present numbers with weight 1.0.
    pub fn from_numbers(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Value::Number))
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    /// All values in schema order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The record weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        if self.weight != 1.0 {
            write!(f, " {{{}}}", self.weight)?;
        }
        Ok(())
    }
}
