//! The time shift between a record and its partner.

use crate::error::{Error, Result};
use std::fmt;
use std::num::NonZeroI64;

const ONE_BEHIND: NonZeroI64 = match NonZeroI64::new(-1) {
    Some(v) => v,
    None => unreachable!(),
};

/// A non-zero number of positions between a record and its partner.
///
/// The partner of the record at stream position `i` is at `i + k`:
/// negative `k` looks back (lag), positive `k` looks ahead (lead).
/// The default is `-1`, the previous record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset(NonZeroI64);

impl Offset {
    /// Create an offset, rejecting zero.
    pub fn new(k: i64) -> Result<Self> {
        NonZeroI64::new(k)
            .map(Self)
            .ok_or_else(|| Error::InvalidConfiguration("offset cannot be 0".to_string()))
    }

    /// The signed offset.
    #[inline]
    pub fn get(self) -> i64 {
        self.0.get()
    }

    /// Partner is earlier in the stream.
    #[inline]
    pub fn is_lag(self) -> bool {
        self.get() < 0
    }

    /// Partner is later in the stream.
    #[inline]
    pub fn is_lead(self) -> bool {
        self.get() > 0
    }

    /// Number of positions between a record and its partner.
    #[inline]
    pub fn magnitude(self) -> usize {
        usize::try_from(self.get().unsigned_abs()).unwrap_or(usize::MAX)
    }

    /// `'-'` for lag, `'+'` for lead.
    #[inline]
    pub fn sign(self) -> char {
        if self.is_lag() { '-' } else { '+' }
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self(ONE_BEHIND)
    }
}

impl TryFrom<i64> for Offset {
    type Error = Error;

    fn try_from(k: i64) -> Result<Self> {
        Self::new(k)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign(), self.get().unsigned_abs())
    }
}
