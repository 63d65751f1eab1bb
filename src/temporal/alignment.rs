//! Offset alignment of a single ordered stream.
//!
//! The [`Aligner`] consumes items one at a time and emits `(current,
//! partner)` pairs in the order the current items were pushed. It has no
//! knowledge of what the items are; merging a pair into an output is the
//! caller's business.

use super::lag::LagBuffer;
use super::lead::LeadQueue;
use super::offset::Offset;
use crate::element::Output;
use crate::error::{Error, Result};
use std::fmt;

/// An item paired with the item `k` positions away from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned<T> {
    /// Zero-based stream position of `current`.
    pub position: u64,
    /// The item being emitted.
    pub current: T,
    /// The time-shifted partner, or `None` at the edges of the stream.
    pub partner: Option<T>,
}

impl<T> Aligned<T> {
    /// Create a pair with a partner.
    pub fn paired(position: u64, current: T, partner: T) -> Self {
        Self {
            position,
            current,
            partner: Some(partner),
        }
    }

    /// Create a pair whose partner does not exist.
    pub fn absent(position: u64, current: T) -> Self {
        Self {
            position,
            current,
            partner: None,
        }
    }

    /// Check if the partner exists.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.partner.is_some()
    }
}

/// How pairs are formed for one direction of offset.
///
/// Implementations must emit pairs in push order and never hold more than
/// `|k| + 1` items.
pub trait AlignStrategy<T>: Send {
    /// Accept the item at `position`; return the pair that became ready.
    fn push(&mut self, position: u64, item: T) -> Option<Aligned<T>>;

    /// End of stream: release every item still held, oldest first.
    fn drain(&mut self) -> Vec<Aligned<T>>;

    /// Number of items currently held.
    fn buffered(&self) -> usize;

    /// Largest number of items held at once since the last clear.
    fn high_water(&self) -> usize;

    /// Drop everything held.
    fn clear(&mut self);

    /// Strategy name (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Pairs each item with the item `offset` positions away.
///
/// The strategy is picked once at open time; pushes never branch on the
/// offset sign.
///
/// # Example
///
/// ```rust
/// use tsdelta::temporal::Aligner;
///
/// let mut aligner = Aligner::open(-1)?;
/// let first = aligner.push(10)?.into_single().unwrap();
/// assert_eq!(first.partner, None);
///
/// let second = aligner.push(12)?.into_single().unwrap();
/// assert_eq!((second.current, second.partner), (12, Some(10)));
/// # Ok::<(), tsdelta::Error>(())
/// ```
pub struct Aligner<T> {
    offset: Offset,
    strategy: Box<dyn AlignStrategy<T>>,
    position: u64,
    closed: bool,
}

impl<T: Clone + Send + 'static> Aligner<T> {
    /// Open an aligner; fails with `InvalidConfiguration` for offset 0.
    pub fn open(offset: i64) -> Result<Self> {
        Ok(Self::with_offset(Offset::new(offset)?))
    }

    /// Open an aligner for an already validated offset.
    pub fn with_offset(offset: Offset) -> Self {
        let strategy: Box<dyn AlignStrategy<T>> = if offset.is_lag() {
            Box::new(LagBuffer::new(offset.magnitude()))
        } else {
            Box::new(LeadQueue::new(offset.magnitude()))
        };
        tracing::debug!(offset = %offset, strategy = strategy.name(), "aligner opened");

        Self {
            offset,
            strategy,
            position: 0,
            closed: false,
        }
    }

    /// Accept the next item in stream order.
    ///
    /// Produces at most one pair. Lag pairs are ready immediately; lead pairs
    /// become ready once the partner arrives.
    pub fn push(&mut self, item: T) -> Result<Output<Aligned<T>>> {
        if self.closed {
            return Err(Error::invalid_state("push", "closed"));
        }
        let position = self.position;
        self.position += 1;
        Ok(self.strategy.push(position, item).into())
    }

    /// Signal end of input and release the remaining pairs.
    pub fn close(&mut self) -> Result<Output<Aligned<T>>> {
        if self.closed {
            return Err(Error::invalid_state("close", "closed"));
        }
        self.closed = true;
        let tail = self.strategy.drain();
        tracing::debug!(
            offset = %self.offset,
            pushed = self.position,
            released = tail.len(),
            "aligner closed"
        );
        Ok(tail.into())
    }

    /// Discard buffered items and start a new stream with the same offset.
    pub fn reset(&mut self) {
        self.strategy.clear();
        self.position = 0;
        self.closed = false;
    }
}

impl<T> Aligner<T> {
    /// The configured offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Number of items pushed since open or reset.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of items currently held.
    pub fn buffered(&self) -> usize {
        self.strategy.buffered()
    }

    /// Largest number of items held at once.
    pub fn peak_buffered(&self) -> usize {
        self.strategy.high_water()
    }

    /// Check if `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<T> fmt::Debug for Aligner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("offset", &self.offset)
            .field("strategy", &self.strategy.name())
            .field("position", &self.position)
            .field("buffered", &self.strategy.buffered())
            .field("closed", &self.closed)
            .finish()
    }
}
