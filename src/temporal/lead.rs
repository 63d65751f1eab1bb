//! Lead strategy: the partner is later in the stream.

use super::alignment::{AlignStrategy, Aligned};
use std::collections::VecDeque;

/// Holds the last `lead` items until their partner arrives.
///
/// When a push makes the queue longer than `lead`, the oldest item has just
/// met its partner and is released. At end of stream the queue holds the
/// last `lead` items, which never get one.
#[derive(Debug, Clone)]
pub struct LeadQueue<T> {
    lead: usize,
    pending: VecDeque<(u64, T)>,
    high_water: usize,
}

impl<T> LeadQueue<T> {
    /// Create a queue looking `lead` items ahead. `lead` must be at least 1.
    pub fn new(lead: usize) -> Self {
        Self {
            lead: lead.max(1),
            pending: VecDeque::with_capacity(lead.saturating_add(1).min(1024)),
            high_water: 0,
        }
    }

    /// Number of positions looked ahead.
    pub fn lead(&self) -> usize {
        self.lead
    }
}

impl<T: Clone + Send> AlignStrategy<T> for LeadQueue<T> {
    fn push(&mut self, position: u64, item: T) -> Option<Aligned<T>> {
        self.pending.push_back((position, item.clone()));
        self.high_water = self.high_water.max(self.pending.len());

        if self.pending.len() > self.lead {
            return self
                .pending
                .pop_front()
                .map(|(earlier, current)| Aligned::paired(earlier, current, item));
        }
        None
    }

    fn drain(&mut self) -> Vec<Aligned<T>> {
        self.pending
            .drain(..)
            .map(|(position, current)| Aligned::absent(position, current))
            .collect()
    }

    fn buffered(&self) -> usize {
        self.pending.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.high_water = 0;
    }

    fn name(&self) -> &'static str {
        "lead"
    }
}
