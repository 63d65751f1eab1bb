//! Lag strategy: the partner is earlier in the stream.

use super::alignment::{AlignStrategy, Aligned};
use std::collections::VecDeque;

/// Keeps the last `lag` items, excluding the current one.
///
/// Every pair is known at push time. The first `lag` items of a stream have
/// no earlier partner and are emitted with an absent one.
#[derive(Debug, Clone)]
pub struct LagBuffer<T> {
    lag: usize,
    history: VecDeque<T>,
    high_water: usize,
}

impl<T> LagBuffer<T> {
    /// Create a buffer looking `lag` items back. `lag` must be at least 1.
    pub fn new(lag: usize) -> Self {
        Self {
            lag: lag.max(1),
            history: VecDeque::with_capacity(lag.clamp(1, 1024)),
            high_water: 0,
        }
    }

    /// Number of positions looked back.
    pub fn lag(&self) -> usize {
        self.lag
    }
}

impl<T: Clone + Send> AlignStrategy<T> for LagBuffer<T> {
    fn push(&mut self, position: u64, item: T) -> Option<Aligned<T>> {
        // A full history means the oldest entry sits exactly `lag` positions back.
        let partner = if self.history.len() == self.lag {
            self.history.pop_front()
        } else {
            None
        };
        self.history.push_back(item.clone());
        self.high_water = self.high_water.max(self.history.len());

        Some(Aligned {
            position,
            current: item,
            partner,
        })
    }

    fn drain(&mut self) -> Vec<Aligned<T>> {
        self.history.clear();
        Vec::new()
    }

    fn buffered(&self) -> usize {
        self.history.len()
    }

    fn high_water(&self) -> usize {
        self.high_water
    }

    fn clear(&mut self) {
        self.history.clear();
        self.high_water = 0;
    }

    fn name(&self) -> &'static str {
        "lag"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_up_has_no_partner() {
        let mut buf = LagBuffer::new(3);
        for i in 0..3 {
            let pair = buf.push(i, i).unwrap();
            assert_eq!(pair.partner, None);
        }
        let pair = buf.push(3, 3).unwrap();
        assert_eq!(pair.partner, Some(0));
    }

    #[test]
    fn test_history_never_exceeds_lag() {
        let mut buf = LagBuffer::new(2);
        for i in 0..50u64 {
            buf.push(i, i);
            assert!(buf.buffered() <= 2);
        }
        assert_eq!(buf.high_water(), 2);
    }

    #[test]
    fn test_drain_releases_nothing() {
        let mut buf = LagBuffer::new(1);
        buf.push(0, 'a');
        buf.push(1, 'b');
        assert!(buf.drain().is_empty());
        assert_eq!(buf.buffered(), 0);
    }

    #[test]
    fn test_clear() {
        let mut buf = LagBuffer::new(1);
        buf.push(0, 1);
        buf.clear();
        assert_eq!(buf.buffered(), 0);
        assert_eq!(buf.high_water(), 0);
        assert_eq!(buf.push(0, 2).unwrap().partner, None);
        assert_eq!(buf.lag(), 1);
        assert_eq!(AlignStrategy::<i32>::name(&buf), "lag");
    }
}
