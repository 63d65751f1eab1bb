//! Iterator adapter over a filter.

use super::merge::MergePolicy;
use super::timeseries::TimeSeriesFilter;
use crate::error::Result;
use crate::record::Record;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::Span;

/// Iterator returned by [`TimeSeriesFilter::apply`].
///
/// Pulls input lazily: an input record is only read when no output is
/// pending. The filter is closed when the input runs out.
pub struct FilterIter<'a, M: MergePolicy, I> {
    filter: &'a mut TimeSeriesFilter<M>,
    input: I,
    pending: VecDeque<Record>,
    done: bool,
    span: Span,
}

impl<'a, M: MergePolicy, I> FilterIter<'a, M, I> {
    pub(super) fn new(filter: &'a mut TimeSeriesFilter<M>, input: I, span: Span) -> Self {
        Self {
            filter,
            input,
            pending: VecDeque::new(),
            done: false,
            span,
        }
    }
}

impl<M, I> Iterator for FilterIter<'_, M, I>
where
    M: MergePolicy,
    I: Iterator<Item = Record>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let _guard = self.span.enter();
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            let ready = match self.input.next() {
                Some(record) => self.filter.push(record),
                None => {
                    self.done = true;
                    self.filter.close()
                }
            };
            match ready {
                Ok(out) => self.pending.extend(out),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<M: MergePolicy, I: Iterator<Item = Record>> FusedIterator for FilterIter<'_, M, I> {}
