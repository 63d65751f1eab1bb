//! Configuration for time-series filters.

use crate::selection::Selection;

/// What to do with records whose time-shifted partner does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// Suppress the record entirely.
    #[default]
    DropIncomplete,
    /// Emit the record with missing values in the selected attributes.
    EmitWithMissing,
}

/// Configuration for a [`TimeSeriesFilter`](super::TimeSeriesFilter).
///
/// # Example
///
/// ```rust
/// use tsdelta::elements::{BoundaryPolicy, FilterConfig};
/// use tsdelta::selection::Selection;
///
/// let config = FilterConfig::default()
///     .with_selection(Selection::indices([0, 2]))
///     .with_offset(2)
///     .with_boundary(BoundaryPolicy::EmitWithMissing);
/// assert_eq!(config.offset, 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Attributes to rewrite.
    pub selection: Selection,
    /// Signed distance to the partner record; negative looks back.
    pub offset: i64,
    /// Handling of records without a partner.
    pub boundary: BoundaryPolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            selection: Selection::none(),
            offset: -1,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl FilterConfig {
    /// Set the attribute selection.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the boundary policy.
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Emit boundary records with missing values instead of dropping them.
    pub fn emit_missing(self) -> Self {
        self.with_boundary(BoundaryPolicy::EmitWithMissing)
    }
}
