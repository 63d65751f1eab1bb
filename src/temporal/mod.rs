//! Temporal alignment of a record stream with itself.
//!
//! This module pairs each item of an ordered stream with the item a fixed
//! number of positions away from it:
//!
//! - [`Offset`]: The non-zero shift; negative looks back (lag), positive
//!   looks ahead (lead)
//! - [`Aligned`]: An item with its partner, or no partner at the edges
//! - [`Aligner`]: The bounded buffer that produces aligned pairs in order
//!
//! # Strategies
//!
//! Lag and lead have asymmetric edge handling, so each has its own
//! [`AlignStrategy`], chosen once when the aligner is opened:
//!
//! - [`LagBuffer`]: Keeps the last `|k|` items. Every pair is known at push
//!   time; the first `|k|` items have no partner.
//! - [`LeadQueue`]: Holds the last `k` items until their partner arrives.
//!   The last `k` items are released without a partner at close.
//!
//! Either way, at most `|k| + 1` items are held at once.

mod alignment;
mod lag;
mod lead;
mod offset;

pub use alignment::{AlignStrategy, Aligned, Aligner};
pub use lag::LagBuffer;
pub use lead::LeadQueue;
pub use offset::Offset;
