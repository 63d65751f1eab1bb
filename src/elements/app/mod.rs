//! Application endpoints: feed records in from code, collect them back out.

mod collectsink;
mod itersrc;

pub use collectsink::CollectSink;
pub use itersrc::IterSource;
