//! Aggregation of records into per-category totals.

mod aggregate;

pub use aggregate::{aggregate, Tally};
