//! Lookup workloads and alternative insertion orders derived from a subset.

mod equality;
mod range;
mod shuffle;

pub use equality::equality_lookups;
pub use range::{RangePair, RangeWorkload, range_length, validate_selectivity};
pub use shuffle::shuffled;
