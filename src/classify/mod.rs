//! Classification Module
//!
//! Equal-interval breakpoints, value-to-class mapping, and the lazily
//! populated breakpoint cache.

mod breaks;
mod cache;

pub use breaks::{classify, compute_equal_breaks, BreakpointSet, ClassIndex};
pub use cache::BreakpointCache;
