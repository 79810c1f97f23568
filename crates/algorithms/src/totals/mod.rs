//! Static land-cover totals
//!
//! - Reduce: per-class area at the early and late date of one period
//! - Merge: outer join of totals tables across periods and versions

mod merge;
mod reduce;

pub use merge::{merge_all, merge_totals};
pub use reduce::reduce_totals;
