//! # lccqa Algorithms
//!
//! The land-cover change QA engine.
//!
//! ## Available Algorithm Categories
//!
//! - **change**: Aggregate transition counts, build change matrices, difference versions
//! - **totals**: Static per-class totals and their outer-join merge
//! - **severity**: Rule-based tagging of unlikely and invalid transitions

pub mod change;
pub mod severity;
pub mod totals;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::change::{
        aggregate, build_matrix, difference, AggregateParams, TransitionAreas,
    };
    pub use crate::severity::{classify, flagged, RuleTable, SeverityCounts, SeverityRule};
    pub use crate::totals::{merge_all, merge_totals, reduce_totals};
    pub use lccqa_core::prelude::*;
}
