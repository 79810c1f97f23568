//! Change-matrix algorithms
//!
//! - Aggregate: raw transition observations → summed acreage per class pair
//! - Build: acreage mapping → dense, registry-ordered change matrix
//! - Difference: two versions of one matrix → normalized difference

mod aggregate;
mod build;
mod difference;

pub use aggregate::{aggregate, AggregateParams, TransitionAreas};
pub use build::{build_matrix, round_acres, ACRE_DECIMALS};
pub use difference::difference;
