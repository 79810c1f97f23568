//! Severity classification of matrix cells
//!
//! A declarative rule table lists, per tier, the early → late class pairs
//! that should rarely or never occur. Cells holding a realized (positive)
//! value for a listed pair are tagged with that tier; everything else is
//! `Normal`.

mod classify;
mod rules;

pub use classify::{classify, flagged, FlaggedTransition, SeverityCounts};
pub use rules::{RuleTable, SeverityRule};
