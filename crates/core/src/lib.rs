//! # lccqa Core
//!
//! Core types for land-cover change QA.
//!
//! This crate provides:
//! - `ClassRegistry` / `ClassSet`: the ordered, closed set of land-cover classes
//! - `TransitionObservation` and `TransitionCodes`: raw transition counts
//! - `ChangeMatrix` / `DifferenceMatrix`: class × class transition tables
//! - `TotalsTable`: static area per class and date
//! - `Severity`: review tiers attached to matrix cells
//! - `LabeledTable`: the rendered layout handed to report writers

pub mod classes;
pub mod error;
pub mod matrix;
pub mod observation;
pub mod period;
pub mod severity;
pub mod table;
pub mod totals;

pub use classes::{ClassRegistry, ClassSet};
pub use error::{Error, Result};
pub use matrix::{ChangeMatrix, DifferenceMatrix, TransitionGrid};
pub use observation::{TransitionCodes, TransitionObservation, SQUARE_METERS_PER_ACRE};
pub use period::{MatrixKey, Period};
pub use severity::{Severity, SeverityGrid};
pub use table::LabeledTable;
pub use totals::TotalsTable;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classes::{ClassRegistry, ClassSet};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{ChangeMatrix, DifferenceMatrix, TransitionGrid};
    pub use crate::observation::{TransitionCodes, TransitionObservation};
    pub use crate::period::{MatrixKey, Period};
    pub use crate::severity::{Severity, SeverityGrid};
    pub use crate::totals::TotalsTable;
}
