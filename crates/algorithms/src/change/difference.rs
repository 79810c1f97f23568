//! Cross-version difference of change matrices
//!
//! `diff = (A - B) / totalChange(A)` where A is the newer version, so each
//! cell is the fraction of A's total mapped change that differs from B.

use tracing::debug;

use lccqa_core::{ChangeMatrix, DifferenceMatrix, Error, Result, TransitionGrid};

/// Difference two versions of the same change matrix.
///
/// # Arguments
/// * `newer` - Matrix from the current version (A); anchors normalization
/// * `older` - Matrix from the prior version (B)
///
/// # Errors
/// * [`Error::ShapeMismatch`] if the class sets differ in content or order
/// * [`Error::PeriodMismatch`] if region or period differ
/// * [`Error::ZeroTotalChange`] if A has no changed area
pub fn difference(newer: &ChangeMatrix, older: &ChangeMatrix) -> Result<DifferenceMatrix> {
    if newer.classes() != older.classes() {
        return Err(Error::ShapeMismatch {
            expected: newer.classes().to_string(),
            actual: older.classes().to_string(),
        });
    }

    let (a, b) = (newer.key(), older.key());
    if a.region != b.region || a.period != b.period {
        return Err(Error::PeriodMismatch {
            expected: format!("{} {}", a.region, a.period),
            actual: format!("{} {}", b.region, b.period),
        });
    }

    let total = newer.total_change();
    if total == 0.0 || !total.is_finite() {
        return Err(Error::ZeroTotalChange { key: a.to_string() });
    }

    let cells = (newer.data() - older.data()) / total;
    debug!(
        "Differenced {} against {}: normalized by {:.4} acres",
        a, b.version, total
    );

    DifferenceMatrix::new(a, b.version.clone(), newer.classes().clone(), cells)
}
