//! Change-matrix construction
//!
//! Expands a sparse acreage mapping into a dense class × class matrix in
//! registry order. Classes with no observed area get all-zero rows and
//! columns; the diagonal is forced to zero.

use ndarray::Array2;
use tracing::debug;

use lccqa_core::{ChangeMatrix, MatrixKey, Result, TransitionGrid};

use super::aggregate::TransitionAreas;

/// Decimal places kept in matrix cells.
///
/// Enough to keep single-pixel transitions visible.
pub const ACRE_DECIMALS: i32 = 4;

/// Round an acreage to [`ACRE_DECIMALS`] places.
pub fn round_acres(value: f64) -> f64 {
    let scale = 10f64.powi(ACRE_DECIMALS);
    (value * scale).round() / scale
}

/// Build the change matrix for one region, period and version.
///
/// # Arguments
/// * `areas` - Aggregated acreage per class pair
/// * `key` - Identity of the matrix
///
/// # Returns
/// A matrix indexed by `areas.classes()`, with every class present as a row
/// and a column and a zero diagonal.
pub fn build_matrix(areas: &TransitionAreas, key: MatrixKey) -> Result<ChangeMatrix> {
    let classes = areas.classes();
    let n = classes.len();
    let mut cells = Array2::<f64>::zeros((n, n));

    for ((early, late), acres) in areas.iter() {
        if early == late {
            continue;
        }
        cells[(early, late)] = round_acres(acres);
    }

    let matrix = ChangeMatrix::new(key, classes.clone(), cells)?;
    debug!(
        "Built matrix {}: {} classes, {:.4} acres changed",
        matrix.key(),
        n,
        matrix.total_change()
    );
    Ok(matrix)
}
