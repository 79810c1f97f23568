//! Totals reduction for one period

use ndarray::Array2;

use lccqa_core::totals::totals_label;
use lccqa_core::{Period, Result, TotalsTable};

use crate::change::TransitionAreas;

/// Total area per class at the early and late date of a period.
///
/// Early totals sum each class's row of the acreage mapping; late totals
/// sum its column. Stable pixels sit on the diagonal, so a class with no
/// late-side transition keeps its early area at the late date.
///
/// Only classes with recorded area appear, in registry order, labelled with
/// their full (unabbreviated) names. Values are not rounded.
///
/// # Returns
/// Table with columns `{early}_{code}_{version}` and `{late}_{code}_{version}`
pub fn reduce_totals(areas: &TransitionAreas, period: Period, version: &str) -> Result<TotalsTable> {
    let classes = areas.full_classes();
    let n = classes.len();
    let mut early = vec![0.0; n];
    let mut late = vec![0.0; n];
    let mut present = vec![false; n];

    for ((r, c), acres) in areas.iter() {
        early[r] += acres;
        late[c] += acres;
        present[r] = true;
        present[c] = true;
    }

    let rows: Vec<usize> = (0..n).filter(|&i| present[i]).collect();
    let mut values = Array2::zeros((rows.len(), 2));
    for (out, &i) in rows.iter().enumerate() {
        values[(out, 0)] = early[i];
        values[(out, 1)] = late[i];
    }

    TotalsTable::new(
        rows.iter().map(|&i| classes.names()[i].clone()).collect(),
        vec![
            totals_label(period.early, period, version),
            totals_label(period.late, period, version),
        ],
        values,
    )
}
