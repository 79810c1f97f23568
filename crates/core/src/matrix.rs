//! Change matrices
//!
//! A change matrix is a square class × class table of acreage where rows are
//! the early-date class and columns the late-date class. The diagonal
//! ("no change") is always zero. Margins are derived, never stored:
//!
//! - `Decrease[row]`: area that left the row class
//! - `Increase[col]`: area that entered the column class
//! - `NetChange[c]`: `Increase[c] - Decrease[c]`
//!
//! [`DifferenceMatrix`] has the same shape, holding the normalized
//! difference between two versions of one matrix. Since every margin is a
//! linear function of the cells, the same derivations apply to it.

use ndarray::{s, Array1, Array2, ArrayView2, Axis};

use crate::classes::ClassSet;
use crate::error::{Error, Result};
use crate::period::{MatrixKey, Period};
use crate::table::LabeledTable;

/// Row label of the column sums
pub const INCREASE: &str = "Increase";
/// Row and column label of the row sums
pub const DECREASE: &str = "Decrease";
/// Row label of `Increase - Decrease`
pub const NET_CHANGE: &str = "Net Change";

/// A square class × class grid of transition values.
pub trait TransitionGrid {
    /// Classes indexing both rows and columns
    fn classes(&self) -> &ClassSet;

    /// The class × class body
    fn cells(&self) -> ArrayView2<'_, f64>;

    /// Header of the label column when rendered
    fn index_name(&self) -> String;

    /// Value of the early → late cell
    fn value(&self, early: &str, late: &str) -> Option<f64> {
        let r = self.classes().index_of(early)?;
        let c = self.classes().index_of(late)?;
        self.cells().get((r, c)).copied()
    }

    /// Row sums: area that left each class
    fn decrease(&self) -> Array1<f64> {
        self.cells().sum_axis(Axis(1))
    }

    /// Column sums: area that entered each class
    fn increase(&self) -> Array1<f64> {
        self.cells().sum_axis(Axis(0))
    }

    fn net_change(&self) -> Array1<f64> {
        self.increase() - self.decrease()
    }

    /// Total changed area (sum of all decreases, equal to sum of increases)
    fn total_change(&self) -> f64 {
        self.decrease().sum()
    }

    /// Rendered layout: rows `classes + [Increase, Decrease, Net Change]`,
    /// columns `classes + [Decrease]`.
    fn to_table(&self) -> LabeledTable {
        let classes = self.classes();
        let n = classes.len();
        let decrease = self.decrease();
        let increase = self.increase();
        let net = &increase - &decrease;

        let mut data = Array2::from_elem((n + 3, n + 1), f64::NAN);
        data.slice_mut(s![0..n, 0..n]).assign(&self.cells());
        data.slice_mut(s![0..n, n]).assign(&decrease);
        data.slice_mut(s![n, 0..n]).assign(&increase);
        data[(n, n)] = decrease.sum();
        data.slice_mut(s![n + 1, 0..n]).assign(&decrease);
        data.slice_mut(s![n + 2, 0..n]).assign(&net);

        let mut rows: Vec<String> = classes.names().to_vec();
        rows.extend([INCREASE.to_string(), DECREASE.to_string(), NET_CHANGE.to_string()]);
        let mut cols: Vec<String> = classes.names().to_vec();
        cols.push(DECREASE.to_string());

        LabeledTable::from_parts(self.index_name(), rows, cols, data)
    }
}

fn check_square(classes: &ClassSet, cells: &Array2<f64>) -> Result<()> {
    let n = classes.len();
    if cells.dim() != (n, n) {
        let (r, c) = cells.dim();
        return Err(Error::ShapeMismatch {
            expected: format!("{}x{}", n, n),
            actual: format!("{}x{}", r, c),
        });
    }
    Ok(())
}

/// Transition acreage for one region, period and data version.
#[derive(Debug, Clone)]
pub struct ChangeMatrix {
    key: MatrixKey,
    classes: ClassSet,
    cells: Array2<f64>,
}

impl ChangeMatrix {
    /// Wrap a class × class array.
    ///
    /// Fails if the array is not `n × n` for `n` classes, or if any diagonal
    /// cell is nonzero.
    pub fn new(key: MatrixKey, classes: ClassSet, cells: Array2<f64>) -> Result<Self> {
        check_square(&classes, &cells)?;
        if let Some(i) = (0..classes.len()).find(|&i| cells[(i, i)] != 0.0) {
            return Err(Error::InvalidParameter {
                name: "cells",
                value: format!("{}", cells[(i, i)]),
                reason: format!("diagonal cell for '{}' must be zero", classes.names()[i]),
            });
        }
        Ok(Self { key, classes, cells })
    }

    pub fn key(&self) -> &MatrixKey {
        &self.key
    }

    pub fn period(&self) -> Period {
        self.key.period
    }

    pub fn version(&self) -> &str {
        &self.key.version
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.cells
    }
}

impl TransitionGrid for ChangeMatrix {
    fn classes(&self) -> &ClassSet {
        &self.classes
    }

    fn cells(&self) -> ArrayView2<'_, f64> {
        self.cells.view()
    }

    fn index_name(&self) -> String {
        self.key.period.early.to_string()
    }
}

/// Cell-wise difference of two versions of one change matrix, as a
/// fraction of the newer version's total change.
#[derive(Debug, Clone)]
pub struct DifferenceMatrix {
    pub region: String,
    pub period: Period,
    /// Version the values are anchored to (minuend)
    pub newer: String,
    /// Version subtracted
    pub older: String,
    classes: ClassSet,
    cells: Array2<f64>,
}

impl DifferenceMatrix {
    pub fn new(
        newer: &MatrixKey,
        older_version: impl Into<String>,
        classes: ClassSet,
        cells: Array2<f64>,
    ) -> Result<Self> {
        check_square(&classes, &cells)?;
        Ok(Self {
            region: newer.region.clone(),
            period: newer.period,
            newer: newer.version.clone(),
            older: older_version.into(),
            classes,
            cells,
        })
    }

    /// Sheet name used when rendering, e.g. `2014-2018_2024ed-2022ed`.
    pub fn sheet_name(&self) -> String {
        format!("{}_{}-{}", self.period, self.newer, self.older)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.cells
    }
}

impl TransitionGrid for DifferenceMatrix {
    fn classes(&self) -> &ClassSet {
        &self.classes
    }

    fn cells(&self) -> ArrayView2<'_, f64> {
        self.cells.view()
    }

    fn index_name(&self) -> String {
        self.period.early.to_string()
    }
}
