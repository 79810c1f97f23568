//! Static land-cover totals
//!
//! A [`TotalsTable`] maps class → area, with one column per
//! (year, period, version) combination.

use ndarray::{Array2, Axis};

use crate::classes::ClassSet;
use crate::error::{Error, Result};
use crate::period::Period;
use crate::table::LabeledTable;

/// Header of the class column
pub const LAND_COVER: &str = "LandCover";
/// Label of the column-sum row
pub const TOTAL_ACRES: &str = "Total Acres";

/// Column label for a static total, e.g. `2018_1418_2024ed`.
pub fn totals_label(year: u16, period: Period, version: &str) -> String {
    format!("{}_{}_{}", year, period.short_code(), version)
}

/// Area per class, one column per date label.
#[derive(Debug, Clone, Default)]
pub struct TotalsTable {
    classes: Vec<String>,
    columns: Vec<String>,
    values: Array2<f64>,
}

impl TotalsTable {
    /// Build from rows of class labels and a `classes × columns` array.
    pub fn new(classes: Vec<String>, columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if values.dim() != (classes.len(), columns.len()) {
            let (r, c) = values.dim();
            return Err(Error::ShapeMismatch {
                expected: format!("{}x{}", classes.len(), columns.len()),
                actual: format!("{}x{}", r, c),
            });
        }
        for (i, label) in columns.iter().enumerate() {
            if columns[..i].contains(label) {
                return Err(Error::DuplicateColumn(label.clone()));
            }
        }
        for (i, class) in classes.iter().enumerate() {
            if classes[..i].contains(class) {
                return Err(Error::DuplicateClass(class.clone()));
            }
        }
        Ok(Self {
            classes,
            columns,
            values,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Area for a class in a column
    pub fn get(&self, class: &str, column: &str) -> Option<f64> {
        let r = self.classes.iter().position(|c| c == class)?;
        let c = self.columns.iter().position(|c| c == column)?;
        Some(self.values[(r, c)])
    }

    /// Sum of each column (total mapped area per date)
    pub fn column_totals(&self) -> Vec<f64> {
        self.values.sum_axis(Axis(0)).to_vec()
    }

    /// Copy with columns sorted by label
    pub fn sorted_columns(&self) -> Self {
        let mut order: Vec<usize> = (0..self.columns.len()).collect();
        order.sort_by(|&a, &b| self.columns[a].cmp(&self.columns[b]));

        Self {
            classes: self.classes.clone(),
            columns: order.iter().map(|&i| self.columns[i].clone()).collect(),
            values: self.values.select(Axis(1), &order),
        }
    }

    /// Copy with rows in `order`'s class order.
    ///
    /// Classes missing from `order` follow, in their current order.
    pub fn reorder_rows(&self, order: &ClassSet) -> Self {
        let mut rows: Vec<usize> = (0..self.classes.len()).collect();
        rows.sort_by_key(|&i| order.index_of(&self.classes[i]).unwrap_or(usize::MAX));

        Self {
            classes: rows.iter().map(|&i| self.classes[i].clone()).collect(),
            columns: self.columns.clone(),
            values: self.values.select(Axis(0), &rows),
        }
    }

    /// Rendered layout with a trailing [`TOTAL_ACRES`] row.
    pub fn to_table(&self) -> LabeledTable {
        let n = self.classes.len();
        let mut data = Array2::zeros((n + 1, self.columns.len()));
        data.slice_mut(ndarray::s![0..n, ..]).assign(&self.values);
        data.row_mut(n).assign(&self.values.sum_axis(Axis(0)));

        let mut rows = self.classes.clone();
        rows.push(TOTAL_ACRES.to_string());
        LabeledTable::from_parts(LAND_COVER, rows, self.columns.clone(), data)
    }
}
