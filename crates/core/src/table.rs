//! Labeled tables handed to the rendering layer

use ndarray::Array2;

use crate::error::{Error, Result};

/// A rectangular table of floating-point values with row and column labels.
///
/// Blank cells (no meaningful value) are stored as NaN.
#[derive(Debug, Clone)]
pub struct LabeledTable {
    /// Header of the label column
    pub index_name: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    data: Array2<f64>,
}

impl LabeledTable {
    pub fn new(
        index_name: impl Into<String>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        data: Array2<f64>,
    ) -> Result<Self> {
        let (rows, cols) = data.dim();
        if rows != row_labels.len() || cols != col_labels.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{}x{}", row_labels.len(), col_labels.len()),
                actual: format!("{}x{}", rows, cols),
            });
        }
        Ok(Self {
            index_name: index_name.into(),
            row_labels,
            col_labels,
            data,
        })
    }

    /// Construct without shape validation; callers guarantee the shape.
    pub(crate) fn from_parts(
        index_name: impl Into<String>,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        data: Array2<f64>,
    ) -> Self {
        debug_assert_eq!(data.dim(), (row_labels.len(), col_labels.len()));
        Self {
            index_name: index_name.into(),
            row_labels,
            col_labels,
            data,
        }
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Dimensions as (rows, cols), excluding the label column
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Value at (row, col) by position
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    /// Value by labels
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.col_labels.iter().position(|l| l == col)?;
        self.value(r, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_label() {
        let data = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, f64::NAN]).unwrap();
        let table = LabeledTable::new(
            "LandCover",
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into()],
            data,
        )
        .unwrap();
        assert_eq!(table.get("b", "x"), Some(3.0));
        assert!(table.get("b", "y").unwrap().is_nan());
        assert_eq!(table.get("c", "x"), None);
    }

    #[test]
    fn test_shape_checked() {
        let data = Array2::zeros((2, 3));
        let result = LabeledTable::new("i", vec!["a".into()], vec!["x".into()], data);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }
}
