//! Outer-join merge of totals tables

use ndarray::Array2;
use tracing::debug;

use lccqa_core::{Result, TotalsTable};

/// Outer-join two totals tables on class, zero-filling gaps.
///
/// Rows keep first-appearance order: `left`'s classes, then classes found
/// only in `right`. Use [`TotalsTable::reorder_rows`] to restore registry
/// order. Columns are `left`'s followed by `right`'s; a label
/// present in both fails with `DuplicateColumn`.
pub fn merge_totals(left: &TotalsTable, right: &TotalsTable) -> Result<TotalsTable> {
    let mut classes: Vec<String> = left.classes().to_vec();
    for class in right.classes() {
        if !classes.contains(class) {
            classes.push(class.clone());
        }
    }

    let mut columns: Vec<String> = left.columns().to_vec();
    columns.extend(right.columns().iter().cloned());

    let left_cols = left.columns().len();
    let mut values = Array2::zeros((classes.len(), columns.len()));
    for (source, offset) in [(left, 0), (right, left_cols)] {
        for (r, class) in source.classes().iter().enumerate() {
            let Some(out) = classes.iter().position(|c| c == class) else {
                continue;
            };
            for c in 0..source.columns().len() {
                values[(out, offset + c)] = source.values()[(r, c)];
            }
        }
    }

    TotalsTable::new(classes, columns, values)
}

/// Merge any number of totals tables, left to right.
pub fn merge_all<'a, I>(tables: I) -> Result<TotalsTable>
where
    I: IntoIterator<Item = &'a TotalsTable>,
{
    let mut merged = TotalsTable::default();
    let mut count = 0;
    for table in tables {
        merged = merge_totals(&merged, table)?;
        count += 1;
    }
    debug!(
        "Merged {} totals tables: {} classes, {} columns",
        count,
        merged.classes().len(),
        merged.columns().len()
    );
    Ok(merged)
}
