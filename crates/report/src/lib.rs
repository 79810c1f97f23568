//! # lccqa Report
//!
//! Rendering of change matrices, difference matrices and totals tables for
//! human review.
//!
//! Each table becomes a [`Sheet`]; a [`Workbook`] collects the sheets of one
//! region and writes them as a single HTML page, with flagged cells filled
//! using the [`Palette`] colors, and as one CSV file per sheet.
//!
//! ## Usage
//!
//! ```ignore
//! use lccqa_report::{Palette, Sheet, Workbook};
//!
//! let mut book = Workbook::new("caro_51033", Palette::default());
//! book.push(Sheet::matrix(&matrix, Some(tags)));
//! book.save_html("caro_51033_LCC_QA.html")?;
//! ```

mod format;
mod render;
mod scheme;

pub use format::NumberFormat;
pub use render::{Sheet, SheetKind, Workbook};
pub use scheme::{Palette, Rgb};
