//! Sheet and workbook rendering.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use lccqa_core::matrix::{DECREASE, INCREASE, NET_CHANGE};
use lccqa_core::{
    ChangeMatrix, DifferenceMatrix, LabeledTable, Result, Severity, SeverityGrid, TotalsTable,
    TransitionGrid,
};

use crate::format::NumberFormat;
use crate::scheme::Palette;

/// Kind of table a sheet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Matrix,
    Difference,
    Totals,
}

impl SheetKind {
    pub fn number_format(&self) -> NumberFormat {
        match self {
            Self::Difference => NumberFormat::Percent,
            Self::Matrix | Self::Totals => NumberFormat::Acres,
        }
    }

    /// Value column width in characters
    fn column_width(&self) -> usize {
        match self {
            Self::Totals => 18,
            Self::Matrix | Self::Difference => 12,
        }
    }

    /// Label column width in characters
    fn index_width(&self) -> usize {
        match self {
            Self::Totals => 35,
            Self::Matrix | Self::Difference => 12,
        }
    }
}

/// One rendered table with optional per-cell severity tags.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub kind: SheetKind,
    pub table: LabeledTable,
    /// Tags for the class × class body; margin cells are never tagged
    pub tags: Option<SeverityGrid>,
}

impl Sheet {
    pub fn matrix(matrix: &ChangeMatrix, tags: Option<SeverityGrid>) -> Self {
        Self {
            name: matrix.key().sheet_name(),
            kind: SheetKind::Matrix,
            table: matrix.to_table(),
            tags,
        }
    }

    pub fn difference(diff: &DifferenceMatrix, tags: Option<SeverityGrid>) -> Self {
        Self {
            name: diff.sheet_name(),
            kind: SheetKind::Difference,
            table: diff.to_table(),
            tags,
        }
    }

    pub fn totals(name: impl Into<String>, totals: &TotalsTable) -> Self {
        Self {
            name: name.into(),
            kind: SheetKind::Totals,
            table: totals.to_table(),
            tags: None,
        }
    }

    /// Severity of the cell at (row, col); `Normal` outside the tagged body.
    pub fn severity(&self, row: usize, col: usize) -> Severity {
        self.tags
            .as_ref()
            .and_then(|tags| tags.get((row, col)).copied())
            .unwrap_or_default()
    }

    /// Formatted text of the cell at (row, col)
    pub fn display(&self, row: usize, col: usize) -> String {
        let value = self.table.value(row, col).unwrap_or(f64::NAN);
        self.kind.number_format().format(value)
    }

    /// Write the raw values as CSV: label column first, blanks empty.
    pub fn write_csv<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let header: Vec<String> = std::iter::once(self.table.index_name.as_str())
            .chain(self.table.col_labels().iter().map(String::as_str))
            .map(csv_field)
            .collect();
        writeln!(w, "{}", header.join(","))?;

        for (r, label) in self.table.row_labels().iter().enumerate() {
            let mut fields = vec![csv_field(label)];
            for value in self.table.data().row(r) {
                fields.push(if value.is_nan() {
                    String::new()
                } else {
                    value.to_string()
                });
            }
            writeln!(w, "{}", fields.join(","))?;
        }
        Ok(())
    }

    fn write_html<W: Write>(&self, w: &mut W, palette: &Palette) -> std::io::Result<()> {
        let width = self.kind.column_width();
        writeln!(w, "<section id=\"{}\">", escape(&self.name))?;
        writeln!(w, "<h2>{}</h2>", escape(&self.name))?;
        writeln!(w, "<table>")?;

        write!(
            w,
            "<tr><th style=\"min-width:{}ch\">{}</th>",
            self.kind.index_width(),
            escape(&self.table.index_name)
        )?;
        for label in self.table.col_labels() {
            write!(w, "<th style=\"min-width:{}ch\">{}</th>", width, escape(label))?;
        }
        writeln!(w, "</tr>")?;

        for (r, label) in self.table.row_labels().iter().enumerate() {
            let margin = [INCREASE, DECREASE, NET_CHANGE].contains(&label.as_str());
            write!(w, "<tr><th>{}</th>", escape(label))?;
            for c in 0..self.table.col_labels().len() {
                let mut style = String::new();
                if let Some(color) = palette.fill(self.severity(r, c)) {
                    style.push_str(&format!("background:#{};", color.to_hex()));
                }
                if margin {
                    style.push_str("font-weight:bold;");
                }
                if style.is_empty() {
                    write!(w, "<td>{}</td>", escape(&self.display(r, c)))?;
                } else {
                    write!(w, "<td style=\"{}\">{}</td>", style, escape(&self.display(r, c)))?;
                }
            }
            writeln!(w, "</tr>")?;
        }

        writeln!(w, "</table>")?;
        writeln!(w, "</section>")
    }
}

/// The sheets of one region's review report.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub title: String,
    palette: Palette,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(title: impl Into<String>, palette: Palette) -> Self {
        Self {
            title: title.into(),
            palette,
            sheets: Vec::new(),
        }
    }

    /// Append a sheet, replacing any sheet with the same name.
    pub fn push(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn write_html<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html><head><meta charset=\"utf-8\">")?;
        writeln!(w, "<title>{}</title>", escape(&self.title))?;
        writeln!(
            w,
            "<style>table{{border-collapse:collapse}}th,td{{border:1px solid #000;padding:2px 6px}}td{{text-align:right}}</style>"
        )?;
        writeln!(w, "</head><body>")?;
        writeln!(w, "<h1>{}</h1>", escape(&self.title))?;
        for sheet in &self.sheets {
            sheet.write_html(w, &self.palette)?;
        }
        writeln!(w, "</body></html>")
    }

    /// Write the whole workbook as one HTML file.
    pub fn save_html<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut w = BufWriter::new(File::create(path)?);
        self.write_html(&mut w)?;
        w.flush()?;
        debug!("Wrote {} sheets to {}", self.sheets.len(), path.display());
        Ok(())
    }

    /// Write every sheet as `<dir>/<sheet>.csv`, creating `dir` if needed.
    pub fn save_csv<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        for sheet in &self.sheets {
            let path = dir.join(format!("{}.csv", sheet.name));
            let mut w = BufWriter::new(File::create(&path)?);
            sheet.write_csv(&mut w)?;
            w.flush()?;
        }
        debug!("Wrote {} CSV sheets to {}", self.sheets.len(), dir.display());
        Ok(())
    }
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lccqa_core::{ClassSet, MatrixKey, Period};
    use ndarray::Array2;

    fn matrix() -> ChangeMatrix {
        let classes = ClassSet::new(["W", "F"]).unwrap();
        let key = MatrixKey::new("r", Period::new(2014, 2018).unwrap(), "2024ed");
        let cells = Array2::from_shape_vec((2, 2), vec![0.0, 1500.26, 0.0, 0.0]).unwrap();
        ChangeMatrix::new(key, classes, cells).unwrap()
    }

    fn tagged_sheet() -> Sheet {
        let mut tags = Array2::from_elem((2, 2), Severity::Normal);
        tags[(0, 1)] = Severity::Invalid;
        Sheet::matrix(&matrix(), Some(tags))
    }

    #[test]
    fn test_sheet_cells() {
        let sheet = tagged_sheet();
        assert_eq!(sheet.name, "2014-2018-2024ed");
        assert_eq!(sheet.display(0, 1), "1,500.3");
        assert_eq!(sheet.display(0, 0), "-");
        // Decrease row, Decrease column is blank
        assert_eq!(sheet.display(3, 2), "");
        assert_eq!(sheet.severity(0, 1), Severity::Invalid);
        assert_eq!(sheet.severity(2, 1), Severity::Normal);
    }

    #[test]
    fn test_csv() {
        let mut buf = Vec::new();
        tagged_sheet().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "2014,W,F,Decrease");
        assert_eq!(lines[1], "W,0,1500.26,1500.26");
        assert_eq!(lines[3], "Increase,0,1500.26,1500.26");
        assert_eq!(lines[4], "Decrease,1500.26,0,");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_html_highlights() {
        let mut book = Workbook::new("r", Palette::default());
        book.push(tagged_sheet());
        let mut buf = Vec::new();
        book.write_html(&mut buf).unwrap();
        let html = String::from_utf8(buf).unwrap();

        assert!(html.contains("<td style=\"background:#FF0000;\">1,500.3</td>"));
        assert!(html.contains("<h2>2014-2018-2024ed</h2>"));
        assert!(html.contains("font-weight:bold;"));
    }

    #[test]
    fn test_push_replaces_same_name() {
        let mut book = Workbook::new("r", Palette::default());
        book.push(tagged_sheet());
        book.push(Sheet::matrix(&matrix(), None));
        assert_eq!(book.sheets().len(), 1);
        assert!(book.sheets()[0].tags.is_none());
    }

    #[test]
    fn test_save_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = Workbook::new("r", Palette::default());
        book.push(tagged_sheet());

        let html = dir.path().join("r_LCC_QA.html");
        book.save_html(&html).unwrap();
        book.save_csv(dir.path().join("r_LCC_QA")).unwrap();

        assert!(html.exists());
        assert!(dir.path().join("r_LCC_QA").join("2014-2018-2024ed.csv").exists());
    }
}
