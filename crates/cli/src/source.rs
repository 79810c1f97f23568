//! Attribute-table and region-list loading.
//!
//! Attribute tables are read from delimited-text exports with a header row.
//! Only the `Value` and `Count` columns are used; header matching is
//! case-insensitive and other columns are ignored.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use lccqa_core::{Error, Result};

/// Read `(Value, Count)` rows from an attribute-table export.
///
/// A missing file is [`Error::MissingSource`]; the caller decides whether
/// that aborts the region. Malformed content is [`Error::InvalidParameter`].
pub fn read_attribute_table(path: &Path) -> Result<Vec<(i64, f64)>> {
    if !path.is_file() {
        return Err(Error::MissingSource {
            path: path.display().to_string(),
        });
    }
    let text = fs::read_to_string(path)?;
    parse_attribute_table(&text)
}

/// Parse attribute-table text; see [`read_attribute_table`].
pub fn parse_attribute_table(text: &str) -> Result<Vec<(i64, f64)>> {
    let mut lines = strip_bom(text).lines().filter(|l| !l.trim().is_empty());
    let header = split_record(lines.next().unwrap_or_default());
    let value_col = find_column(&header, "value")?;
    let count_col = find_column(&header, "count")?;

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields = split_record(line);
        let field = |col: usize| fields.get(col).map(String::as_str).unwrap_or_default();
        let value: i64 = field(value_col).parse().map_err(|_| bad_field("Value", i + 2, line))?;
        let count: f64 = field(count_col).parse().map_err(|_| bad_field("Count", i + 2, line))?;
        rows.push((value, count));
    }
    Ok(rows)
}

/// Read the named column of a delimited-text region list.
pub fn read_region_list(path: &Path, column: &str) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read region list {}", path.display()))?;
    let mut lines = strip_bom(&text).lines().filter(|l| !l.trim().is_empty());
    let header = split_record(lines.next().unwrap_or_default());
    let Some(col) = header.iter().position(|h| h == column) else {
        bail!("Column '{}' not found in {}", column, path.display());
    };

    let mut regions = Vec::new();
    for line in lines {
        let fields = split_record(line);
        match fields.get(col) {
            Some(region) if !region.is_empty() => {
                if !regions.contains(region) {
                    regions.push(region.clone());
                }
            }
            _ => {}
        }
    }
    Ok(regions)
}

fn find_column(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidParameter {
            name: "header",
            value: header.join(","),
            reason: format!("missing '{}' column", name),
        })
}

fn bad_field(name: &'static str, line_no: usize, line: &str) -> Error {
    Error::InvalidParameter {
        name,
        value: line.to_string(),
        reason: format!("unparseable field on line {}", line_no),
    }
}

/// Spreadsheet exports often start with a UTF-8 byte-order mark.
fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Split one comma-separated record, honoring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
