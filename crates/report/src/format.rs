//! Display formatting of cell values.

/// Number format of a sheet's value cells.
///
/// Both formats show exact zero as `-`, negatives in parentheses and blank
/// (NaN) cells as empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// One decimal with thousands separators, e.g. `1,234.5`
    Acres,
    /// Fraction shown as a percentage with two decimals, e.g. `12.50%`
    Percent,
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return String::new();
        }
        if value == 0.0 {
            return "-".to_string();
        }

        let magnitude = value.abs();
        let text = match self {
            Self::Acres => group_thousands(&format!("{:.1}", magnitude)),
            Self::Percent => format!("{:.2}%", magnitude * 100.0),
        };

        if value < 0.0 {
            format!("({})", text)
        } else {
            text
        }
    }
}

/// Insert `,` between groups of three integer digits.
fn group_thousands(number: &str) -> String {
    let (int, frac) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    let mut grouped = String::with_capacity(number.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acres() {
        assert_eq!(NumberFormat::Acres.format(1234567.89), "1,234,567.9");
        assert_eq!(NumberFormat::Acres.format(999.94), "999.9");
        assert_eq!(NumberFormat::Acres.format(0.0004), "0.0");
        assert_eq!(NumberFormat::Acres.format(-1500.0), "(1,500.0)");
    }

    #[test]
    fn test_percent() {
        assert_eq!(NumberFormat::Percent.format(0.125), "12.50%");
        assert_eq!(NumberFormat::Percent.format(-0.5), "(50.00%)");
    }

    #[test]
    fn test_zero_and_blank() {
        assert_eq!(NumberFormat::Acres.format(0.0), "-");
        assert_eq!(NumberFormat::Percent.format(-0.0), "-");
        assert_eq!(NumberFormat::Acres.format(f64::NAN), "");
    }
}
