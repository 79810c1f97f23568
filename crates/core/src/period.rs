//! Survey periods and matrix identity

use std::fmt;

use crate::error::{Error, Result};

/// A consecutive pair of survey years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    pub early: u16,
    pub late: u16,
}

impl Period {
    pub fn new(early: u16, late: u16) -> Result<Self> {
        if early >= late {
            return Err(Error::InvalidParameter {
                name: "period",
                value: format!("{}-{}", early, late),
                reason: "early year must precede late year".into(),
            });
        }
        Ok(Self { early, late })
    }

    /// Periods for every consecutive pair of survey years.
    pub fn consecutive(years: &[u16]) -> Result<Vec<Period>> {
        years
            .windows(2)
            .map(|pair| Period::new(pair[0], pair[1]))
            .collect()
    }

    /// Two-digit year code, e.g. `1418` for 2014-2018.
    pub fn short_code(&self) -> String {
        format!("{:02}{:02}", self.early % 100, self.late % 100)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.early, self.late)
    }
}

/// Identity of one change matrix: region, period and data version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatrixKey {
    pub region: String,
    pub period: Period,
    pub version: String,
}

impl MatrixKey {
    pub fn new(region: impl Into<String>, period: Period, version: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            period,
            version: version.into(),
        }
    }

    /// Sheet name used when rendering, e.g. `2014-2018-2024ed`.
    pub fn sheet_name(&self) -> String {
        format!("{}-{}", self.period, self.version)
    }
}

impl fmt::Display for MatrixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.region, self.period, self.version)
    }
}
