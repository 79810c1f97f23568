//! Severity tiers for transition review

use ndarray::Array2;
use serde::Deserialize;

/// Review tier of a matrix cell. Ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Normal,
    /// Unlikely transition, verify before accepting
    NeedsReview,
    /// Definitionally impossible transition
    Invalid,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::NeedsReview => "needs_review",
            Self::Invalid => "invalid",
        }
    }
}

/// Per-cell severity tags, indexed like the class × class matrix body.
pub type SeverityGrid = Array2<Severity>;
