//! Cell tagging

use ndarray::Array2;

use lccqa_core::{Result, Severity, SeverityGrid, TransitionGrid};

use super::rules::RuleTable;

/// Tag every cell of a matrix with its severity tier.
///
/// Tiers are visited highest first and a cell keeps the first tier that
/// claims it. Only cells with a value strictly greater than zero are
/// tagged; an unrealized listed transition stays `Normal`. The result
/// depends only on the matrix values and the rules.
///
/// # Errors
/// `UnknownClass` if a rule names a class the matrix is not indexed by.
pub fn classify<G>(grid: &G, rules: &RuleTable) -> Result<SeverityGrid>
where
    G: TransitionGrid + ?Sized,
{
    let classes = grid.classes();
    let cells = grid.cells();
    let n = classes.len();
    let mut tags = Array2::from_elem((n, n), Severity::Normal);

    for (tier, pairs) in rules.tiers() {
        for (early, late) in pairs {
            let r = classes.require(early, "severity rule")?;
            let c = classes.require(late, "severity rule")?;
            if cells[(r, c)] > 0.0 && tags[(r, c)] == Severity::Normal {
                tags[(r, c)] = tier;
            }
        }
    }

    Ok(tags)
}

/// A tagged cell, for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedTransition {
    pub early: String,
    pub late: String,
    pub value: f64,
    pub severity: Severity,
}

/// Cells tagged above `Normal`, most severe first then in matrix order.
pub fn flagged<G>(grid: &G, tags: &SeverityGrid) -> Vec<FlaggedTransition>
where
    G: TransitionGrid + ?Sized,
{
    let classes = grid.classes();
    let cells = grid.cells();
    let mut out: Vec<FlaggedTransition> = tags
        .indexed_iter()
        .filter(|(_, &tag)| tag != Severity::Normal)
        .map(|((r, c), &severity)| FlaggedTransition {
            early: classes.names()[r].clone(),
            late: classes.names()[c].clone(),
            value: cells[(r, c)],
            severity,
        })
        .collect();
    // stable sort keeps matrix order within a tier
    out.sort_by(|a, b| b.severity.cmp(&a.severity));
    out
}

/// Number of cells per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub normal: usize,
    pub needs_review: usize,
    pub invalid: usize,
}

impl SeverityCounts {
    pub fn from_tags(tags: &SeverityGrid) -> Self {
        let mut counts = Self::default();
        for tag in tags.iter() {
            match tag {
                Severity::Normal => counts.normal += 1,
                Severity::NeedsReview => counts.needs_review += 1,
                Severity::Invalid => counts.invalid += 1,
            }
        }
        counts
    }

    pub fn flagged(&self) -> usize {
        self.needs_review + self.invalid
    }
}
