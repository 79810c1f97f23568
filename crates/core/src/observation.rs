//! Transition observations and the transition-code lookup
//!
//! A raster attribute table reports one `(Value, Count)` row per transition
//! code. [`TransitionCodes`] turns those codes into class pairs, producing
//! [`TransitionObservation`]s for aggregation.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Square meters in one acre.
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.86;

/// Separator between early and late class in a transition label.
const TRANSITION_SEPARATOR: &str = " to ";

/// One raw transition record.
///
/// `late` is `None` for stable pixels (no change between the two dates).
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionObservation {
    pub early: String,
    pub late: Option<String>,
    /// Number of counted units (square meters for 1 m pixels)
    pub count: f64,
}

impl TransitionObservation {
    pub fn new(early: impl Into<String>, late: impl Into<String>, count: f64) -> Self {
        Self {
            early: early.into(),
            late: Some(late.into()),
            count,
        }
    }

    /// A stable (unchanged) observation
    pub fn stable(class: impl Into<String>, count: f64) -> Self {
        Self {
            early: class.into(),
            late: None,
            count,
        }
    }

    /// Late class, falling back to the early class for stable pixels.
    pub fn late_or_early(&self) -> &str {
        self.late.as_deref().unwrap_or(&self.early)
    }

    /// Area in acres, given the area of one counted unit in square meters.
    pub fn acres(&self, unit_area: f64) -> f64 {
        self.count * unit_area / SQUARE_METERS_PER_ACRE
    }
}

/// Lookup from transition code to `(early, late)` class names.
#[derive(Debug, Clone, Default)]
pub struct TransitionCodes {
    codes: HashMap<i64, (String, Option<String>)>,
}

impl TransitionCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a code from its label.
    ///
    /// The label is `"Early to Late"` for a change, or a bare class name for
    /// a stable pixel.
    pub fn insert(&mut self, code: i64, label: &str) -> Result<()> {
        let parsed = parse_label(label)?;
        if self.codes.insert(code, parsed).is_some() {
            return Err(Error::InvalidParameter {
                name: "code",
                value: code.to_string(),
                reason: "defined twice".into(),
            });
        }
        Ok(())
    }

    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, &'a str)>,
    {
        let mut codes = Self::new();
        for (code, label) in entries {
            codes.insert(code, label)?;
        }
        Ok(codes)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Early and late class for a code.
    pub fn get(&self, code: i64) -> Option<(&str, Option<&str>)> {
        self.codes
            .get(&code)
            .map(|(early, late)| (early.as_str(), late.as_deref()))
    }

    /// Build an observation from an attribute-table row.
    pub fn observation(&self, code: i64, count: f64) -> Result<TransitionObservation> {
        let (early, late) = self
            .codes
            .get(&code)
            .ok_or(Error::UnknownTransitionCode(code))?;
        Ok(TransitionObservation {
            early: early.clone(),
            late: late.clone(),
            count,
        })
    }

    /// Convert every `(code, count)` row, failing on the first unknown code.
    pub fn observations<I>(&self, rows: I) -> Result<Vec<TransitionObservation>>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        rows.into_iter()
            .map(|(code, count)| self.observation(code, count))
            .collect()
    }
}

fn parse_label(label: &str) -> Result<(String, Option<String>)> {
    let label = label.trim();
    if label.is_empty() {
        return Err(Error::InvalidParameter {
            name: "class",
            value: String::new(),
            reason: "empty transition label".into(),
        });
    }
    Ok(match label.split_once(TRANSITION_SEPARATOR) {
        Some((early, late)) => (early.trim().to_string(), Some(late.trim().to_string())),
        None => (label.to_string(), None),
    })
}
