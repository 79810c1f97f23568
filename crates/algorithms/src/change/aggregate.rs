//! Transition aggregation
//!
//! Converts raw `(early, late, count)` observations into acreage and sums
//! them per class pair. Class names are resolved through the registry, so
//! abbreviations (when configured) are applied here.

use std::collections::BTreeMap;

use lccqa_core::observation::TransitionObservation;
use lccqa_core::{ClassRegistry, ClassSet, Error, Result};

/// Parameters for aggregation
#[derive(Debug, Clone)]
pub struct AggregateParams {
    /// Area of one counted unit in square meters
    pub unit_area: f64,
}

impl Default for AggregateParams {
    fn default() -> Self {
        Self { unit_area: 1.0 }
    }
}

/// Summed acreage per (early, late) class pair.
///
/// Keys are positions in [`classes`](Self::classes), which index
/// [`full_classes`](Self::full_classes) identically. Stable observations
/// land on the diagonal.
#[derive(Debug, Clone)]
pub struct TransitionAreas {
    classes: ClassSet,
    full_classes: ClassSet,
    areas: BTreeMap<(usize, usize), f64>,
}

impl TransitionAreas {
    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    /// Unabbreviated class names, same positions as [`classes`](Self::classes)
    pub fn full_classes(&self) -> &ClassSet {
        &self.full_classes
    }

    /// Acreage for an early → late pair, by class position
    pub fn get(&self, early: usize, late: usize) -> Option<f64> {
        self.areas.get(&(early, late)).copied()
    }

    /// Acreage for an early → late pair, by class name
    pub fn get_by_name(&self, early: &str, late: &str) -> Option<f64> {
        let r = self.classes.index_of(early)?;
        let c = self.classes.index_of(late)?;
        self.get(r, c)
    }

    /// Iterate `((early, late), acres)` in class-position order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.areas.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of distinct class pairs
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Total mapped area, changed or not
    pub fn total_area(&self) -> f64 {
        self.areas.values().sum()
    }
}

/// Aggregate observations into acreage per class pair.
///
/// Both classes of every observation must resolve in the registry; an
/// unresolved class fails with [`Error::UnknownClass`] rather than dropping
/// its area.
///
/// # Arguments
/// * `observations` - Raw transition records for one period and version
/// * `registry` - Class registry (with optional abbreviations)
/// * `params` - Unit area conversion
pub fn aggregate(
    observations: &[TransitionObservation],
    registry: &ClassRegistry,
    params: AggregateParams,
) -> Result<TransitionAreas> {
    if !(params.unit_area.is_finite() && params.unit_area > 0.0) {
        return Err(Error::InvalidParameter {
            name: "unit_area",
            value: params.unit_area.to_string(),
            reason: "must be a positive finite area".into(),
        });
    }

    let mut areas: BTreeMap<(usize, usize), f64> = BTreeMap::new();

    for obs in observations {
        if !(obs.count.is_finite() && obs.count >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "count",
                value: obs.count.to_string(),
                reason: format!("invalid count for {} observation", obs.early),
            });
        }

        let early = registry.resolve(&obs.early, "early class of observation")?;
        let late = match &obs.late {
            Some(late) => registry.resolve(late, "late class of observation")?,
            None => early,
        };

        *areas.entry((early, late)).or_insert(0.0) += obs.acres(params.unit_area);
    }

    Ok(TransitionAreas {
        classes: registry.classes().clone(),
        full_classes: registry.full_classes().clone(),
        areas,
    })
}
