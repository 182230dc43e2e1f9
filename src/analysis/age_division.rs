use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::Manifest;

// ---------------------------------------------------------------------------
// AgeDivision – per-passenger classification
// ---------------------------------------------------------------------------

/// One passenger's position relative to their class's median age.
///
/// `older_than_class_median` is `None` when the passenger's age is unknown;
/// such records must be excluded from any grouping over the flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDivision {
    pub passenger_id: u32,
    pub class: u8,
    pub age: Option<f64>,
    pub survived: bool,
    pub older_than_class_median: Option<bool>,
}

/// Survival counts for one (class, age division) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeDivisionBucket {
    pub class: u8,
    /// Whether the cell covers passengers older than their class median.
    pub older: bool,
    pub survived: bool,
    pub passengers: u32,
}

// ---------------------------------------------------------------------------
// Medians
// ---------------------------------------------------------------------------

/// Median known age per class, midpoint interpolation for even counts.
/// Classes with no known ages are absent from the map.
pub fn class_median_ages(manifest: &Manifest) -> BTreeMap<u8, f64> {
    let mut ages_by_class: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for p in &manifest.passengers {
        if let Some(age) = p.age {
            ages_by_class.entry(p.class).or_default().push(age);
        }
    }

    ages_by_class
        .into_iter()
        .map(|(class, mut ages)| {
            ages.sort_by(f64::total_cmp);
            let n = ages.len();
            let median = if n % 2 == 1 {
                ages[n / 2]
            } else {
                (ages[n / 2 - 1] + ages[n / 2]) / 2.0
            };
            (class, median)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Flag every passenger as strictly older than their class's median age.
/// An age exactly at the median flags `Some(false)`.
pub fn classify_age_division(manifest: &Manifest) -> Vec<AgeDivision> {
    let medians = class_median_ages(manifest);
    manifest
        .passengers
        .iter()
        .map(|p| AgeDivision {
            passenger_id: p.id,
            class: p.class,
            age: p.age,
            survived: p.survived,
            older_than_class_median: match (p.age, medians.get(&p.class)) {
                (Some(age), Some(&median)) => Some(age > median),
                _ => None,
            },
        })
        .collect()
}

/// Survival counts grouped by (class, age division, survived), counting only
/// passengers with a defined division flag. Sorted by class, then younger
/// before older, then non-survivors before survivors.
pub fn survival_by_age_division(manifest: &Manifest) -> Vec<AgeDivisionBucket> {
    let mut counts: BTreeMap<(u8, bool, bool), u32> = BTreeMap::new();
    for division in classify_age_division(manifest) {
        let Some(older) = division.older_than_class_median else {
            continue;
        };
        *counts
            .entry((division.class, older, division.survived))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((class, older, survived), passengers)| AgeDivisionBucket {
            class,
            older,
            survived,
            passengers,
        })
        .collect()
}
