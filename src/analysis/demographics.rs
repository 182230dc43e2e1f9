use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{AgeBracket, Manifest, Sex};

// ---------------------------------------------------------------------------
// DemographicBucket – one (class, sex, age bracket) cell
// ---------------------------------------------------------------------------

/// Survival counts for one (class, sex, age bracket) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicBucket {
    pub class: u8,
    pub sex: Sex,
    pub bracket: AgeBracket,
    pub passengers: u32,
    pub survivors: u32,
    /// survivors / passengers, defined as 0.0 for empty buckets.
    pub survival_rate: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Survival counts and rates over the full cross-product of observed classes
/// × observed sexes × the four age brackets.
///
/// Passengers without a usable age carry no bracket and are excluded from the
/// counts. Combinations never observed in the data still appear, zero-filled:
/// the output always has |classes| × |sexes| × 4 rows, sorted by class, sex
/// (female first), then bracket in ascending-age order.
pub fn survival_by_demographics(manifest: &Manifest) -> Vec<DemographicBucket> {
    // Grouped counts: (class, sex, bracket) → (passengers, survivors).
    let mut counts: BTreeMap<(u8, Sex, AgeBracket), (u32, u32)> = BTreeMap::new();
    for p in &manifest.passengers {
        let Some(bracket) = p.age_bracket() else {
            continue;
        };
        let entry = counts.entry((p.class, p.sex, bracket)).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += u32::from(p.survived);
    }

    // Explicit cross-product, left-joined with the grouped counts. BTreeSet
    // iteration plus the bracket array give the required sort order directly.
    let mut buckets = Vec::new();
    for &class in &manifest.classes() {
        for &sex in &manifest.sexes() {
            for bracket in AgeBracket::ALL {
                let (passengers, survivors) =
                    counts.get(&(class, sex, bracket)).copied().unwrap_or((0, 0));
                let survival_rate = if passengers > 0 {
                    f64::from(survivors) / f64::from(passengers)
                } else {
                    0.0
                };
                buckets.push(DemographicBucket {
                    class,
                    sex,
                    bracket,
                    passengers,
                    survivors,
                    survival_rate,
                });
            }
        }
    }
    buckets
}
