use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::Manifest;

// ---------------------------------------------------------------------------
// FamilyBucket – one (family size, class) cell
// ---------------------------------------------------------------------------

/// Fare statistics for one (family size, class) combination.
///
/// `passengers` counts the rows with a known fare; the fare statistics are
/// `None` when no fare in the bucket is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyBucket {
    pub family_size: u32,
    pub class: u8,
    pub passengers: u32,
    pub avg_fare: Option<f64>,
    pub min_fare: Option<f64>,
    pub max_fare: Option<f64>,
}

/// Running fare accumulator for one bucket.
#[derive(Default)]
struct FareStats {
    count: u32,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl FareStats {
    fn push(&mut self, fare: f64) {
        self.count += 1;
        self.sum += fare;
        self.min = Some(self.min.map_or(fare, |m| m.min(fare)));
        self.max = Some(self.max.map_or(fare, |m| m.max(fare)));
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fare statistics grouped by (family size, class).
///
/// Family size is siblings/spouses + parents/children + 1. Only observed
/// combinations appear (no zero-filling, unlike the demographics table).
/// Sorted by class, then family size ascending.
pub fn fare_by_family_size(manifest: &Manifest) -> Vec<FamilyBucket> {
    // Keyed (class, family_size) so map order is the output order.
    let mut groups: BTreeMap<(u8, u32), FareStats> = BTreeMap::new();
    for p in &manifest.passengers {
        let stats = groups.entry((p.class, p.family_size())).or_default();
        if let Some(fare) = p.fare {
            stats.push(fare);
        }
    }

    groups
        .into_iter()
        .map(|((class, family_size), stats)| FamilyBucket {
            family_size,
            class,
            passengers: stats.count,
            avg_fare: (stats.count > 0).then(|| stats.sum / f64::from(stats.count)),
            min_fare: stats.min,
            max_fare: stats.max,
        })
        .collect()
}
