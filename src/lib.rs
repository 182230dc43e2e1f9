//! Descriptive statistics and declarative chart specifications over the
//! Titanic passenger manifest.
//!
//! Two ways in:
//! * The pure functions under [`analysis`] take an already-loaded
//!   [`Manifest`] and are the place for callers that manage loading
//!   themselves (or fetch the table remotely and parse it through
//!   [`data::loader::load_manifest_reader`]).
//! * The crate-root entry points below take a [`ManifestSource`] and reload
//!   the file on every call. They hold no state, so repeated calls over an
//!   unchanged file yield identical tables.
//!
//! [`Manifest`]: data::model::Manifest
//! [`ManifestSource`]: data::model::ManifestSource

pub mod analysis;
pub mod chart;
pub mod data;

pub use data::loader::LoadError;
pub use data::model::{AgeBracket, Manifest, ManifestSource, Passenger, Sex};

use analysis::age_division::{self, AgeDivision, AgeDivisionBucket};
use analysis::demographics::{self, DemographicBucket};
use analysis::family::{self, FamilyBucket};
use analysis::surname::{self, SurnameCount};

// ---------------------------------------------------------------------------
// Load-and-compute entry points
// ---------------------------------------------------------------------------

/// Survival counts and rates by (class, sex, age bracket), zero-filled over
/// the full combination cross-product.
pub fn survival_demographics(
    source: &ManifestSource,
) -> Result<Vec<DemographicBucket>, LoadError> {
    Ok(demographics::survival_by_demographics(&source.load()?))
}

/// Fare statistics by (family size, class).
pub fn family_groups(source: &ManifestSource) -> Result<Vec<FamilyBucket>, LoadError> {
    Ok(family::fare_by_family_size(&source.load()?))
}

/// Surname frequencies, most common first.
pub fn last_names(source: &ManifestSource) -> Result<Vec<SurnameCount>, LoadError> {
    Ok(surname::surname_counts(&source.load()?))
}

/// Per-passenger older/younger-than-class-median classification.
pub fn determine_age_division(
    source: &ManifestSource,
) -> Result<Vec<AgeDivision>, LoadError> {
    Ok(age_division::classify_age_division(&source.load()?))
}

/// Survival counts by (class, age division), over classified passengers only.
pub fn age_division_summary(
    source: &ManifestSource,
) -> Result<Vec<AgeDivisionBucket>, LoadError> {
    Ok(age_division::survival_by_age_division(&source.load()?))
}
