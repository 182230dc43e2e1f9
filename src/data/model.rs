use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use super::loader::{self, LoadError};

// ---------------------------------------------------------------------------
// Sex – the manifest's sex column
// ---------------------------------------------------------------------------

/// Passenger sex as recorded on the manifest.
///
/// `Female` is declared first so the derived `Ord` matches the lexical order
/// of the source strings ("female" < "male"), which is the order grouped
/// output is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "female"),
            Sex::Male => write!(f, "male"),
        }
    }
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// AgeBracket – ordered life-stage categories
// ---------------------------------------------------------------------------

/// Life-stage category derived from age with right-inclusive bin edges:
/// Child [0, 12], Teen (12, 19], Adult (19, 59], Senior (59, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeBracket {
    Child,
    Teen,
    Adult,
    Senior,
}

impl AgeBracket {
    /// All brackets in their declared (ascending-age) order.
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Child,
        AgeBracket::Teen,
        AgeBracket::Adult,
        AgeBracket::Senior,
    ];

    /// Classify an age, or `None` when it falls outside [0, 100].
    pub fn from_age(age: f64) -> Option<AgeBracket> {
        if age < 0.0 {
            None
        } else if age <= 12.0 {
            Some(AgeBracket::Child)
        } else if age <= 19.0 {
            Some(AgeBracket::Teen)
        } else if age <= 59.0 {
            Some(AgeBracket::Adult)
        } else if age <= 100.0 {
            Some(AgeBracket::Senior)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Child => "Child",
            AgeBracket::Teen => "Teen",
            AgeBracket::Adult => "Adult",
            AgeBracket::Senior => "Senior",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the manifest
// ---------------------------------------------------------------------------

/// A single passenger (one parsed row of the source table).
///
/// Optional fields model the manifest's missing values explicitly; exclusion
/// rules downstream key off `None` rather than sentinels.
#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    pub id: u32,
    /// Travel class, 1 (first) through 3 (third).
    pub class: u8,
    pub sex: Sex,
    pub age: Option<f64>,
    /// Siblings and spouses aboard.
    pub siblings_spouses: u32,
    /// Parents and children aboard.
    pub parents_children: u32,
    pub fare: Option<f64>,
    /// Full name as recorded, "Surname, Title Given...".
    pub name: String,
    pub survived: bool,
}

impl Passenger {
    /// Travelling relatives plus the passenger themselves. Always >= 1.
    pub fn family_size(&self) -> u32 {
        self.siblings_spouses + self.parents_children + 1
    }

    /// Age bracket, or `None` when the age is missing or out of range.
    pub fn age_bracket(&self) -> Option<AgeBracket> {
        self.age.and_then(AgeBracket::from_age)
    }

    /// Surname: the part of the name before the first comma, trimmed.
    /// Names without a comma fall back to the whole (trimmed) name.
    pub fn surname(&self) -> &str {
        match self.name.split_once(',') {
            Some((last, _)) => last.trim(),
            None => self.name.trim(),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed passenger table.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub passengers: Vec<Passenger>,
}

impl Manifest {
    pub fn new(passengers: Vec<Passenger>) -> Self {
        Manifest { passengers }
    }

    /// Sorted set of travel classes observed in the data.
    pub fn classes(&self) -> BTreeSet<u8> {
        self.passengers.iter().map(|p| p.class).collect()
    }

    /// Sorted set of sexes observed in the data.
    pub fn sexes(&self) -> BTreeSet<Sex> {
        self.passengers.iter().map(|p| p.sex).collect()
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the manifest is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ManifestSource – where the table comes from
// ---------------------------------------------------------------------------

/// A manifest file location. `load` re-reads and re-parses the file on every
/// call; the aggregation entry points hold no state between invocations.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ManifestSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the source file into a fresh [`Manifest`].
    pub fn load(&self) -> Result<Manifest, LoadError> {
        loader::load_manifest(&self.path)
    }
}
