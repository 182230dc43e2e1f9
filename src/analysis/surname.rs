use std::collections::HashMap;

use serde::Serialize;

use crate::data::model::Manifest;

// ---------------------------------------------------------------------------
// SurnameCount
// ---------------------------------------------------------------------------

/// Occurrence count for one surname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurnameCount {
    pub surname: String,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Surname frequencies over the whole manifest, ordered by descending count.
///
/// Every passenger contributes exactly one surname (the part of the name
/// before the first comma, or the whole name when there is none), so the
/// counts sum to the number of passengers. Equal counts keep first-encounter
/// order: accumulation runs in manifest order and the sort is stable.
pub fn surname_counts(manifest: &Manifest) -> Vec<SurnameCount> {
    let mut counts: Vec<SurnameCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for p in &manifest.passengers {
        let surname = p.surname();
        match index.get(surname) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(surname.to_string(), counts.len());
                counts.push(SurnameCount {
                    surname: surname.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Passenger, Sex};

    fn passenger(name: &str) -> Passenger {
        Passenger {
            id: 0,
            class: 3,
            sex: Sex::Female,
            age: None,
            siblings_spouses: 0,
            parents_children: 0,
            fare: None,
            name: name.to_string(),
            survived: true,
        }
    }

    fn manifest(names: &[&str]) -> Manifest {
        Manifest::new(names.iter().map(|n| passenger(n)).collect())
    }

    #[test]
    fn counts_descend_and_sum_to_row_count() {
        let m = manifest(&[
            "Andersson, Mr. Anders Johan",
            "Goodwin, Master. Sidney Leonard",
            "Andersson, Miss. Ellis Anna Maria",
            "Andersson, Miss. Ingeborg Constanzia",
            "Goodwin, Miss. Lillian Amy",
            "Moran, Mr. James",
        ]);
        let counts = surname_counts(&m);
        assert_eq!(
            counts,
            vec![
                SurnameCount { surname: "Andersson".into(), count: 3 },
                SurnameCount { surname: "Goodwin".into(), count: 2 },
                SurnameCount { surname: "Moran".into(), count: 1 },
            ]
        );
        let total: u32 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total as usize, m.len());
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let m = manifest(&[
            "Zimmerman, Mr. Leo",
            "Abbott, Mrs. Stanton",
            "Zimmerman, Mr. Theo",
            "Abbott, Mr. Rossmore",
        ]);
        let counts = surname_counts(&m);
        assert_eq!(counts[0].surname, "Zimmerman");
        assert_eq!(counts[1].surname, "Abbott");
    }

    #[test]
    fn name_without_comma_counts_whole_name() {
        let m = manifest(&["Mononym", "Doe, Mr. John"]);
        let counts = surname_counts(&m);
        assert!(counts.iter().any(|c| c.surname == "Mononym" && c.count == 1));
        assert!(counts.iter().any(|c| c.surname == "Doe" && c.count == 1));
    }
}
