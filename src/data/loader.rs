use std::io::Read;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

use super::model::{Manifest, Passenger, Sex};

// ---------------------------------------------------------------------------
// LoadError – fatal loading failures
// ---------------------------------------------------------------------------

/// Fatal manifest loading failures. Individually malformed rows are skipped
/// with a warning instead; only a source that yields no usable table at all
/// is an error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("reading manifest CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("manifest CSV missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("manifest contains no parseable passenger rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Header names of the required columns, matching the published Titanic CSV.
/// Extra columns (Ticket, Cabin, Embarked, ...) are ignored.
const COL_ID: &str = "PassengerId";
const COL_SURVIVED: &str = "Survived";
const COL_CLASS: &str = "Pclass";
const COL_NAME: &str = "Name";
const COL_SEX: &str = "Sex";
const COL_AGE: &str = "Age";
const COL_SIBSP: &str = "SibSp";
const COL_PARCH: &str = "Parch";
const COL_FARE: &str = "Fare";

/// Positions of the required columns within the header row.
struct Columns {
    id: usize,
    survived: usize,
    class: usize,
    name: usize,
    sex: usize,
    age: usize,
    sibsp: usize,
    parch: usize,
    fare: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Columns {
            id: position(COL_ID)?,
            survived: position(COL_SURVIVED)?,
            class: position(COL_CLASS)?,
            name: position(COL_NAME)?,
            sex: position(COL_SEX)?,
            age: position(COL_AGE)?,
            sibsp: position(COL_SIBSP)?,
            parch: position(COL_PARCH)?,
            fare: position(COL_FARE)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the passenger manifest from a delimited text file.
pub fn load_manifest(path: &Path) -> Result<Manifest, LoadError> {
    let file = std::fs::File::open(path)?;
    let manifest = load_manifest_reader(file)?;
    info!(
        "loaded {} passengers from {}",
        manifest.len(),
        path.display()
    );
    Ok(manifest)
}

/// Load the passenger manifest from any reader producing CSV text with a
/// header row. Callers that fetch the table remotely hand the body here.
pub fn load_manifest_reader<R: Read>(source: R) -> Result<Manifest, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = Columns::from_headers(reader.headers()?)?;

    let mut passengers = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("manifest row {row_no}: unreadable record, skipping: {err}");
                skipped += 1;
                continue;
            }
        };
        match parse_row(&record, &columns) {
            Some(passenger) => passengers.push(passenger),
            None => {
                warn!("manifest row {row_no}: malformed required field, skipping");
                skipped += 1;
            }
        }
    }

    if passengers.is_empty() {
        return Err(LoadError::Empty);
    }
    if skipped > 0 {
        warn!("skipped {skipped} malformed manifest rows");
    }
    Ok(Manifest::new(passengers))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Parse one record into a [`Passenger`]. `None` means a required field is
/// malformed and the row is dropped; Age and Fare are optional and a
/// missing or non-numeric value there becomes `None` in the record instead.
fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Option<Passenger> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let id = field(columns.id).parse::<u32>().ok()?;
    let class = field(columns.class).parse::<u8>().ok()?;
    let sex = field(columns.sex).parse::<Sex>().ok()?;
    let siblings_spouses = field(columns.sibsp).parse::<u32>().ok()?;
    let parents_children = field(columns.parch).parse::<u32>().ok()?;
    let survived = match field(columns.survived) {
        "0" => false,
        "1" => true,
        _ => return None,
    };

    let name = field(columns.name);
    if name.is_empty() {
        return None;
    }

    Some(Passenger {
        id,
        class,
        sex,
        age: parse_optional_number(field(columns.age)),
        siblings_spouses,
        parents_children,
        fare: parse_optional_number(field(columns.fare)),
        name: name.to_string(),
        survived,
    })
}

/// Empty or non-numeric optional cells become `None`; negative values are
/// treated as malformed too (ages and fares are non-negative).
fn parse_optional_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n";

    fn load(rows: &str) -> Result<Manifest, LoadError> {
        let csv = format!("{HEADER}{rows}");
        load_manifest_reader(csv.as_bytes())
    }

    #[test]
    fn parses_a_complete_row() {
        let m = load("1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n")
            .unwrap();
        assert_eq!(m.len(), 1);
        let p = &m.passengers[0];
        assert_eq!(p.id, 1);
        assert_eq!(p.class, 3);
        assert_eq!(p.sex, Sex::Male);
        assert_eq!(p.age, Some(22.0));
        assert_eq!(p.siblings_spouses, 1);
        assert_eq!(p.parents_children, 0);
        assert_eq!(p.fare, Some(7.25));
        assert_eq!(p.surname(), "Braund");
        assert!(!p.survived);
    }

    #[test]
    fn missing_age_and_fare_become_none() {
        let m = load("6,0,3,\"Moran, Mr. James\",male,,0,0,330877,,,Q\n").unwrap();
        let p = &m.passengers[0];
        assert_eq!(p.age, None);
        assert_eq!(p.fare, None);
    }

    #[test]
    fn non_numeric_age_becomes_none_not_an_error() {
        let m = load("7,1,2,\"Nasser, Mrs. Nicholas\",female,unknown,1,0,237736,30.07,,C\n")
            .unwrap();
        assert_eq!(m.passengers[0].age, None);
        assert_eq!(m.passengers[0].fare, Some(30.07));
    }

    #[test]
    fn malformed_required_field_skips_only_that_row() {
        let rows = "1,0,third,\"Braund, Mr. Owen Harris\",male,22,1,0,t,7.25,,S\n\
                    2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,t,71.28,,C\n";
        let m = load(rows).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.passengers[0].id, 2);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "PassengerId,Survived,Name,Sex,Age,SibSp,Parch,Fare\n";
        let err = load_manifest_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Pclass")));
    }

    #[test]
    fn all_rows_unparseable_is_fatal() {
        let err = load("x,y,z,,neither,a,b,c,t,f,,\n").unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let err = load_manifest(Path::new("/nonexistent/titanic.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
