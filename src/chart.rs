//! Declarative chart specifications over the aggregate tables.
//!
//! The builders here do no computation beyond field selection and row
//! filtering: each one reshapes an aggregate table into a [`ChartSpec`] with
//! inline data rows, ready to hand to any charting layer.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::analysis::age_division::AgeDivisionBucket;
use crate::analysis::demographics::DemographicBucket;
use crate::analysis::family::FamilyBucket;
use crate::analysis::surname::SurnameCount;

// ---------------------------------------------------------------------------
// Fixed colors
// ---------------------------------------------------------------------------

/// Fixed color map for the sex encoding.
pub const SEX_COLORS: [(&str, &str); 2] = [("male", "#1f77b4"), ("female", "#ff7f0e")];

/// Fixed color map for the survived flag.
pub const SURVIVAL_COLORS: [(&str, &str); 2] = [("false", "#d62728"), ("true", "#2ca02c")];

// ---------------------------------------------------------------------------
// ChartSpec model
// ---------------------------------------------------------------------------

/// Mark type of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Scatter,
}

/// How bars of different colors within one x position are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
}

/// A data-field binding with its human-readable axis/legend label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub label: String,
}

impl Field {
    fn new(name: &str, label: &str) -> Self {
        Field {
            name: name.to_string(),
            label: label.to_string(),
        }
    }
}

/// A positional (x or y) encoding, with an optional fixed axis range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisEncoding {
    #[serde(flatten)]
    pub field: Field,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// How values of the color field map to colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScale {
    /// Explicit value → hex-color pairs.
    Fixed(Vec<(String, String)>),
    /// A named sequential scale, interpolated by the renderer.
    Sequential(String),
}

/// A color encoding: which field drives color, and with which scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorEncoding {
    #[serde(flatten)]
    pub field: Field,
    pub scale: ColorScale,
}

/// A complete declarative chart: mark, encodings, and inline data rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub mark: Mark,
    pub title: String,
    pub x: AxisEncoding,
    pub y: AxisEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorEncoding>,
    /// Field whose distinct values split the chart into side-by-side panels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet: Option<Field>,
    /// Field driving point size (scatter marks only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    pub data: Vec<Map<String, Value>>,
}

fn row(entries: Vec<(&str, Value)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn fixed_scale(pairs: &[(&str, &str)]) -> ColorScale {
    ColorScale::Fixed(
        pairs
            .iter()
            .map(|&(value, color)| (value.to_string(), color.to_string()))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Builders, one per aggregate table
// ---------------------------------------------------------------------------

/// Grouped bar chart of survival rate by age bracket, colored by sex and
/// faceted by class. Zero-passenger buckets are dropped for a cleaner chart.
pub fn demographics_chart(buckets: &[DemographicBucket]) -> ChartSpec {
    let data = buckets
        .iter()
        .filter(|b| b.passengers > 0)
        .map(|b| {
            row(vec![
                ("age_group", json!(b.bracket.label())),
                ("survival_rate", json!(b.survival_rate)),
                ("sex", json!(b.sex.to_string())),
                ("class", json!(b.class)),
            ])
        })
        .collect();

    ChartSpec {
        mark: Mark::Bar,
        title: "Survival Rates by Class, Sex, and Age Group".to_string(),
        x: AxisEncoding {
            field: Field::new("age_group", "Age Group"),
            range: None,
        },
        y: AxisEncoding {
            field: Field::new("survival_rate", "Survival Rate"),
            range: Some([0.0, 1.0]),
        },
        color: Some(ColorEncoding {
            field: Field::new("sex", "Sex"),
            scale: fixed_scale(&SEX_COLORS),
        }),
        facet: Some(Field::new("class", "Passenger Class")),
        size: None,
        bar_mode: Some(BarMode::Group),
        data,
    }
}

/// Scatter of average fare against family size, colored by class on a
/// sequential scale, point size showing the passenger count. Buckets with no
/// known fare are dropped (they have nothing to plot on the y axis).
pub fn family_chart(buckets: &[FamilyBucket]) -> ChartSpec {
    let data = buckets
        .iter()
        .filter_map(|b| {
            let avg_fare = b.avg_fare?;
            Some(row(vec![
                ("family_size", json!(b.family_size)),
                ("avg_fare", json!(avg_fare)),
                ("class", json!(b.class)),
                ("passengers", json!(b.passengers)),
            ]))
        })
        .collect();

    ChartSpec {
        mark: Mark::Scatter,
        title: "Average Fare by Family Size and Passenger Class".to_string(),
        x: AxisEncoding {
            field: Field::new("family_size", "Family Size"),
            range: None,
        },
        y: AxisEncoding {
            field: Field::new("avg_fare", "Average Fare ($)"),
            range: None,
        },
        color: Some(ColorEncoding {
            field: Field::new("class", "Class"),
            scale: ColorScale::Sequential("viridis".to_string()),
        }),
        facet: None,
        size: Some(Field::new("passengers", "Number of Passengers")),
        bar_mode: None,
        data,
    }
}

/// Bar chart of the `limit` most frequent surnames. The input is already
/// sorted by descending count, so this is a plain truncation.
pub fn surname_chart(counts: &[SurnameCount], limit: usize) -> ChartSpec {
    let data = counts
        .iter()
        .take(limit)
        .map(|c| {
            row(vec![
                ("surname", json!(c.surname)),
                ("count", json!(c.count)),
            ])
        })
        .collect();

    ChartSpec {
        mark: Mark::Bar,
        title: "Most Common Surnames Aboard".to_string(),
        x: AxisEncoding {
            field: Field::new("surname", "Surname"),
            range: None,
        },
        y: AxisEncoding {
            field: Field::new("count", "Number of Passengers"),
            range: None,
        },
        color: None,
        facet: None,
        size: None,
        bar_mode: None,
        data,
    }
}

/// Grouped bar chart of survival counts by class, faceted on the
/// older/younger-than-class-median division.
pub fn age_division_chart(buckets: &[AgeDivisionBucket]) -> ChartSpec {
    let data = buckets
        .iter()
        .map(|b| {
            row(vec![
                ("class", json!(b.class)),
                ("count", json!(b.passengers)),
                ("survived", json!(b.survived)),
                ("older_than_median", json!(b.older)),
            ])
        })
        .collect();

    ChartSpec {
        mark: Mark::Bar,
        title: "Survival Count by Class and Age Division (Above/Below Class Median)"
            .to_string(),
        x: AxisEncoding {
            field: Field::new("class", "Passenger Class"),
            range: None,
        },
        y: AxisEncoding {
            field: Field::new("count", "Number of Passengers"),
            range: None,
        },
        color: Some(ColorEncoding {
            field: Field::new("survived", "Survived"),
            scale: fixed_scale(&SURVIVAL_COLORS),
        }),
        facet: Some(Field::new("older_than_median", "Older than Class Median")),
        size: None,
        bar_mode: Some(BarMode::Group),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AgeBracket, Sex};

    fn bucket(passengers: u32, rate: f64) -> DemographicBucket {
        DemographicBucket {
            class: 1,
            sex: Sex::Female,
            bracket: AgeBracket::Adult,
            passengers,
            survivors: (rate * passengers as f64) as u32,
            survival_rate: rate,
        }
    }

    #[test]
    fn demographics_chart_drops_empty_buckets_and_pins_the_rate_axis() {
        let spec = demographics_chart(&[bucket(10, 0.8), bucket(0, 0.0)]);
        assert_eq!(spec.mark, Mark::Bar);
        assert_eq!(spec.data.len(), 1);
        assert_eq!(spec.y.range, Some([0.0, 1.0]));
        assert_eq!(spec.bar_mode, Some(BarMode::Group));
        assert_eq!(spec.data[0]["sex"], "female");
    }

    #[test]
    fn sex_colors_are_the_fixed_map() {
        let spec = demographics_chart(&[bucket(1, 1.0)]);
        let Some(ColorEncoding { scale: ColorScale::Fixed(pairs), .. }) = spec.color else {
            panic!("expected a fixed color scale");
        };
        assert!(pairs.contains(&("male".to_string(), "#1f77b4".to_string())));
        assert!(pairs.contains(&("female".to_string(), "#ff7f0e".to_string())));
    }

    #[test]
    fn family_chart_skips_buckets_without_fares() {
        let with_fare = FamilyBucket {
            family_size: 2,
            class: 1,
            passengers: 3,
            avg_fare: Some(52.0),
            min_fare: Some(30.0),
            max_fare: Some(80.0),
        };
        let without_fare = FamilyBucket {
            family_size: 5,
            class: 3,
            passengers: 0,
            avg_fare: None,
            min_fare: None,
            max_fare: None,
        };
        let spec = family_chart(&[with_fare, without_fare]);
        assert_eq!(spec.mark, Mark::Scatter);
        assert_eq!(spec.data.len(), 1);
        assert_eq!(spec.size.as_ref().unwrap().name, "passengers");
    }

    #[test]
    fn surname_chart_truncates_to_the_limit() {
        let counts = vec![
            SurnameCount { surname: "Andersson".into(), count: 9 },
            SurnameCount { surname: "Sage".into(), count: 7 },
            SurnameCount { surname: "Moran".into(), count: 2 },
        ];
        let spec = surname_chart(&counts, 2);
        assert_eq!(spec.data.len(), 2);
        assert_eq!(spec.data[0]["surname"], "Andersson");
    }

    #[test]
    fn age_division_chart_uses_the_survival_color_map() {
        let buckets = vec![AgeDivisionBucket {
            class: 3,
            older: true,
            survived: false,
            passengers: 12,
        }];
        let spec = age_division_chart(&buckets);
        assert_eq!(spec.data[0]["survived"], false);
        let Some(ColorEncoding { scale: ColorScale::Fixed(pairs), .. }) = spec.color else {
            panic!("expected a fixed color scale");
        };
        assert!(pairs.contains(&("false".to_string(), "#d62728".to_string())));
        assert!(pairs.contains(&("true".to_string(), "#2ca02c".to_string())));
        assert_eq!(spec.facet.as_ref().unwrap().name, "older_than_median");
    }

    #[test]
    fn chart_specs_serialize_to_json() {
        let spec = demographics_chart(&[bucket(4, 0.25)]);
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["mark"], "bar");
        assert_eq!(value["x"]["name"], "age_group");
        assert_eq!(value["y"]["range"][1], 1.0);
    }
}
