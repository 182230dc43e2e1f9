//! Thin report shell: run every aggregate over a manifest file and print the
//! tables and chart specs as one JSON document on stdout.
//!
//! Usage: `report <path/to/titanic.csv>`

use anyhow::{bail, Context, Result};
use serde_json::json;

use titanic_stats::analysis::{age_division, demographics, family, surname};
use titanic_stats::chart;
use titanic_stats::ManifestSource;

const SURNAME_CHART_LIMIT: usize = 20;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: report <path/to/titanic.csv>");
    };

    let source = ManifestSource::new(&path);
    let manifest = source
        .load()
        .with_context(|| format!("loading manifest from {path}"))?;

    let demographics = demographics::survival_by_demographics(&manifest);
    let families = family::fare_by_family_size(&manifest);
    let surnames = surname::surname_counts(&manifest);
    let divisions = age_division::classify_age_division(&manifest);
    let division_summary = age_division::survival_by_age_division(&manifest);

    let report = json!({
        "passengers": manifest.len(),
        "tables": {
            "survival_demographics": demographics,
            "family_groups": families,
            "last_names": surnames,
            "age_division": divisions,
            "age_division_summary": division_summary,
        },
        "charts": {
            "survival_demographics": chart::demographics_chart(&demographics),
            "family_groups": chart::family_chart(&families),
            "last_names": chart::surname_chart(&surnames, SURNAME_CHART_LIMIT),
            "age_division": chart::age_division_chart(&division_summary),
        },
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing report")?
    );
    Ok(())
}
