use crate::error::Result;
use crate::types::{CategoryTally, LanguageRow, YearBucketTally};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::info;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// One header row of `Rating, <year>...` followed by a row per rating.
fn year_records(tally: &YearBucketTally) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(tally.len() + 1);
    records.push(
        std::iter::once("Rating".to_string())
            .chain(tally.years.iter().cloned())
            .collect(),
    );
    for (rating, per_year) in &tally.counts {
        records.push(
            std::iter::once(rating.clone())
                .chain(per_year.iter().map(|n| n.to_string()))
                .collect(),
        );
    }
    records
}

pub fn write_year_tally(path: &Path, tally: &YearBucketTally) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in year_records(tally) {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    info!("Wrote {} ratings to {}", tally.len(), path.display());
    Ok(())
}

pub fn language_rows(tally: &CategoryTally, percents: &[f64]) -> Vec<LanguageRow> {
    tally
        .iter()
        .zip(percents)
        .enumerate()
        .map(|(i, ((language, &movies), &pct))| LanguageRow {
            rank: i + 1,
            language: language.clone(),
            movies: format_int(movies),
            percent: format_number(pct, 2),
        })
        .collect()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn preview_year_tally(tally: &YearBucketTally, max_rows: usize) {
    if tally.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    for record in year_records(tally).into_iter().take(max_rows + 1) {
        builder.push_record(record);
    }
    let table_str = builder.build().with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
