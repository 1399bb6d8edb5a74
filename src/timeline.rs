// Part 3: view ratings through time.
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{Column, YearBucketTally};
use crate::util::year_prefix;
use indexmap::IndexMap;
use tracing::debug;

/// Count rows per (category, year) for the years in `year_window`.
///
/// Categories are every non-empty value of `category_column`, in first-seen
/// order, each with a zeroed slot per window year. The year is the first four
/// characters of `date_column`; rows outside the window are dropped.
pub fn tally_by_year(
    ds: &Dataset,
    category_column: Column,
    date_column: Column,
    year_window: &[String],
) -> Result<YearBucketTally> {
    let cat_idx = ds.layout.index(category_column);
    let date_idx = ds.layout.index(date_column);

    let mut counts: IndexMap<String, Vec<u64>> = IndexMap::new();
    for row in &ds.rows {
        let category = row.field(cat_idx)?;
        if !category.is_empty() && !counts.contains_key(category) {
            counts.insert(category.to_string(), vec![0; year_window.len()]);
        }
    }

    let mut dropped = 0usize;
    for row in &ds.rows {
        let year = year_prefix(row.field(date_idx)?);
        let slot = year_window.iter().position(|y| y == year);
        match (counts.get_mut(row.field(cat_idx)?), slot) {
            (Some(per_year), Some(i)) => per_year[i] += 1,
            _ => dropped += 1,
        }
    }
    debug!(
        "{} by year: {} categories, {} rows outside the known sets",
        category_column.header_name(),
        counts.len(),
        dropped
    );

    Ok(YearBucketTally {
        years: year_window.to_vec(),
        counts,
    })
}
