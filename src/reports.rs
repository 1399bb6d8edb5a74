use crate::config::Config;
use crate::error::Result;
use crate::languages::{category_percentages, tally_top_categories};
use crate::loader::Dataset;
use crate::scores::{build_score_maps, paired_scores, pearson_correlation};
use crate::timeline::tally_by_year;
use crate::types::{CategoryTally, Column, ScorePair, SummaryStats, YearBucketTally};
use crate::util::parse_date_safe;

/// Outputs of the three analyses over one dataset.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub pairs: Vec<ScorePair>,
    pub correlation: f64,
    pub languages: CategoryTally,
    pub language_percents: Vec<f64>,
    pub view_ratings: YearBucketTally,
}

pub fn run_analysis(ds: &Dataset, config: &Config) -> Result<Analysis> {
    let (hidden_gem, imdb) = build_score_maps(ds)?;
    let correlation = pearson_correlation(&hidden_gem, &imdb)?;
    let pairs = paired_scores(&hidden_gem, &imdb);

    let languages = tally_top_categories(
        ds,
        Column::Languages,
        config.top_languages,
        config.admission,
    )?;
    let language_percents = category_percentages(ds.row_count(), &languages);

    let view_ratings = tally_by_year(
        ds,
        Column::ViewRating,
        Column::NetflixRelease,
        &config.year_window,
    )?;

    Ok(Analysis {
        pairs,
        correlation,
        languages,
        language_percents,
        view_ratings,
    })
}

pub fn generate_summary(ds: &Dataset, analysis: &Analysis) -> SummaryStats {
    let date_idx = ds.layout.index(Column::NetflixRelease);
    let dates: Vec<_> = ds
        .rows
        .iter()
        .filter_map(|r| parse_date_safe(r.fields.get(date_idx).map(String::as_str)))
        .collect();

    SummaryStats {
        total_rows: ds.row_count(),
        scored_movies: analysis.pairs.len(),
        correlation: analysis.correlation,
        languages_tracked: analysis.languages.len(),
        distinct_view_ratings: analysis.view_ratings.len(),
        rated_in_window: analysis.view_ratings.total(),
        earliest_release: dates.iter().min().copied(),
        latest_release: dates.iter().max().copied(),
    }
}
