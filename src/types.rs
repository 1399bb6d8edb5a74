use crate::error::{AnalysisError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use tabled::Tabled;

/// Title -> score, in the order titles were first seen.
pub type ScoreMap = IndexMap<String, f64>;

/// Category label -> occurrence count. Iteration order is significant.
pub type CategoryTally = IndexMap<String, u64>;

/// The columns the pipelines read. Position in the file is resolved at load
/// time; see `loader::ColumnLayout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Title,
    Languages,
    HiddenGem,
    ViewRating,
    Imdb,
    NetflixRelease,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Title,
        Column::Languages,
        Column::HiddenGem,
        Column::ViewRating,
        Column::Imdb,
        Column::NetflixRelease,
    ];

    pub fn header_name(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Languages => "Languages",
            Column::HiddenGem => "Hidden Gem Score",
            Column::ViewRating => "View Rating",
            Column::Imdb => "IMDb Score",
            Column::NetflixRelease => "Netflix Release Date",
        }
    }

    /// Index used by the original export of the Netflix dataset.
    pub fn default_index(self) -> usize {
        match self {
            Column::Title => 0,
            Column::Languages => 3,
            Column::HiddenGem => 5,
            Column::ViewRating => 11,
            Column::Imdb => 12,
            Column::NetflixRelease => 19,
        }
    }
}

/// One data record. `line` is the 1-based line in the source file so errors
/// can point at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

impl Row {
    pub fn field(&self, idx: usize) -> Result<&str> {
        self.fields
            .get(idx)
            .map(String::as_str)
            .ok_or(AnalysisError::MalformedRow {
                line: self.line,
                needed: idx,
                found: self.fields.len(),
            })
    }
}

/// Rating -> per-year counts over a fixed window of years.
///
/// Every count vector has exactly `years.len()` entries, in window order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBucketTally {
    pub years: Vec<String>,
    pub counts: IndexMap<String, Vec<u64>>,
}

impl YearBucketTally {
    pub fn get(&self, rating: &str) -> Option<&[u64]> {
        self.counts.get(rating).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Height of each stacked bar.
    pub fn year_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.years.len()];
        for per_year in self.counts.values() {
            for (slot, n) in totals.iter_mut().zip(per_year) {
                *slot += n;
            }
        }
        totals
    }

    pub fn total(&self) -> u64 {
        self.counts.values().flatten().sum()
    }
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct ScorePair {
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "HiddenGem")]
    #[tabled(rename = "HiddenGem")]
    pub hidden_gem: f64,
    #[serde(rename = "IMDb")]
    #[tabled(rename = "IMDb")]
    pub imdb: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct LanguageRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Language")]
    #[tabled(rename = "Language")]
    pub language: String,
    #[serde(rename = "Movies")]
    #[tabled(rename = "Movies")]
    pub movies: String,
    #[serde(rename = "Percent")]
    #[tabled(rename = "Percent")]
    pub percent: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub scored_movies: usize,
    pub correlation: f64,
    pub languages_tracked: usize,
    pub distinct_view_ratings: usize,
    pub rated_in_window: u64,
    pub earliest_release: Option<chrono::NaiveDate>,
    pub latest_release: Option<chrono::NaiveDate>,
}
