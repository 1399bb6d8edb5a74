// Part 1: Hidden Gem vs IMDb score.
use crate::error::{AnalysisError, Result};
use crate::loader::Dataset;
use crate::types::{Column, ScoreMap, ScorePair};
use crate::util::parse_score;
use tracing::debug;

/// Build the Hidden Gem and IMDb score maps from every row where both scores
/// are present. A row missing either score contributes to neither map.
pub fn build_score_maps(ds: &Dataset) -> Result<(ScoreMap, ScoreMap)> {
    let title_idx = ds.layout.index(Column::Title);
    let gem_idx = ds.layout.index(Column::HiddenGem);
    let imdb_idx = ds.layout.index(Column::Imdb);

    let mut hidden_gem = ScoreMap::new();
    let mut imdb = ScoreMap::new();
    let mut skipped = 0usize;

    for row in &ds.rows {
        let gem_raw = row.field(gem_idx)?;
        let imdb_raw = row.field(imdb_idx)?;
        if gem_raw.is_empty() || imdb_raw.is_empty() {
            skipped += 1;
            continue;
        }
        let title = row.field(title_idx)?;
        let gem = parse_score(gem_raw, Column::HiddenGem.header_name(), row.line)?;
        let score = parse_score(imdb_raw, Column::Imdb.header_name(), row.line)?;
        hidden_gem.insert(title.to_string(), gem);
        imdb.insert(title.to_string(), score);
    }

    debug!(
        "Score maps: {} titles, {} rows skipped for missing scores",
        hidden_gem.len(),
        skipped
    );
    Ok((hidden_gem, imdb))
}

/// Titles present in both maps, sorted by title, with both scores.
pub fn paired_scores(hidden_gem: &ScoreMap, imdb: &ScoreMap) -> Vec<ScorePair> {
    let mut pairs: Vec<ScorePair> = hidden_gem
        .iter()
        .filter_map(|(title, &gem)| {
            imdb.get(title).map(|&score| ScorePair {
                title: title.clone(),
                hidden_gem: gem,
                imdb: score,
            })
        })
        .collect();
    pairs.sort_by(|a, b| a.title.cmp(&b.title));
    pairs
}

/// Pearson correlation over the titles both maps share.
///
/// Values are paired by key, never by position, so maps built in different
/// orders or with different key sets still correlate the right movies.
pub fn pearson_correlation(a: &ScoreMap, b: &ScoreMap) -> Result<f64> {
    let pairs = paired_scores(a, b);
    let xs: Vec<f64> = pairs.iter().map(|p| p.hidden_gem).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.imdb).collect();
    pearson(&xs, &ys)
}

/// Pearson correlation of the two maps' values taken in iteration order.
/// Only meaningful when both maps were filled from the same rows.
pub fn pearson_by_position(a: &ScoreMap, b: &ScoreMap) -> Result<f64> {
    if a.len() != b.len() {
        return Err(AnalysisError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let xs: Vec<f64> = a.values().copied().collect();
    let ys: Vec<f64> = b.values().copied().collect();
    pearson(&xs, &ys)
}

pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let n = xs.len();
    if n < 2 {
        return Err(AnalysisError::DegenerateSeries {
            points: n,
            reason: "need at least two points",
        });
    }
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(AnalysisError::DegenerateSeries {
            points: n,
            reason: "a series has zero variance",
        });
    }
    // Clamp rounding noise so perfect correlations stay within [-1, 1].
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
