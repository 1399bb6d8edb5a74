// Chart rendering for the three analyses. Each function writes one SVG file.
use crate::error::{AnalysisError, Result};
use crate::types::{CategoryTally, ScorePair, YearBucketTally};
use indexmap::IndexMap;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::info;

const SIZE: (u32, u32) = (1024, 640);

fn chart_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..10.0;
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    (lo - pad)..(hi + pad)
}

/// A percentage label over one bar of the language chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarAnnotation {
    pub index: usize,
    pub y: f64,
    pub text: String,
}

/// Place one label per bar: at the bar top (or the configured override for
/// that label) plus `lift`.
pub fn bar_annotations(
    tally: &CategoryTally,
    percents: &[f64],
    lift: f64,
    overrides: &IndexMap<String, f64>,
) -> Vec<BarAnnotation> {
    tally
        .iter()
        .zip(percents)
        .enumerate()
        .map(|(index, ((label, &count), pct))| BarAnnotation {
            index,
            y: overrides.get(label).copied().unwrap_or(count as f64) + lift,
            text: format!("{:.2}%", pct),
        })
        .collect()
}

/// Scatter plot of Hidden Gem (x) against IMDb (y).
pub fn plot_scores(pairs: &[ScorePair], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Comparison between Hidden Gem and IMDb scores",
            ("sans-serif", 24),
        )
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(
            axis_range(pairs.iter().map(|p| p.hidden_gem)),
            axis_range(pairs.iter().map(|p| p.imdb)),
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Hidden Gem score")
        .y_desc("IMDb score")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            pairs
                .iter()
                .map(|p| Cross::new((p.hidden_gem, p.imdb), 3, MAGENTA)),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("Scatter plot saved to {}", path.display());
    Ok(())
}

fn languages_caption(cap: usize) -> String {
    format!(
        "Number of movies produced in each language ({} most common)",
        cap
    )
}

/// Bar chart of movies per language with a percentage label per bar. `cap`
/// is the configured number of languages, named in the caption.
pub fn plot_languages(
    tally: &CategoryTally,
    annotations: &[BarAnnotation],
    cap: usize,
    path: &Path,
) -> Result<()> {
    let labels: Vec<&str> = tally.keys().map(String::as_str).collect();
    let top = tally
        .values()
        .map(|&n| n as f64)
        .chain(annotations.iter().map(|a| a.y))
        .fold(1.0, f64::max);

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(languages_caption(cap), ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len() as i32).into_segmented(), 0.0..top * 1.08)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Language of production")
        .y_desc("Number of movies")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(8)
                .data(tally.values().enumerate().map(|(i, &n)| (i as i32, n as f64))),
        )
        .map_err(chart_err)?;

    let style = TextStyle::from(("sans-serif", 11).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(annotations.iter().map(|a| {
            Text::new(
                a.text.clone(),
                (SegmentValue::CenterOf(a.index as i32), a.y),
                style.clone(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("Language chart saved to {}", path.display());
    Ok(())
}

/// Stacked bars of movies per year, one colored segment per view rating.
pub fn plot_view_ratings(tally: &YearBucketTally, path: &Path) -> Result<()> {
    let years = &tally.years;
    let top = tally.year_totals().into_iter().max().unwrap_or(0).max(1) as f64;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of movies view ratings per year", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0..years.len() as i32).into_segmented(), 0.0..top * 1.1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(years.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => years.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Netflix release year")
        .y_desc("Number of movies")
        .draw()
        .map_err(chart_err)?;

    let mut bottom = vec![0u64; years.len()];
    for (idx, (rating, per_year)) in tally.counts.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let bars: Vec<Rectangle<(SegmentValue<i32>, f64)>> = per_year
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let base = bottom[i];
                bottom[i] += n;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), base as f64),
                        (SegmentValue::Exact(i as i32 + 1), (base + n) as f64),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 20, 20);
                bar
            })
            .collect();
        chart
            .draw_series(bars)
            .map_err(chart_err)?
            .label(rating.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    info!("View rating chart saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Admission, Config};
    use crate::languages::{category_percentages, tally_top_categories};
    use crate::scores::{build_score_maps, paired_scores};
    use crate::testutil::reference_dataset;
    use crate::timeline::tally_by_year;
    use crate::types::Column;

    #[test]
    fn annotations_sit_above_bars_unless_overridden() {
        let tally: CategoryTally = [("English".to_string(), 3u64), ("Thai".to_string(), 1)]
            .into_iter()
            .collect();
        let mut overrides = IndexMap::new();
        overrides.insert("Thai".to_string(), 10.0);
        let notes = bar_annotations(&tally, &[75.0, 25.0], 0.5, &overrides);
        assert_eq!(
            notes,
            vec![
                BarAnnotation { index: 0, y: 3.5, text: "75.00%".into() },
                BarAnnotation { index: 1, y: 10.5, text: "25.00%".into() },
            ]
        );
    }

    #[test]
    fn axis_range_pads_and_handles_empty() {
        assert_eq!(axis_range(std::iter::empty()), 0.0..10.0);
        let r = axis_range([2.0, 4.0].into_iter());
        assert!(r.start < 2.0 && r.end > 4.0);
    }

    #[test]
    fn all_three_charts_are_written() {
        let ds = reference_dataset();
        let dir = tempfile::tempdir().unwrap();

        let (gem, imdb) = build_score_maps(&ds).unwrap();
        let scatter = dir.path().join("scores.svg");
        plot_scores(&paired_scores(&gem, &imdb), &scatter).unwrap();

        let tally = tally_top_categories(&ds, Column::Languages, 15, Admission::Legacy).unwrap();
        let pct = category_percentages(ds.row_count(), &tally);
        let notes = bar_annotations(&tally, &pct, 0.2, &IndexMap::new());
        let bars = dir.path().join("languages.svg");
        plot_languages(&tally, &notes, 15, &bars).unwrap();

        let years = Config::default().year_window;
        let by_year = tally_by_year(&ds, Column::ViewRating, Column::NetflixRelease, &years).unwrap();
        let stacked = dir.path().join("ratings.svg");
        plot_view_ratings(&by_year, &stacked).unwrap();

        for path in [scatter, bars, stacked] {
            let svg = std::fs::read_to_string(&path).unwrap();
            assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
        }
    }

    #[test]
    fn language_caption_names_the_configured_cap() {
        let ds = reference_dataset();
        // Legacy admission tracks 4 languages for a cap of 3.
        let tally = tally_top_categories(&ds, Column::Languages, 3, Admission::Legacy).unwrap();
        assert_eq!(tally.len(), 4);
        assert_eq!(
            languages_caption(3),
            "Number of movies produced in each language (3 most common)"
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("languages.svg");
        plot_languages(&tally, &[], 3, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("(3 most common)"));
        assert!(!svg.contains("(4 most common)"));
    }
}
