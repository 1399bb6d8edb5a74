// Entry point: load the movie dataset once, print the Hidden Gem / IMDb
// correlation, render the three charts and export the tables behind them.
//
// There are no command-line flags; settings come from `config::Config`.
use movie_stats::config::Config;
use movie_stats::reports::{self, Analysis};
use movie_stats::{charts, loader, output, util, Result};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Part 1: scatter plot and correlation.
fn handle_scores(analysis: &Analysis, config: &Config) -> Result<()> {
    charts::plot_scores(&analysis.pairs, &config.output_dir.join("hidden_gem_vs_imdb.svg"))?;
    println!(
        "Pearson's correlation coefficient between Hidden Gem and IMDb: {}",
        analysis.correlation
    );
    println!();
    output::preview_table_rows(&analysis.pairs, config.preview_rows);
    output::write_csv(&config.output_dir.join("score_pairs.csv"), &analysis.pairs)
}

/// Part 2: movies per language.
fn handle_languages(analysis: &Analysis, config: &Config) -> Result<()> {
    let annotations = charts::bar_annotations(
        &analysis.languages,
        &analysis.language_percents,
        config.annotation_lift,
        &config.annotation_overrides,
    );
    charts::plot_languages(
        &analysis.languages,
        &annotations,
        config.top_languages,
        &config.output_dir.join("languages.svg"),
    )?;

    let rows = output::language_rows(&analysis.languages, &analysis.language_percents);
    println!("Movies per language ({} tracked)\n", rows.len());
    output::preview_table_rows(&rows, config.preview_rows);
    output::write_csv(&config.output_dir.join("languages.csv"), &rows)
}

/// Part 3: view ratings per Netflix release year.
fn handle_view_ratings(analysis: &Analysis, config: &Config) -> Result<()> {
    charts::plot_view_ratings(
        &analysis.view_ratings,
        &config.output_dir.join("view_ratings.svg"),
    )?;
    println!("View ratings per release year\n");
    output::preview_year_tally(&analysis.view_ratings, config.preview_rows);
    output::write_year_tally(&config.output_dir.join("view_ratings.csv"), &analysis.view_ratings)
}

fn run() -> Result<()> {
    let config = Config::load()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let ds = loader::load_dataset(&config.data_path, config.schema_mode)?;
    let analysis = reports::run_analysis(&ds, &config)?;

    handle_scores(&analysis, &config)?;
    handle_languages(&analysis, &config)?;
    handle_view_ratings(&analysis, &config)?;

    let summary = reports::generate_summary(&ds, &analysis);
    output::write_json(&config.output_dir.join("summary.json"), &summary)?;
    println!(
        "Summary: {} movies, {} scored, {} rated in {}-{}",
        util::format_int(summary.total_rows),
        util::format_int(summary.scored_movies),
        util::format_int(summary.rated_in_window),
        config.year_window.first().map(String::as_str).unwrap_or(""),
        config.year_window.last().map(String::as_str).unwrap_or(""),
    );
    info!("Outputs saved to {}", config.output_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
