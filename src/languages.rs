// Part 2: languages of production.
use crate::config::Admission;
use crate::error::Result;
use crate::loader::Dataset;
use crate::types::{CategoryTally, Column};
use crate::util::round2;
use tracing::debug;

/// Count occurrences of each comma-separated category in `column`.
///
/// Slots are handed out in first-seen order: once the cap is reached, new
/// categories are ignored while already admitted ones keep counting. The
/// result is sorted by count, descending, ties kept in admission order.
pub fn tally_top_categories(
    ds: &Dataset,
    column: Column,
    max_distinct: usize,
    admission: Admission,
) -> Result<CategoryTally> {
    let idx = ds.layout.index(column);
    let mut tally = CategoryTally::new();
    let mut ignored = 0usize;

    for row in &ds.rows {
        for piece in row.field(idx)?.split(',') {
            let label = piece.trim();
            if label.is_empty() {
                continue;
            }
            if let Some(count) = tally.get_mut(label) {
                *count += 1;
            } else if admission.admits(tally.len(), max_distinct) {
                tally.insert(label.to_string(), 1);
            } else {
                ignored += 1;
            }
        }
    }
    debug!(
        "{}: {} categories admitted, {} occurrences past the cap ignored",
        column.header_name(),
        tally.len(),
        ignored
    );

    let mut ranked: Vec<(String, u64)> = tally.into_iter().collect();
    // `sort_by` is stable, so equal counts keep admission order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(ranked.into_iter().collect())
}

/// Share of all data rows for each tally entry, in tally order, rounded to
/// two decimals. The denominator is every data row, not just those that
/// contributed to the tally.
pub fn category_percentages(total_rows: usize, tally: &CategoryTally) -> Vec<f64> {
    if total_rows == 0 {
        return vec![0.0; tally.len()];
    }
    tally
        .values()
        .map(|&n| round2(n as f64 / total_rows as f64 * 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaMode;
    use crate::loader::load_dataset;
    use crate::testutil::{reference_dataset, reference_rows, write_fixture, MovieRow};

    fn pairs(t: &CategoryTally) -> Vec<(&str, u64)> {
        t.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    #[test]
    fn reference_languages_and_percentages() {
        let dir = tempfile::tempdir().unwrap();
        let ds = load_dataset(&write_fixture(dir.path(), &reference_rows()), SchemaMode::Strict)
            .unwrap();
        let tally = tally_top_categories(&ds, Column::Languages, 15, Admission::Legacy).unwrap();
        assert_eq!(
            pairs(&tally),
            vec![
                ("English", 3),
                ("Swedish", 2),
                ("Polish", 2),
                ("Spanish", 1),
                ("Turkish", 1),
                ("Thai", 1),
            ]
        );
        assert_eq!(
            category_percentages(ds.row_count(), &tally),
            vec![33.33, 22.22, 22.22, 11.11, 11.11, 11.11]
        );
    }

    #[test]
    fn legacy_admission_keeps_one_extra_category() {
        let ds = reference_dataset();
        // English, Swedish, Polish are admitted; Spanish is the extra slot.
        let tally = tally_top_categories(&ds, Column::Languages, 3, Admission::Legacy).unwrap();
        assert_eq!(
            pairs(&tally),
            vec![("English", 3), ("Swedish", 2), ("Polish", 2), ("Spanish", 1)]
        );
        let tally = tally_top_categories(&ds, Column::Languages, 3, Admission::Exact).unwrap();
        assert_eq!(
            pairs(&tally),
            vec![("English", 3), ("Swedish", 2), ("Polish", 2)]
        );
    }

    #[test]
    fn early_rare_category_holds_its_slot() {
        let rows = vec![
            MovieRow::new("a").languages("Latin"),
            MovieRow::new("b").languages("English"),
            MovieRow::new("c").languages("French, English"),
            MovieRow::new("d").languages("French"),
            MovieRow::new("e").languages("French"),
        ];
        let dir = tempfile::tempdir().unwrap();
        let ds = load_dataset(&write_fixture(dir.path(), &rows), SchemaMode::Strict).unwrap();
        let tally = tally_top_categories(&ds, Column::Languages, 2, Admission::Exact).unwrap();
        assert_eq!(pairs(&tally), vec![("English", 2), ("Latin", 1)]);
    }

    #[test]
    fn blank_pieces_never_become_keys() {
        let rows = vec![
            MovieRow::new("a").languages(" , English,, "),
            MovieRow::new("b").languages(""),
        ];
        let dir = tempfile::tempdir().unwrap();
        let ds = load_dataset(&write_fixture(dir.path(), &rows), SchemaMode::Strict).unwrap();
        let tally = tally_top_categories(&ds, Column::Languages, 15, Admission::Legacy).unwrap();
        assert!(!tally.contains_key(""));
        assert_eq!(pairs(&tally), vec![("English", 1)]);
        // Both rows count towards the denominator.
        assert_eq!(category_percentages(ds.row_count(), &tally), vec![50.0]);
    }

    #[test]
    fn percentages_round_exact_ties_to_even() {
        let tally: CategoryTally = [
            ("English".to_string(), 1u64),
            ("French".to_string(), 5),
            ("German".to_string(), 9),
        ]
        .into_iter()
        .collect();
        assert_eq!(category_percentages(32, &tally), vec![3.12, 15.62, 28.12]);
    }

    #[test]
    fn percentages_of_empty_dataset() {
        let tally: CategoryTally = [("English".to_string(), 0u64)].into_iter().collect();
        assert_eq!(category_percentages(0, &tally), vec![0.0]);
    }

    #[test]
    fn tallying_twice_is_identical() {
        let ds = reference_dataset();
        let first = tally_top_categories(&ds, Column::Languages, 15, Admission::Legacy).unwrap();
        let second = tally_top_categories(&ds, Column::Languages, 15, Admission::Legacy).unwrap();
        assert_eq!(pairs(&first), pairs(&second));
    }
}
