// Fixture builders for the unit tests.
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 20] = [
    "Title",
    "Genre",
    "Tags",
    "Languages",
    "Series or Movie",
    "Hidden Gem Score",
    "Country Availability",
    "Runtime",
    "Director",
    "Writer",
    "Actors",
    "View Rating",
    "IMDb Score",
    "Rotten Tomatoes Score",
    "Metacritic Score",
    "Awards Received",
    "Awards Nominated For",
    "Boxoffice",
    "Release Date",
    "Netflix Release Date",
];

#[derive(Debug, Clone, Default)]
pub struct MovieRow {
    title: String,
    languages: String,
    hidden_gem: String,
    view_rating: String,
    imdb: String,
    netflix_release: String,
}

impl MovieRow {
    pub fn new(title: &str) -> Self {
        MovieRow {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn languages(mut self, v: &str) -> Self {
        self.languages = v.to_string();
        self
    }

    pub fn scores(mut self, hidden_gem: &str, imdb: &str) -> Self {
        self.hidden_gem = hidden_gem.to_string();
        self.imdb = imdb.to_string();
        self
    }

    pub fn rating(mut self, v: &str) -> Self {
        self.view_rating = v.to_string();
        self
    }

    pub fn released(mut self, v: &str) -> Self {
        self.netflix_release = v.to_string();
        self
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![String::new(); HEADER.len()];
        fields[0] = self.title.clone();
        fields[1] = "Drama".to_string();
        fields[3] = self.languages.clone();
        fields[4] = "Movie".to_string();
        fields[5] = self.hidden_gem.clone();
        fields[11] = self.view_rating.clone();
        fields[12] = self.imdb.clone();
        fields[19] = self.netflix_release.clone();
        fields
    }
}

/// Nine movies: every row is scored, three have no languages, two have no
/// view rating and one was released outside 2015..=2021.
pub fn reference_rows() -> Vec<MovieRow> {
    vec![
        MovieRow::new("Lets Fight Ghost")
            .languages("English,Swedish")
            .scores("4.3", "7.9")
            .rating("R")
            .released("2021-03-04"),
        MovieRow::new("HOW TO BUILD A GIRL")
            .languages("English,Polish")
            .scores("7.0", "5.8")
            .rating("R")
            .released("2021-03-04"),
        MovieRow::new("Centigrade")
            .languages("English")
            .scores("6.4", "4.3")
            .rating("Unrated")
            .released("2021-03-03"),
        MovieRow::new("ANNE+")
            .languages("Spanish, Turkish")
            .scores("7.7", "6.5")
            .released("2021-03-02"),
        MovieRow::new("Moxie")
            .languages("Thai,Polish")
            .scores("8.1", "6.3")
            .rating("PG-13")
            .released("2021-03-03"),
        MovieRow::new("The Con-Heartist")
            .languages("Swedish")
            .scores("8.6", "7.4")
            .released("2021-03-02"),
        MovieRow::new("Gleboka woda")
            .scores("8.7", "7.5")
            .rating("TV-MA")
            .released("2020-12-01"),
        MovieRow::new("Instynkt")
            .scores("6.9", "3.9")
            .rating("R")
            .released("2014-05-01"),
        MovieRow::new("Only a Mother")
            .scores("8.3", "6.7")
            .rating("Not Rated")
            .released("2019-09-01"),
    ]
}

pub fn write_fixture(dir: &Path, rows: &[MovieRow]) -> PathBuf {
    let path = dir.join("movies.csv");
    let mut wtr = csv::Writer::from_path(&path).unwrap();
    wtr.write_record(HEADER).unwrap();
    for row in rows {
        wtr.write_record(row.fields()).unwrap();
    }
    wtr.flush().unwrap();
    path
}

pub fn reference_dataset() -> crate::loader::Dataset {
    let records = reference_rows().iter().map(MovieRow::fields).collect();
    let header = HEADER.iter().map(|h| h.to_string()).collect();
    crate::loader::Dataset::from_records(header, records, crate::config::SchemaMode::Strict).unwrap()
}
