use crate::config::SchemaMode;
use crate::error::{AnalysisError, Result};
use crate::types::{Column, Row};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where each required column sits in this particular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    indices: HashMap<Column, usize>,
}

impl ColumnLayout {
    /// The fixed positions of the original export, ignoring the header.
    pub fn positional() -> Self {
        let indices = Column::ALL.iter().map(|c| (*c, c.default_index())).collect();
        ColumnLayout { indices }
    }

    /// Resolve columns by header name (trimmed, case-insensitive). In strict
    /// mode any missing name is an error; in positional mode it falls back to
    /// the fixed index.
    pub fn from_header<'a, I>(header: I, mode: SchemaMode) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let by_name: HashMap<String, usize> = header
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_lowercase(), i))
            .collect();

        let mut layout = match mode {
            SchemaMode::Positional => ColumnLayout::positional(),
            SchemaMode::Strict => ColumnLayout {
                indices: HashMap::new(),
            },
        };
        let mut missing = Vec::new();
        for column in Column::ALL {
            match by_name.get(&column.header_name().to_lowercase()) {
                Some(&idx) => {
                    layout.indices.insert(column, idx);
                }
                None if mode == SchemaMode::Positional => {
                    warn!(
                        "Header has no '{}' column, using position {}",
                        column.header_name(),
                        column.default_index()
                    );
                }
                None => missing.push(column.header_name().to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(AnalysisError::HeaderMismatch { missing });
        }
        Ok(layout)
    }

    pub fn index(&self, column: Column) -> usize {
        // Every constructor fills all of `Column::ALL`.
        self.indices
            .get(&column)
            .copied()
            .unwrap_or_else(|| column.default_index())
    }
}

/// The parsed input file: header, data rows (header excluded) and resolved
/// column layout. Pipelines only ever borrow it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub layout: ColumnLayout,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Build a dataset from in-memory records, resolving the layout the same
    /// way a file load does.
    pub fn from_records(header: Vec<String>, records: Vec<Vec<String>>, mode: SchemaMode) -> Result<Self> {
        let layout = ColumnLayout::from_header(header.iter().map(String::as_str), mode)?;
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, fields)| Row {
                line: i as u64 + 2,
                fields,
            })
            .collect();
        Ok(Dataset { header, rows, layout })
    }
}

pub fn load_dataset(path: &Path, mode: SchemaMode) -> Result<Dataset> {
    info!("Loading CSV: {}", path.display());
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .flexible(true)
        .has_headers(true)
        .from_reader(file);

    let header: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    let layout = ColumnLayout::from_header(header.iter().map(String::as_str), mode)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row {
            line,
            fields: record.iter().map(String::from).collect(),
        });
    }
    debug!("Resolved column layout: {:?}", layout);
    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(Dataset { header, rows, layout })
}
