//! Coefficient stores.
//!
//! Models never locate their own data: they receive `CoefficientTable`s directly
//! or pull them from a `CoefficientStore`. The crate ships a CSV-backed store
//! that reads one file per table from a directory:
//!
//! ```text
//! <dir>/aero_spam_bands.csv
//! <dir>/aero_spam_lines.csv
//! <dir>/aero_spam_full.csv      (optional)
//! <dir>/solar_spam_bands.csv
//! <dir>/lyman_alpha_bands.csv
//! ```
//!
//! CSV rules:
//! - the first row is the header; names are trimmed and a UTF-8 BOM is stripped
//! - columns with an empty header (a pandas index column) are skipped
//! - a column is numeric if every cell parses as `f64`, otherwise it is text
//! - ragged rows are an error (no silent truncation)

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::{CoefficientTable, ModelKind};
use crate::error::{SpamError, SpamResult};

/// Source of coefficient tables for a model.
pub trait CoefficientStore {
    fn load_band_table(&self, model: ModelKind) -> SpamResult<CoefficientTable>;

    fn load_line_table(&self, model: ModelKind) -> SpamResult<CoefficientTable>;

    /// Merged band+line table, if the store has one.
    fn load_full_table(&self, _model: ModelKind) -> SpamResult<Option<CoefficientTable>> {
        Ok(None)
    }
}

/// Which table of a model a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Bands,
    Lines,
    Full,
}

impl TableRole {
    pub fn suffix(self) -> &'static str {
        match self {
            TableRole::Bands => "bands",
            TableRole::Lines => "lines",
            TableRole::Full => "full",
        }
    }
}

/// Table name used in error messages and file names, e.g. `aero_spam_bands`.
pub fn table_name(model: ModelKind, role: TableRole) -> String {
    format!("{}_{}", model.store_id(), role.suffix())
}

/// Directory of CSV coefficient tables.
#[derive(Debug, Clone)]
pub struct CsvCoefficientStore {
    dir: PathBuf,
}

impl CsvCoefficientStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, model: ModelKind, role: TableRole) -> PathBuf {
        self.dir.join(format!("{}.csv", table_name(model, role)))
    }

    fn load(&self, model: ModelKind, role: TableRole) -> SpamResult<CoefficientTable> {
        let path = self.path_for(model, role);
        read_table_csv(&path, &table_name(model, role))
    }
}

impl CoefficientStore for CsvCoefficientStore {
    fn load_band_table(&self, model: ModelKind) -> SpamResult<CoefficientTable> {
        self.load(model, TableRole::Bands)
    }

    fn load_line_table(&self, model: ModelKind) -> SpamResult<CoefficientTable> {
        self.load(model, TableRole::Lines)
    }

    fn load_full_table(&self, model: ModelKind) -> SpamResult<Option<CoefficientTable>> {
        let path = self.path_for(model, TableRole::Full);
        if !path.exists() {
            return Ok(None);
        }
        read_table_csv(&path, &table_name(model, TableRole::Full)).map(Some)
    }
}

/// Read one coefficient table from a CSV file.
pub fn read_table_csv(path: &Path, name: &str) -> SpamResult<CoefficientTable> {
    let file = File::open(path).map_err(|source| SpamError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let csv_err = |source| SpamError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_header_name)
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        for (idx, field) in record.iter().enumerate() {
            cells[idx].push(field.to_string());
        }
    }

    if cells.first().is_none_or(Vec::is_empty) {
        return Err(SpamError::malformed(name, "table has no rows"));
    }

    let mut numeric = Vec::new();
    let mut text = Vec::new();
    for (header, column) in headers.into_iter().zip(cells) {
        if header.is_empty() {
            continue;
        }
        match parse_numeric(&column) {
            Some(values) => numeric.push((header, values)),
            None => text.push((header, column)),
        }
    }

    let mut table = CoefficientTable::from_columns(name, numeric)?;
    for (header, column) in text {
        table = table.with_text_column(header, column)?;
    }

    tracing::debug!(
        table = name,
        path = %path.display(),
        rows = table.rows(),
        "loaded coefficient table"
    );
    Ok(table)
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_numeric(column: &[String]) -> Option<Vec<f64>> {
    column.iter().map(|v| v.parse::<f64>().ok()).collect()
}
