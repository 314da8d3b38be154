//! Reference spectra for validation.
//!
//! A reference CSV has a header row followed by one row per band/line and one
//! column per proxy value (the layout of a dataframe written without index).

use std::fs::File;
use std::path::Path;

use nalgebra::DMatrix;

use crate::error::{SpamError, SpamResult};

/// Read a reference matrix (`bands × inputs`).
pub fn read_reference_csv(path: &Path) -> SpamResult<DMatrix<f64>> {
    let file = File::open(path).map_err(|source| SpamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let name = path.display().to_string();
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SpamError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<f64>().map_err(|_| {
                    // +2: header line, 1-based line numbers
                    SpamError::malformed(&name, format!("line {}, column {}: '{field}' is not a number", idx + 2, col + 1))
                })
            })
            .collect::<SpamResult<Vec<f64>>>()?;
        rows.push(row);
    }

    let Some(first) = rows.first() else {
        return Err(SpamError::malformed(&name, "reference has no rows"));
    };
    let cols = first.len();
    Ok(DMatrix::from_fn(rows.len(), cols, |i, j| rows[i][j]))
}
