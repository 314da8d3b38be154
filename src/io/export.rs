//! Export spectrum results to CSV and JSON.
//!
//! - CSV is long-format (one row per band × proxy value), easy to load in
//!   spreadsheets or dataframes.
//! - JSON is the portable representation: axes, auxiliary arrays, attributes
//!   and the flux matrix. It can be read back for plotting.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::domain::{AuxArray, Axis, FLUX_VARIABLE, ModelKind, SpectrumKind, SpectrumResult};
use crate::error::{SpamError, SpamResult};

/// A saved spectrum (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectrumFile {
    pub tool: String,
    pub model: ModelKind,
    pub kind: SpectrumKind,
    pub spectral_axis: Axis,
    pub proxy_axis: Axis,
    pub aux: Vec<AuxArray>,
    pub attrs: BTreeMap<String, String>,
    /// `[band][input]`
    pub euv_flux_spectra: Vec<Vec<f64>>,
}

impl SpectrumFile {
    pub fn from_result(result: &SpectrumResult) -> Self {
        Self {
            tool: "euvspam".to_string(),
            model: result.model,
            kind: result.kind,
            spectral_axis: result.spectral_axis.clone(),
            proxy_axis: result.proxy_axis.clone(),
            aux: result.aux.clone(),
            attrs: result.attrs.iter().cloned().collect(),
            euv_flux_spectra: result.flux_rows(),
        }
    }

    /// Rebuild the in-memory result, checking that every array is aligned.
    pub fn into_result(self) -> SpamResult<SpectrumResult> {
        let rows = self.spectral_axis.len();
        let cols = self.proxy_axis.len();

        let misaligned = |what: String| SpamError::malformed("spectrum file", what);
        if self.euv_flux_spectra.len() != rows {
            return Err(misaligned(format!(
                "{} flux rows for a spectral axis of {rows}",
                self.euv_flux_spectra.len()
            )));
        }
        if let Some(bad) = self.euv_flux_spectra.iter().position(|r| r.len() != cols) {
            return Err(misaligned(format!("flux row {bad} does not have {cols} values")));
        }
        if let Some(a) = self.aux.iter().find(|a| a.values.len() != rows) {
            return Err(misaligned(format!("aux array `{}` is not aligned", a.name)));
        }

        let flux = DMatrix::from_fn(rows, cols, |i, j| self.euv_flux_spectra[i][j]);
        Ok(SpectrumResult {
            model: self.model,
            kind: self.kind,
            flux,
            spectral_axis: self.spectral_axis,
            proxy_axis: self.proxy_axis,
            aux: self.aux,
            attrs: self.attrs.into_iter().collect(),
        })
    }
}

/// Write a result as long-format CSV.
///
/// Columns: `band_number, <spectral axis>, <aux arrays…>, <proxy axis>, euv_flux_spectra`.
pub fn write_spectrum_csv(path: &Path, result: &SpectrumResult) -> SpamResult<()> {
    let csv_err = |source| SpamError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = vec!["band_number".to_string(), result.spectral_axis.name.clone()];
    header.extend(result.aux.iter().map(|a| a.name.clone()));
    header.push(result.proxy_axis.name.clone());
    header.push(FLUX_VARIABLE.to_string());
    writer.write_record(&header).map_err(csv_err)?;

    for band in result.band_numbers() {
        for (input, proxy) in result.proxy_axis.values.iter().enumerate() {
            let mut record = vec![band.to_string(), result.spectral_axis.values[band].to_string()];
            record.extend(result.aux.iter().map(|a| a.values[band].to_string()));
            record.push(proxy.to_string());
            record.push(format!("{:e}", result.flux[(band, input)]));
            writer.write_record(&record).map_err(csv_err)?;
        }
    }

    writer.flush().map_err(|source| SpamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = result.band_count() * result.input_count(), "wrote spectrum CSV");
    Ok(())
}

/// Write a result as JSON.
pub fn write_spectrum_json(path: &Path, result: &SpectrumResult) -> SpamResult<()> {
    let file = File::create(path).map_err(|source| SpamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, &SpectrumFile::from_result(result))?;
    tracing::info!(path = %path.display(), "wrote spectrum JSON");
    Ok(())
}

/// Read a spectrum JSON file.
pub fn read_spectrum_json(path: &Path) -> SpamResult<SpectrumResult> {
    let file = File::open(path).map_err(|source| SpamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let saved: SpectrumFile = serde_json::from_reader(file)?;
    saved.into_result()
}
