//! Labeled spectrum results.
//!
//! A `SpectrumResult` is a 2-D flux matrix with:
//! - a spectral axis (rows): band centers or line wavelengths
//! - a proxy axis (columns): the caller's proxy values, in input order
//! - auxiliary per-row arrays (band boundaries, centers, line wavelengths)
//! - string attributes (model name, units, descriptions)

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::domain::{ModelKind, SpectrumKind};

/// Name of the flux variable in exports.
pub const FLUX_VARIABLE: &str = "euv_flux_spectra";

/// A named coordinate axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub values: Vec<f64>,
}

impl Axis {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A per-row array aligned with the spectral axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxArray {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumResult {
    pub model: ModelKind,
    pub kind: SpectrumKind,
    /// Flux, `spectral_axis.len() × proxy_axis.len()`.
    pub flux: DMatrix<f64>,
    pub spectral_axis: Axis,
    pub proxy_axis: Axis,
    pub aux: Vec<AuxArray>,
    pub attrs: Vec<(String, String)>,
}

impl SpectrumResult {
    /// Number of bands/lines (rows).
    pub fn band_count(&self) -> usize {
        self.flux.nrows()
    }

    /// Number of proxy inputs (columns).
    pub fn input_count(&self) -> usize {
        self.flux.ncols()
    }

    /// Implicit `band_number` coordinate.
    pub fn band_numbers(&self) -> std::ops::Range<usize> {
        0..self.band_count()
    }

    pub fn aux(&self, name: &str) -> Option<&[f64]> {
        self.aux
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.values.as_slice())
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Flux for one proxy input (one column), in spectral-axis order.
    pub fn spectrum_at(&self, input: usize) -> Option<Vec<f64>> {
        (input < self.input_count()).then(|| self.flux.column(input).iter().copied().collect())
    }

    /// Flux rows as nested vectors (`[band][input]`), for serialization.
    pub fn flux_rows(&self) -> Vec<Vec<f64>> {
        self.flux
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// Output of a model's `spectra` operation.
///
/// Models without a line table return bands only.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectra {
    pub bands: SpectrumResult,
    pub lines: Option<SpectrumResult>,
}
