//! Aero-SPAM: F10.7-driven quadratic model for 20 bands and 17 lines in 5-105 nm.
//!
//! Each band/line flux is `P1·F10.7² + P2·F10.7 + P3`. `predict` returns the
//! merged 37-row spectrum (20 bands followed by 17 lines).

use nalgebra::DMatrix;

use crate::domain::{CoefficientTable, ModelKind, ProxyInput, SpectrumKind, SpectrumResult};
use crate::error::{SpamError, SpamResult};
use crate::io::store::CoefficientStore;
use crate::math::{Basis, build, evaluate};
use crate::models::assemble::{assemble_bands, assemble_lines};
use crate::models::{BAND_METADATA, LINE_METADATA, SpectrumModel, validate_table};

const KIND: ModelKind = ModelKind::AeroSpam;
const BASIS: Basis = Basis::Quadratic;

#[derive(Debug, Clone)]
pub struct AeroSpam {
    bands: CoefficientTable,
    lines: CoefficientTable,
    merged: CoefficientTable,
    band_coeffs: DMatrix<f64>,
    line_coeffs: DMatrix<f64>,
    merged_coeffs: DMatrix<f64>,
}

impl AeroSpam {
    /// Build from a band table (20 rows: P1 P2 P3 lband uband center) and a line
    /// table (17 rows: P1 P2 P3 lambda).
    ///
    /// The merged table used by `predict` is derived from both; line rows take
    /// `lambda` as their `lband`, `uband` and `center`.
    pub fn new(bands: CoefficientTable, lines: CoefficientTable) -> SpamResult<Self> {
        validate_table(&bands, KIND.band_count(), BASIS, &BAND_METADATA)?;
        let line_count = KIND.line_count().unwrap_or_default();
        validate_table(&lines, line_count, BASIS, &LINE_METADATA)?;

        let merged = merge_tables(&bands, &lines)?;
        Self::from_tables(bands, lines, merged)
    }

    /// Replace the derived merged table with a published full table (37 rows).
    pub fn with_full_table(self, full: CoefficientTable) -> SpamResult<Self> {
        Self::from_tables(self.bands, self.lines, full)
    }

    /// Load bands, lines and (if present) the full table from `store`.
    pub fn from_store<S>(store: &S) -> SpamResult<Self>
    where
        S: CoefficientStore + ?Sized,
    {
        let model = Self::new(store.load_band_table(KIND)?, store.load_line_table(KIND)?)?;
        match store.load_full_table(KIND)? {
            Some(full) => model.with_full_table(full),
            None => Ok(model),
        }
    }

    fn from_tables(
        bands: CoefficientTable,
        lines: CoefficientTable,
        merged: CoefficientTable,
    ) -> SpamResult<Self> {
        validate_table(&merged, KIND.predict_count(), BASIS, &BAND_METADATA)?;

        let columns = BASIS.coefficient_columns();
        Ok(Self {
            band_coeffs: bands.coefficient_matrix(columns)?,
            line_coeffs: lines.coefficient_matrix(columns)?,
            merged_coeffs: merged.coefficient_matrix(columns)?,
            bands,
            lines,
            merged,
        })
    }

    pub fn band_table(&self) -> &CoefficientTable {
        &self.bands
    }

    pub fn line_table(&self) -> &CoefficientTable {
        &self.lines
    }

    /// Flux in the 17 lines, as a plain (non-optional) result.
    pub fn lines(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        let design = build(BASIS, proxy)?;
        let raw = evaluate(&self.line_coeffs, &design)?;
        tracing::debug!(model = %KIND, lines = raw.nrows(), inputs = raw.ncols(), "evaluated lines");
        assemble_lines(KIND, raw, &self.lines, &design)
    }
}

impl SpectrumModel for AeroSpam {
    fn kind(&self) -> ModelKind {
        KIND
    }

    fn spectral_bands(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        let design = build(BASIS, proxy)?;
        let raw = evaluate(&self.band_coeffs, &design)?;
        tracing::debug!(model = %KIND, bands = raw.nrows(), inputs = raw.ncols(), "evaluated bands");
        assemble_bands(KIND, SpectrumKind::Bands, raw, &self.bands, &design)
    }

    fn spectral_lines(&self, proxy: &ProxyInput) -> SpamResult<Option<SpectrumResult>> {
        self.lines(proxy).map(Some)
    }

    fn predict(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        let design = build(BASIS, proxy)?;
        let raw = evaluate(&self.merged_coeffs, &design)?;
        tracing::debug!(model = %KIND, rows = raw.nrows(), inputs = raw.ncols(), "evaluated merged spectrum");
        assemble_bands(KIND, SpectrumKind::Merged, raw, &self.merged, &design)
    }
}

/// Stack bands then lines into one table with band-style metadata.
fn merge_tables(bands: &CoefficientTable, lines: &CoefficientTable) -> SpamResult<CoefficientTable> {
    let lambda = lines.require("lambda")?;

    let mut columns = Vec::new();
    for &c in BASIS.coefficient_columns() {
        columns.push((c.to_string(), concat(bands.require(c)?, lines.require(c)?)));
    }
    for &c in &BAND_METADATA {
        columns.push((c.to_string(), concat(bands.require(c)?, lambda)));
    }

    CoefficientTable::from_columns(format!("{}_merged", KIND.store_id()), columns).map_err(|e| match e {
        SpamError::MalformedCoefficientTable { reason, .. } => {
            SpamError::malformed(format!("{} + {}", bands.name(), lines.name()), reason)
        }
        other => other,
    })
}

fn concat(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().chain(b).copied().collect()
}
