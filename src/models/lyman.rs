//! Lyman-alpha model: 20 bands, each flux `B0·lac + B1·lac²`.
//!
//! The design row is `[lac, lac²]` (value first). This is the reverse of the
//! quadratic models' `[x², x, 1]` and the published B0/B1 coefficients are
//! fitted against it.

use nalgebra::DMatrix;

use crate::domain::{CoefficientTable, ModelKind, ProxyInput, SpectrumKind, SpectrumResult};
use crate::error::SpamResult;
use crate::io::store::CoefficientStore;
use crate::math::{Basis, build, evaluate};
use crate::models::assemble::assemble_bands;
use crate::models::{BAND_METADATA, SpectrumModel, validate_table};

const KIND: ModelKind = ModelKind::LymanAlpha;
const BASIS: Basis = Basis::LinearSquare;

#[derive(Debug, Clone)]
pub struct LymanAlphaSpam {
    table: CoefficientTable,
    coeffs: DMatrix<f64>,
}

impl LymanAlphaSpam {
    /// Build from a 20-row table with columns B0 B1 lband uband center.
    pub fn new(table: CoefficientTable) -> SpamResult<Self> {
        validate_table(&table, KIND.band_count(), BASIS, &BAND_METADATA)?;
        Ok(Self {
            coeffs: table.coefficient_matrix(BASIS.coefficient_columns())?,
            table,
        })
    }

    pub fn from_store<S>(store: &S) -> SpamResult<Self>
    where
        S: CoefficientStore + ?Sized,
    {
        Self::new(store.load_band_table(KIND)?)
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }
}

impl SpectrumModel for LymanAlphaSpam {
    fn kind(&self) -> ModelKind {
        KIND
    }

    fn spectral_bands(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        let design = build(BASIS, proxy)?;
        let raw = evaluate(&self.coeffs, &design)?;
        tracing::debug!(model = %KIND, bands = raw.nrows(), inputs = raw.ncols(), "evaluated bands");
        assemble_bands(KIND, SpectrumKind::Bands, raw, &self.table, &design)
    }
}
