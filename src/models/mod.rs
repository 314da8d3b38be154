//! Empirical EUV spectrum models.
//!
//! Every model is a pure function of its coefficient tables and the caller's
//! proxy values:
//!
//! ```text
//! proxy -> design matrix -> coefficients · designᵀ -> labeled result
//! ```
//!
//! Tables are validated once, at construction; a model that exists is complete.

pub mod aero;
pub mod assemble;
pub mod lyman;
pub mod solar;

#[cfg(test)]
pub(crate) mod testing;

pub use aero::AeroSpam;
pub use lyman::LymanAlphaSpam;
pub use solar::SolarSpam;

use crate::domain::{CoefficientTable, ModelKind, ProxyInput, Spectra, SpectrumResult};
use crate::error::SpamResult;
use crate::io::store::CoefficientStore;
use crate::math::Basis;

/// Common operations of all models.
pub trait SpectrumModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Flux in every band of the model.
    fn spectral_bands(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult>;

    /// Flux in every line, for models that have a line table.
    fn spectral_lines(&self, _proxy: &ProxyInput) -> SpamResult<Option<SpectrumResult>> {
        Ok(None)
    }

    /// Bands plus lines (if any).
    fn spectra(&self, proxy: &ProxyInput) -> SpamResult<Spectra> {
        Ok(Spectra {
            bands: self.spectral_bands(proxy)?,
            lines: self.spectral_lines(proxy)?,
        })
    }

    /// The model's complete spectrum as one result.
    fn predict(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        self.spectral_bands(proxy)
    }
}

/// Load the model `kind` from `store`.
pub fn load_model<S>(kind: ModelKind, store: &S) -> SpamResult<Box<dyn SpectrumModel>>
where
    S: CoefficientStore + ?Sized,
{
    let model: Box<dyn SpectrumModel> = match kind {
        ModelKind::AeroSpam => Box::new(AeroSpam::from_store(store)?),
        ModelKind::SolarSpam => Box::new(SolarSpam::from_store(store)?),
        ModelKind::LymanAlpha => Box::new(LymanAlphaSpam::from_store(store)?),
    };
    Ok(model)
}

/// Check a table against what a model needs: row count, coefficient columns and
/// metadata columns.
pub(crate) fn validate_table(
    table: &CoefficientTable,
    rows: usize,
    basis: Basis,
    metadata: &[&str],
) -> SpamResult<()> {
    table.expect_rows(rows)?;
    for column in basis.coefficient_columns().iter().chain(metadata) {
        table.require(column)?;
    }
    Ok(())
}

pub(crate) const BAND_METADATA: [&str; 3] = ["lband", "uband", "center"];
pub(crate) const LINE_METADATA: [&str; 1] = ["lambda"];
