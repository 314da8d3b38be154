//! Solar-SPAM: F10.7-driven quadratic model on a 1 nm grid (0-190 nm).
//!
//! The polynomial yields energy flux per bin; results are converted to photon
//! flux by dividing each bin by `h·c/λ` at the bin center of the fixed grid
//! `0.5, 1.5, …, 189.5 nm`.

use nalgebra::DMatrix;

use crate::domain::{CoefficientTable, ModelKind, ProxyInput, SpectrumKind, SpectrumResult};
use crate::error::SpamResult;
use crate::io::store::CoefficientStore;
use crate::math::{Basis, build, energy_to_photon_flux, evaluate, solar_wavelength_grid};
use crate::models::assemble::assemble_bands;
use crate::models::{BAND_METADATA, SpectrumModel, validate_table};

const KIND: ModelKind = ModelKind::SolarSpam;
const BASIS: Basis = Basis::Quadratic;

#[derive(Debug, Clone)]
pub struct SolarSpam {
    table: CoefficientTable,
    coeffs: DMatrix<f64>,
    grid: Vec<f64>,
}

impl SolarSpam {
    /// Build from a 190-row table with columns P1 P2 P3 lband uband center.
    pub fn new(table: CoefficientTable) -> SpamResult<Self> {
        validate_table(&table, KIND.band_count(), BASIS, &BAND_METADATA)?;
        Ok(Self {
            coeffs: table.coefficient_matrix(BASIS.coefficient_columns())?,
            table,
            grid: solar_wavelength_grid(),
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

    /// Wavelengths (nm) used for the photon conversion.
    pub fn wavelength_grid(&self) -> &[f64] {
        &self.grid
    }
}

impl SpectrumModel for SolarSpam {
    fn kind(&self) -> ModelKind {
        KIND
    }

    fn spectral_bands(&self, proxy: &ProxyInput) -> SpamResult<SpectrumResult> {
        let design = build(BASIS, proxy)?;
        let energy = evaluate(&self.coeffs, &design)?;
        let photons = energy_to_photon_flux(&energy, &self.grid)?;
        tracing::debug!(model = %KIND, bands = photons.nrows(), inputs = photons.ncols(), "evaluated bands");
        assemble_bands(KIND, SpectrumKind::Bands, photons, &self.table, &design)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{photon_energy, photon_to_energy_flux};
    use crate::models::testing::solar_table;

    #[test]
    fn bands_have_190_rows_for_any_input_count() {
        let m = SolarSpam::new(solar_table()).unwrap();
        for n in [1usize, 2, 15] {
            let proxy = ProxyInput::Sequence((0..n).map(|i| 65.0 + 10.0 * i as f64).collect());
            let res = m.spectral_bands(&proxy).unwrap();
            assert_eq!(res.flux.shape(), (190, n));
        }
    }

    #[test]
    fn output_is_photon_flux() {
        let m = SolarSpam::new(solar_table()).unwrap();
        let x = 140.0;
        let res = m.spectral_bands(&ProxyInput::Scalar(x)).unwrap();
        let t = m.table();
        let i = 30;
        let energy = t.column("P1").unwrap()[i] * x * x + t.column("P2").unwrap()[i] * x + t.column("P3").unwrap()[i];
        let expected = energy / photon_energy(30.5);
        assert!((res.flux[(i, 0)] - expected).abs() <= 1e-12 * expected.abs());

        let back = photon_to_energy_flux(&res.flux, m.wavelength_grid()).unwrap();
        assert!((back[(i, 0)] - energy).abs() <= 1e-12 * energy.abs());
    }

    #[test]
    fn spectra_and_predict_are_bands_only() {
        let m = SolarSpam::new(solar_table()).unwrap();
        let proxy = ProxyInput::from([100.0, 200.0]);
        let spectra = m.spectra(&proxy).unwrap();
        assert!(spectra.lines.is_none());
        assert_eq!(spectra.bands, m.predict(&proxy).unwrap());
        assert_eq!(spectra.bands.attr("model name"), Some("Solar-SPAM"));
    }
}
