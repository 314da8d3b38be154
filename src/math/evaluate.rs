//! Model evaluation: `coefficients · designᵀ`, plus the energy/photon flux conversion.
//!
//! Raw model output is `bands × inputs`. No clamping is applied: proxy values far
//! outside the fitted range extrapolate the polynomial as-is.

use nalgebra::DMatrix;

use crate::error::{SpamError, SpamResult};
use crate::math::DesignMatrix;

/// Planck constant (J·s).
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Number of wavelength bins in the Solar-SPAM grid.
pub const SOLAR_GRID_LEN: usize = 190;

/// Multiply a `bands × features` coefficient matrix by the transposed design.
pub fn evaluate(coefficients: &DMatrix<f64>, design: &DesignMatrix) -> SpamResult<DMatrix<f64>> {
    let features = design.basis().width();
    if coefficients.ncols() != features {
        return Err(SpamError::malformed(
            "coefficients",
            format!(
                "{} coefficient columns for a {}-feature basis",
                coefficients.ncols(),
                features
            ),
        ));
    }
    Ok(coefficients * design.matrix().transpose())
}

/// Bin centers of the Solar-SPAM grid: 0.5, 1.5, …, 189.5 nm.
pub fn solar_wavelength_grid() -> Vec<f64> {
    (0..SOLAR_GRID_LEN).map(|i| 0.5 + i as f64).collect()
}

/// Energy of one photon at `wavelength_nm` (J).
pub fn photon_energy(wavelength_nm: f64) -> f64 {
    PLANCK * SPEED_OF_LIGHT / (wavelength_nm * 1e-9)
}

/// Convert energy flux to photon flux, row by row.
///
/// Row `i` is divided by the photon energy at `wavelengths_nm[i]`; every input
/// column shares the same divisor.
pub fn energy_to_photon_flux(raw: &DMatrix<f64>, wavelengths_nm: &[f64]) -> SpamResult<DMatrix<f64>> {
    check_grid(raw, wavelengths_nm)?;
    let mut out = raw.clone();
    for (i, mut row) in out.row_iter_mut().enumerate() {
        let e = photon_energy(wavelengths_nm[i]);
        row.iter_mut().for_each(|v| *v /= e);
    }
    Ok(out)
}

/// Convert photon flux back to energy flux (inverse of [`energy_to_photon_flux`]).
pub fn photon_to_energy_flux(flux: &DMatrix<f64>, wavelengths_nm: &[f64]) -> SpamResult<DMatrix<f64>> {
    check_grid(flux, wavelengths_nm)?;
    let mut out = flux.clone();
    for (i, mut row) in out.row_iter_mut().enumerate() {
        let e = photon_energy(wavelengths_nm[i]);
        row.iter_mut().for_each(|v| *v *= e);
    }
    Ok(out)
}

fn check_grid(m: &DMatrix<f64>, wavelengths_nm: &[f64]) -> SpamResult<()> {
    if m.nrows() != wavelengths_nm.len() {
        return Err(SpamError::malformed(
            "wavelength grid",
            format!(
                "{} wavelengths for {} spectral rows",
                wavelengths_nm.len(),
                m.nrows()
            ),
        ));
    }
    Ok(())
}
