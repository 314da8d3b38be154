//! Reporting utilities: reference validation and formatted terminal output.

pub mod format;

pub use format::*;

use nalgebra::DMatrix;

use crate::domain::{ModelKind, ProxyInput};
use crate::error::{SpamError, SpamResult};
use crate::math::{photon_to_energy_flux, solar_wavelength_grid};
use crate::models::SpectrumModel;

/// Outcome of comparing a computed spectrum with reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub model: ModelKind,
    pub cells: usize,
    /// Largest `|reference - computed| / |reference|`, in percent.
    pub max_rel_err_pct: f64,
    /// `(row, column)` of the worst cell.
    pub worst: (usize, usize),
    pub tolerance_pct: f64,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.max_rel_err_pct < self.tolerance_pct
    }
}

/// Relative error in percent. Equal values (including two zeros) give 0.
pub fn relative_error_pct(reference: f64, computed: f64) -> f64 {
    if reference == computed {
        return 0.0;
    }
    (reference - computed).abs() / reference.abs() * 100.0
}

/// Compare two `bands × inputs` matrices cell by cell.
pub fn compare_matrices(
    model: ModelKind,
    reference: &DMatrix<f64>,
    computed: &DMatrix<f64>,
    tolerance_pct: f64,
) -> SpamResult<ValidationReport> {
    if reference.shape() != computed.shape() {
        return Err(SpamError::malformed(
            "reference",
            format!(
                "reference is {}x{}, computed spectrum is {}x{}",
                reference.nrows(),
                reference.ncols(),
                computed.nrows(),
                computed.ncols()
            ),
        ));
    }

    let mut worst = (0, 0);
    let mut max_rel_err_pct = 0.0_f64;
    for j in 0..reference.ncols() {
        for i in 0..reference.nrows() {
            let err = relative_error_pct(reference[(i, j)], computed[(i, j)]);
            // NaN compares false; keep it as the worst cell so it cannot pass.
            if err > max_rel_err_pct || err.is_nan() {
                max_rel_err_pct = err;
                worst = (i, j);
                if err.is_nan() {
                    break;
                }
            }
        }
        if max_rel_err_pct.is_nan() {
            break;
        }
    }

    Ok(ValidationReport {
        model,
        cells: reference.len(),
        max_rel_err_pct,
        worst,
        tolerance_pct,
    })
}

/// Evaluate `model.predict(proxy)` and compare against `reference`.
///
/// Solar-SPAM reference data is published as energy flux, so its photon-flux
/// output is converted back before comparing.
pub fn validate_model(
    model: &dyn SpectrumModel,
    proxy: &ProxyInput,
    reference: &DMatrix<f64>,
    tolerance_pct: f64,
) -> SpamResult<ValidationReport> {
    let result = model.predict(proxy)?;
    let computed = match model.kind() {
        ModelKind::SolarSpam => photon_to_energy_flux(&result.flux, &solar_wavelength_grid())?,
        ModelKind::AeroSpam | ModelKind::LymanAlpha => result.flux,
    };
    let report = compare_matrices(model.kind(), reference, &computed, tolerance_pct)?;
    if report.passed() {
        tracing::info!(model = %report.model, max_rel_err_pct = report.max_rel_err_pct, "reference validation passed");
    } else {
        tracing::warn!(
            model = %report.model,
            max_rel_err_pct = report.max_rel_err_pct,
            row = report.worst.0,
            column = report.worst.1,
            "reference validation failed"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::{aero_bands, aero_lines, solar_table};
    use crate::models::{AeroSpam, SolarSpam};

    #[test]
    fn identical_matrices_pass() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let report = compare_matrices(ModelKind::AeroSpam, &m, &m, 1e-7).unwrap();
        assert_eq!(report.max_rel_err_pct, 0.0);
        assert!(report.passed());
    }

    #[test]
    fn worst_cell_is_located() {
        let r = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut c = r.clone();
        c[(1, 0)] = 3.3;
        let report = compare_matrices(ModelKind::AeroSpam, &r, &c, 1.0).unwrap();
        assert_eq!(report.worst, (1, 0));
        assert!((report.max_rel_err_pct - 10.0).abs() < 1e-9);
        assert!(!report.passed());
    }

    #[test]
    fn nan_never_passes() {
        let r = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let c = DMatrix::from_row_slice(1, 2, &[f64::NAN, 2.0]);
        let report = compare_matrices(ModelKind::AeroSpam, &r, &c, 1.0).unwrap();
        assert!(!report.passed());
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let r = DMatrix::zeros(37, 15);
        let c = DMatrix::zeros(20, 15);
        assert!(compare_matrices(ModelKind::AeroSpam, &r, &c, 1.0).is_err());
    }

    #[test]
    fn aero_predict_validates_against_itself() {
        let m = AeroSpam::new(aero_bands(), aero_lines()).unwrap();
        let proxy = ProxyInput::range(65.0, 220.0, 10.0).unwrap();
        let reference = m.predict(&proxy).unwrap().flux;
        let report = validate_model(&m, &proxy, &reference, 1e-7).unwrap();
        assert!(report.passed());
        assert_eq!(report.cells, 37 * 16);
    }

    #[test]
    fn solar_is_compared_in_energy_flux() {
        let m = SolarSpam::new(solar_table()).unwrap();
        let proxy = ProxyInput::from([65.0, 140.0, 215.0]);

        // Reference built directly from the polynomial, without photon conversion.
        let t = solar_table();
        let reference = DMatrix::from_fn(190, 3, |i, j| {
            let x = proxy.values()[j];
            t.column("P1").unwrap()[i] * x * x + t.column("P2").unwrap()[i] * x + t.column("P3").unwrap()[i]
        });
        let report = validate_model(&m, &proxy, &reference, 1e-2).unwrap();
        assert!(report.passed(), "max error {}%", report.max_rel_err_pct);
    }
}
