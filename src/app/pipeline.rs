//! Shared run logic, independent of presentation:
//! coefficient store -> model -> operation -> results.

use crate::domain::{Operation, ProxyInput, RunConfig, SpectrumResult, ValidateConfig};
use crate::error::{SpamError, SpamResult};
use crate::io::{CsvCoefficientStore, read_reference_csv};
use crate::models::{SpectrumModel, load_model};
use crate::report::{ValidationReport, validate_model};

/// Load the configured model and run one operation.
///
/// `spectra` yields bands then lines; the other operations yield one result.
pub fn run_spectrum(config: &RunConfig) -> SpamResult<Vec<SpectrumResult>> {
    let store = CsvCoefficientStore::new(&config.coeffs_dir);
    let model = load_model(config.model, &store)?;
    tracing::debug!(
        model = %config.model,
        operation = ?config.operation,
        inputs = config.proxy.len(),
        "evaluating model"
    );
    evaluate(model.as_ref(), config.operation, &config.proxy)
}

fn evaluate(
    model: &dyn SpectrumModel,
    operation: Operation,
    proxy: &ProxyInput,
) -> SpamResult<Vec<SpectrumResult>> {
    let results = match operation {
        Operation::Bands => vec![model.spectral_bands(proxy)?],
        Operation::Lines => match model.spectral_lines(proxy)? {
            Some(lines) => vec![lines],
            None => {
                return Err(SpamError::NoSpectralLines {
                    model: model.kind().to_string(),
                });
            }
        },
        Operation::Spectra => {
            let spectra = model.spectra(proxy)?;
            std::iter::once(spectra.bands).chain(spectra.lines).collect()
        }
        Operation::Predict => vec![model.predict(proxy)?],
    };
    Ok(results)
}

/// Load the configured model and compare its `predict` output with the reference CSV.
pub fn run_validation(config: &ValidateConfig) -> SpamResult<ValidationReport> {
    let store = CsvCoefficientStore::new(&config.coeffs_dir);
    let model = load_model(config.model, &store)?;
    let reference = read_reference_csv(&config.reference)?;
    validate_model(model.as_ref(), &config.proxy, &reference, config.tolerance_pct)
}
