//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the real main:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - loads a model from the coefficient directory
//! - evaluates it and prints tables/plots
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, PlotArgs, SpectrumArgs, ValidateArgs};
use crate::domain::{Operation, RunConfig, SpectrumResult, ValidateConfig};
use crate::error::AppError;

pub mod pipeline;

/// Exit code of a validation run that exceeded its tolerance.
pub const VALIDATION_FAILED_EXIT: u8 = 4;

/// Entry point for the `euvspam` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may set the coefficient directory; it must be loaded before clap
    // reads environment defaults.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Bands(args) => handle_spectrum(&args, Operation::Bands),
        Command::Lines(args) => handle_spectrum(&args, Operation::Lines),
        Command::Spectra(args) => handle_spectrum(&args, Operation::Spectra),
        Command::Predict(args) => handle_spectrum(&args, Operation::Predict),
        Command::Validate(args) => handle_validate(&args),
        Command::Plot(args) => handle_plot(&args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_spectrum(args: &SpectrumArgs, operation: Operation) -> Result<(), AppError> {
    let config = run_config_from_args(args, operation);
    let results = pipeline::run_spectrum(&config)?;

    for result in &results {
        println!("{}", crate::report::format_spectrum(result));
    }

    if config.plot {
        for result in &results {
            if let Some(plot) =
                crate::plot::render_spectrum_plot(result, 0, config.plot_width, config.plot_height)
            {
                println!("{plot}");
            }
        }
    }

    if let Some(path) = &config.export_csv {
        for (result, path) in export_paths(path, &results) {
            crate::io::write_spectrum_csv(&path, result)?;
        }
    }
    if let Some(path) = &config.export_json {
        for (result, path) in export_paths(path, &results) {
            crate::io::write_spectrum_json(&path, result)?;
        }
    }

    Ok(())
}

fn handle_validate(args: &ValidateArgs) -> Result<(), AppError> {
    let config = validate_config_from_args(args);
    let report = pipeline::run_validation(&config)?;

    println!("{}", crate::report::format_validation(&report));
    if report.passed() {
        Ok(())
    } else {
        Err(AppError::new(
            VALIDATION_FAILED_EXIT,
            format!(
                "{}: max relative error {:.3e}% exceeds tolerance {:.1e}%",
                report.model, report.max_rel_err_pct, report.tolerance_pct
            ),
        ))
    }
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let result = crate::io::read_spectrum_json(&args.spectrum)?;
    let plot = crate::plot::render_spectrum_plot(&result, args.input, args.width, args.height)
        .ok_or_else(|| {
            AppError::new(
                2,
                format!(
                    "input {} is out of range: the spectrum has {} proxy values",
                    args.input,
                    result.input_count()
                ),
            )
        })?;
    println!("{plot}");
    Ok(())
}

pub fn run_config_from_args(args: &SpectrumArgs, operation: Operation) -> RunConfig {
    RunConfig {
        model: args.model.model,
        operation,
        coeffs_dir: args.model.coeffs.clone(),
        proxy: args.model.proxy.clone(),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

pub fn validate_config_from_args(args: &ValidateArgs) -> ValidateConfig {
    ValidateConfig {
        model: args.model.model,
        coeffs_dir: args.model.coeffs.clone(),
        proxy: args.model.proxy.clone(),
        reference: args.reference.clone(),
        tolerance_pct: args
            .tolerance
            .unwrap_or_else(|| args.model.model.default_tolerance_pct()),
    }
}

/// One export path per result. A single result uses `path` as given; several
/// results (bands and lines) get a `_bands`/`_lines` suffix on the file stem.
fn export_paths<'a>(path: &Path, results: &'a [SpectrumResult]) -> Vec<(&'a SpectrumResult, PathBuf)> {
    if results.len() == 1 {
        return results.iter().map(|r| (r, path.to_path_buf())).collect();
    }
    results
        .iter()
        .map(|r| (r, suffixed(path, r.kind.file_suffix())))
        .collect()
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Axis, ModelKind, SpectrumKind};
    use nalgebra::DMatrix;

    fn result(kind: SpectrumKind) -> SpectrumResult {
        SpectrumResult {
            model: ModelKind::AeroSpam,
            kind,
            flux: DMatrix::zeros(1, 1),
            spectral_axis: Axis::new("band_center", vec![10.0]),
            proxy_axis: Axis::new("F107", vec![100.0]),
            aux: Vec::new(),
            attrs: Vec::new(),
        }
    }

    #[test]
    fn single_result_keeps_export_path() {
        let results = [result(SpectrumKind::Merged)];
        let paths = export_paths(Path::new("out/spec.csv"), &results);
        assert_eq!(paths[0].1, PathBuf::from("out/spec.csv"));
    }

    #[test]
    fn spectra_exports_are_suffixed() {
        let results = [result(SpectrumKind::Bands), result(SpectrumKind::Lines)];
        let paths = export_paths(Path::new("out/spec.json"), &results);
        assert_eq!(paths[0].1, PathBuf::from("out/spec_bands.json"));
        assert_eq!(paths[1].1, PathBuf::from("out/spec_lines.json"));
    }

    #[test]
    fn tolerance_defaults_per_model() {
        let cli = Cli::parse_from([
            "euvspam", "validate", "--model", "solar", "--proxy", "100", "--coeffs", "c", "--reference", "r.csv",
        ]);
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        let config = validate_config_from_args(&args);
        assert_eq!(config.tolerance_pct, 1e-2);
    }
}
