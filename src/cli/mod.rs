//! Command-line parsing for the EUV spectrum models.
//!
//! Argument parsing and command dispatch stay separate from the model code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ModelKind, ProxyInput};

/// Environment variable naming the default coefficient directory.
pub const COEFFS_DIR_ENV: &str = "EUVSPAM_COEFFS_DIR";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "euvspam", version, about = "Empirical solar EUV spectrum models (Aero-SPAM, Solar-SPAM, Lyman-alpha)")]
pub struct Cli {
    /// Log progress to stderr (debug level). `RUST_LOG` overrides.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Flux in the model's spectral bands.
    Bands(SpectrumArgs),
    /// Flux in the model's spectral lines (Aero-SPAM only).
    Lines(SpectrumArgs),
    /// Bands and lines as two separate results.
    Spectra(SpectrumArgs),
    /// The model's complete spectrum (bands followed by lines for Aero-SPAM).
    Predict(SpectrumArgs),
    /// Compare `predict` output against a reference CSV.
    Validate(ValidateArgs),
    /// Plot a previously exported spectrum JSON.
    Plot(PlotArgs),
}

/// Options shared by the spectrum subcommands.
#[derive(Debug, Args, Clone)]
pub struct SpectrumArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Render an ASCII plot of the first proxy input.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the result(s) to long-format CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the result(s) to JSON (readable by `euvspam plot`).
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Model selection, proxy values and coefficient location.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Which model to evaluate.
    #[arg(short, long, value_enum, default_value_t = ModelKind::AeroSpam)]
    pub model: ModelKind,

    /// Proxy values: `150`, a list `65,75,85`, or a range `start:stop:step` (stop excluded).
    #[arg(short, long, allow_hyphen_values = true)]
    pub proxy: ProxyInput,

    /// Directory holding the coefficient CSV files.
    #[arg(long, value_name = "DIR", env = COEFFS_DIR_ENV, default_value = "coeffs")]
    pub coeffs: PathBuf,
}

/// Options for reference validation.
#[derive(Debug, Args, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Reference CSV: header row, then one row per band/line, one column per proxy value.
    #[arg(long, value_name = "CSV")]
    pub reference: PathBuf,

    /// Maximum relative error in percent (defaults per model).
    #[arg(long)]
    pub tolerance: Option<f64>,
}

/// Options for plotting a saved spectrum.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Spectrum JSON file produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub spectrum: PathBuf,

    /// Which proxy input (column) to plot.
    #[arg(long, default_value_t = 0)]
    pub input: usize,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_range_proxy() {
        let cli = Cli::parse_from(["euvspam", "bands", "--model", "solar", "--proxy", "65:80:5", "--coeffs", "c"]);
        let Command::Bands(args) = cli.command else {
            panic!("expected bands");
        };
        assert_eq!(args.model.model, ModelKind::SolarSpam);
        assert_eq!(args.model.proxy.values(), &[65.0, 70.0, 75.0]);
        assert_eq!(args.model.coeffs, PathBuf::from("c"));
    }

    #[test]
    fn bad_proxy_is_a_usage_error() {
        let res = Cli::try_parse_from(["euvspam", "predict", "--proxy", "abc"]);
        assert!(res.is_err());
    }
}
