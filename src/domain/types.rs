//! Shared configuration enums and run configuration.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::ProxyInput;

/// Which empirical model to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// F10.7-driven model: 20 bands and 17 lines in 5-105 nm.
    #[value(name = "aero")]
    AeroSpam,
    /// F10.7-driven model: 190 one-nanometre bins in 0-190 nm, photon flux output.
    #[value(name = "solar")]
    SolarSpam,
    /// Lyman-alpha driven model: 20 bands, linear in `[lac, lac²]`.
    #[value(name = "lac")]
    LymanAlpha,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::AeroSpam, ModelKind::SolarSpam, ModelKind::LymanAlpha];

    /// Human-readable name, also stored in result attributes.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::AeroSpam => "Aero-SPAM",
            ModelKind::SolarSpam => "Solar-SPAM",
            ModelKind::LymanAlpha => "Lyman-alpha SPAM",
        }
    }

    /// Identifier used by coefficient stores to locate tables.
    pub fn store_id(self) -> &'static str {
        match self {
            ModelKind::AeroSpam => "aero_spam",
            ModelKind::SolarSpam => "solar_spam",
            ModelKind::LymanAlpha => "lyman_alpha",
        }
    }

    pub fn proxy(self) -> ProxyIndex {
        match self {
            ModelKind::AeroSpam | ModelKind::SolarSpam => ProxyIndex::F107,
            ModelKind::LymanAlpha => ProxyIndex::LymanAlpha,
        }
    }

    /// Row count of the band table.
    pub fn band_count(self) -> usize {
        match self {
            ModelKind::AeroSpam => 20,
            ModelKind::SolarSpam => 190,
            ModelKind::LymanAlpha => 20,
        }
    }

    /// Row count of the line table (only Aero-SPAM has one).
    pub fn line_count(self) -> Option<usize> {
        match self {
            ModelKind::AeroSpam => Some(17),
            ModelKind::SolarSpam | ModelKind::LymanAlpha => None,
        }
    }

    /// Row count of the `predict` output.
    pub fn predict_count(self) -> usize {
        self.band_count() + self.line_count().unwrap_or(0)
    }

    /// Relative tolerance (percent) used when validating against published reference data.
    ///
    /// Solar-SPAM is compared after converting back to energy flux, which loses a few digits.
    pub fn default_tolerance_pct(self) -> f64 {
        match self {
            ModelKind::SolarSpam => 1e-2,
            ModelKind::AeroSpam | ModelKind::LymanAlpha => 1e-7,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Space-weather proxy that drives a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyIndex {
    F107,
    LymanAlpha,
}

impl ProxyIndex {
    /// Name of the proxy axis in results.
    pub fn axis_name(self) -> &'static str {
        match self {
            ProxyIndex::F107 => "F107",
            ProxyIndex::LymanAlpha => "lac",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProxyIndex::F107 => "F10.7",
            ProxyIndex::LymanAlpha => "Lyman-alpha",
        }
    }

    pub fn units(self) -> &'static str {
        match self {
            ProxyIndex::F107 => "10^-22 · W · m^-2 · Hz^-1",
            ProxyIndex::LymanAlpha => "W · m^-2",
        }
    }
}

/// Which spectrum a result holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectrumKind {
    Bands,
    Lines,
    /// Bands followed by lines (`predict`).
    Merged,
}

impl SpectrumKind {
    /// Suffix used when several results are exported side by side.
    pub fn file_suffix(self) -> &'static str {
        match self {
            SpectrumKind::Bands => "bands",
            SpectrumKind::Lines => "lines",
            SpectrumKind::Merged => "spectrum",
        }
    }
}

/// Which model operation a CLI run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Bands,
    Lines,
    Spectra,
    Predict,
}

/// A spectrum run as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub model: ModelKind,
    pub operation: Operation,
    pub coeffs_dir: PathBuf,
    pub proxy: ProxyInput,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A reference-validation run.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub model: ModelKind,
    pub coeffs_dir: PathBuf,
    pub proxy: ProxyInput,
    pub reference: PathBuf,
    /// Maximum allowed relative error in percent.
    pub tolerance_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_count_merges_bands_and_lines() {
        assert_eq!(ModelKind::AeroSpam.predict_count(), 37);
        assert_eq!(ModelKind::SolarSpam.predict_count(), 190);
        assert_eq!(ModelKind::LymanAlpha.predict_count(), 20);
    }

    #[test]
    fn proxy_axis_names() {
        assert_eq!(ModelKind::AeroSpam.proxy().axis_name(), "F107");
        assert_eq!(ModelKind::LymanAlpha.proxy().axis_name(), "lac");
    }
}
