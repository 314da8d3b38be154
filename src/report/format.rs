//! Formatted terminal output.
//!
//! Kept apart from the models so output changes stay localized.

use crate::domain::{SpectrumKind, SpectrumResult};
use crate::report::ValidationReport;

/// Proxy columns shown in the terminal table; exports carry all of them.
pub const MAX_TABLE_INPUTS: usize = 6;

/// Format the result header (model, operation, proxy, units).
pub fn format_result_header(result: &SpectrumResult) -> String {
    let mut out = String::new();
    let title = match result.kind {
        SpectrumKind::Bands => "spectral bands",
        SpectrumKind::Lines => "spectral lines",
        SpectrumKind::Merged => "full spectrum",
    };
    out.push_str(&format!("=== {} - {title} ===\n", result.model));

    let proxy = result.model.proxy();
    out.push_str(&format!(
        "Proxy: {} ({}) | n={} | {}\n",
        proxy.label(),
        proxy.units(),
        result.input_count(),
        fmt_inputs(&result.proxy_axis.values)
    ));
    out.push_str(&format!(
        "Flux: {} | rows={}\n",
        result.attr("spectra units").unwrap_or(""),
        result.band_count()
    ));
    out
}

/// Format a result as a fixed-width table: one row per band/line, one column
/// per proxy input (up to `MAX_TABLE_INPUTS`).
pub fn format_spectrum(result: &SpectrumResult) -> String {
    let mut out = format_result_header(result);
    out.push('\n');

    let shown = result.input_count().min(MAX_TABLE_INPUTS);
    let axis = &result.spectral_axis.name;

    let mut header = format!("{:>4} {:>12}", "#", truncate(axis, 12));
    let mut rule = format!("{:-<4} {:-<12}", "", "");
    for proxy in &result.proxy_axis.values[..shown] {
        header.push_str(&format!(" {:>12}", format!("{}={proxy}", result.proxy_axis.name)));
        rule.push_str(&format!(" {:-<12}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(rule.trim_end());
    out.push('\n');

    for band in result.band_numbers() {
        let mut line = format!("{band:>4} {:>12.3}", result.spectral_axis.values[band]);
        for input in 0..shown {
            line.push_str(&format!(" {:>12.4e}", result.flux[(band, input)]));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if shown < result.input_count() {
        out.push_str(&format!(
            "({} more inputs not shown; use --export or --export-json)\n",
            result.input_count() - shown
        ));
    }
    out
}

/// Format the outcome of a reference validation.
pub fn format_validation(report: &ValidationReport) -> String {
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    let mut out = format!("=== {} - reference validation ===\n", report.model);
    out.push_str(&format!("Cells compared: {}\n", report.cells));
    out.push_str(&format!(
        "Max relative error: {:.3e}% (row {}, input {})\n",
        report.max_rel_err_pct, report.worst.0, report.worst.1
    ));
    out.push_str(&format!("Tolerance: {:.1e}%\n", report.tolerance_pct));
    out.push_str(&format!("Result: {verdict}\n"));
    out
}

fn fmt_inputs(v: &[f64]) -> String {
    if v.len() <= MAX_TABLE_INPUTS {
        let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
        return format!("[{}]", parts.join(", "));
    }
    let (min, max) = v
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    format!("range=[{min}, {max}]")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, ProxyInput};
    use crate::models::testing::{aero_bands, aero_lines, lac_table};
    use crate::models::{AeroSpam, LymanAlphaSpam, SpectrumModel};

    #[test]
    fn table_has_one_line_per_band() {
        let m = LymanAlphaSpam::new(lac_table()).unwrap();
        let r = m.spectral_bands(&ProxyInput::from([0.004, 0.006])).unwrap();
        let txt = format_spectrum(&r);

        assert!(txt.starts_with("=== Lyman-alpha SPAM - spectral bands ===\n"));
        assert!(txt.contains("lac=0.004"));
        // header + proxy + flux + blank + column header + rule + 20 bands
        assert_eq!(txt.lines().count(), 26);
        assert!(!txt.contains("more inputs"));
    }

    #[test]
    fn wide_inputs_are_elided() {
        let m = AeroSpam::new(aero_bands(), aero_lines()).unwrap();
        let proxy = ProxyInput::range(65.0, 220.0, 10.0).unwrap();
        let txt = format_spectrum(&m.predict(&proxy).unwrap());
        assert!(txt.contains("range=[65, 215]"));
        assert!(txt.contains("(10 more inputs not shown"));
    }

    #[test]
    fn validation_verdict() {
        let report = ValidationReport {
            model: ModelKind::SolarSpam,
            cells: 190,
            max_rel_err_pct: 5e-3,
            worst: (12, 0),
            tolerance_pct: 1e-2,
        };
        let txt = format_validation(&report);
        assert!(txt.contains("Result: PASS"));
        assert!(txt.contains("row 12, input 0"));
    }

    #[test]
    fn truncate_basic() {
        assert_eq!(truncate("band_center", 12), "band_center");
        assert_eq!(truncate("abcdefghijklmnop", 5), "abcd.");
    }
}
