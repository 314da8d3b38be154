//! Result assembly: attach axes, auxiliary arrays and attributes to raw flux.

use nalgebra::DMatrix;

use crate::domain::{Axis, AuxArray, CoefficientTable, FLUX_VARIABLE, ModelKind, SpectrumKind, SpectrumResult};
use crate::error::{SpamError, SpamResult};
use crate::math::DesignMatrix;

pub const SPECTRA_UNITS: &str = "m^-2 · s^-1 · nm^-1";
pub const WAVELENGTH_UNITS: &str = "nm";

/// Assemble a band-style result.
///
/// The spectral axis is `band_center` (from the `center` column); `lband`,
/// `uband` and `center` are attached per row. Used for band spectra and for the
/// merged band+line `predict` output.
pub fn assemble_bands(
    model: ModelKind,
    kind: SpectrumKind,
    raw: DMatrix<f64>,
    table: &CoefficientTable,
    design: &DesignMatrix,
) -> SpamResult<SpectrumResult> {
    check_shape(&raw, table, design)?;

    let lband = table.require("lband")?.to_vec();
    let uband = table.require("uband")?.to_vec();
    let center = table.require("center")?.to_vec();

    let mut attrs = base_attrs(model);
    attrs.push(("lband".into(), "lower boundary of wavelength interval".into()));
    attrs.push(("uband".into(), "upper boundary of wavelength interval".into()));
    attrs.push(("center".into(), "center of wavelength interval".into()));

    Ok(SpectrumResult {
        model,
        kind,
        flux: raw,
        spectral_axis: Axis::new("band_center", center.clone()),
        proxy_axis: Axis::new(model.proxy().axis_name(), design.proxy_values()),
        aux: vec![
            AuxArray { name: "lband".into(), values: lband },
            AuxArray { name: "uband".into(), values: uband },
            AuxArray { name: "center".into(), values: center },
        ],
        attrs,
    })
}

/// Assemble a line result: spectral axis `lambda`, one `line_lambda` per row.
pub fn assemble_lines(
    model: ModelKind,
    raw: DMatrix<f64>,
    table: &CoefficientTable,
    design: &DesignMatrix,
) -> SpamResult<SpectrumResult> {
    check_shape(&raw, table, design)?;

    let lambda = table.require("lambda")?.to_vec();

    let mut attrs = base_attrs(model);
    attrs.push(("line_lambda".into(), "wavelength of the spectral line".into()));

    Ok(SpectrumResult {
        model,
        kind: SpectrumKind::Lines,
        flux: raw,
        spectral_axis: Axis::new("lambda", lambda.clone()),
        proxy_axis: Axis::new(model.proxy().axis_name(), design.proxy_values()),
        aux: vec![AuxArray { name: "line_lambda".into(), values: lambda }],
        attrs,
    })
}

fn base_attrs(model: ModelKind) -> Vec<(String, String)> {
    let proxy = model.proxy();
    vec![
        ("model name".into(), model.display_name().into()),
        (format!("{} units", proxy.label()), proxy.units().into()),
        ("spectra units".into(), SPECTRA_UNITS.into()),
        ("wavelength units".into(), WAVELENGTH_UNITS.into()),
        (FLUX_VARIABLE.into(), "modeled EUV solar photon flux spectra".into()),
    ]
}

fn check_shape(raw: &DMatrix<f64>, table: &CoefficientTable, design: &DesignMatrix) -> SpamResult<()> {
    if raw.nrows() != table.rows() || raw.ncols() != design.len() {
        return Err(SpamError::malformed(
            table.name(),
            format!(
                "flux is {}x{}, expected {}x{}",
                raw.nrows(),
                raw.ncols(),
                table.rows(),
                design.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProxyInput;
    use crate::math::{Basis, build};

    fn band_table() -> CoefficientTable {
        CoefficientTable::from_columns(
            "bands",
            vec![
                ("lband".into(), vec![5.0, 10.0]),
                ("uband".into(), vec![10.0, 15.0]),
                ("center".into(), vec![7.5, 12.5]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn proxy_axis_uses_unsquared_values() {
        let design = build(Basis::Quadratic, &ProxyInput::from([70.0, 150.0])).unwrap();
        let raw = DMatrix::zeros(2, 2);
        let res = assemble_bands(ModelKind::AeroSpam, SpectrumKind::Bands, raw, &band_table(), &design).unwrap();
        assert_eq!(res.proxy_axis.name, "F107");
        assert_eq!(res.proxy_axis.values, vec![70.0, 150.0]);
        assert_eq!(res.spectral_axis.values, vec![7.5, 12.5]);
        assert_eq!(res.aux("uband"), Some(&[10.0, 15.0][..]));
        assert_eq!(res.attr("F10.7 units"), Some("10^-22 · W · m^-2 · Hz^-1"));
        assert_eq!(res.attr("model name"), Some("Aero-SPAM"));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let design = build(Basis::Quadratic, &ProxyInput::Scalar(70.0)).unwrap();
        let raw = DMatrix::zeros(3, 1);
        assert!(assemble_bands(ModelKind::AeroSpam, SpectrumKind::Bands, raw, &band_table(), &design).is_err());
    }
}
