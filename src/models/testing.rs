//! Synthetic coefficient tables with the published shapes, for unit tests.

use crate::domain::CoefficientTable;

const LINE_LAMBDA: [f64; 17] = [
    25.63, 28.415, 30.378, 36.807, 46.522, 49.222, 55.437, 58.433, 61.071, 63.03, 70.3, 76.5, 77.041, 78.936,
    97.702, 102.572, 103.191,
];

fn bands(n: usize, width: f64, start: f64) -> Vec<(String, Vec<f64>)> {
    let lband: Vec<f64> = (0..n).map(|i| start + width * i as f64).collect();
    let uband: Vec<f64> = lband.iter().map(|l| l + width).collect();
    let center: Vec<f64> = lband.iter().map(|l| l + width / 2.0).collect();
    vec![
        ("lband".into(), lband),
        ("uband".into(), uband),
        ("center".into(), center),
    ]
}

fn quadratic(n: usize) -> Vec<(String, Vec<f64>)> {
    vec![
        ("P1".into(), (0..n).map(|i| 1e-7 * (i + 1) as f64).collect()),
        ("P2".into(), (0..n).map(|i| 0.01 + 1e-3 * i as f64).collect()),
        ("P3".into(), (0..n).map(|i| 0.5 + 0.01 * i as f64).collect()),
    ]
}

pub(crate) fn aero_bands() -> CoefficientTable {
    let mut cols = quadratic(20);
    cols.extend(bands(20, 5.0, 5.0));
    CoefficientTable::from_columns("aero_spam_bands", cols).unwrap()
}

pub(crate) fn aero_lines() -> CoefficientTable {
    let mut cols = quadratic(17);
    cols.push(("lambda".into(), LINE_LAMBDA.to_vec()));
    CoefficientTable::from_columns("aero_spam_lines", cols).unwrap()
}

pub(crate) fn solar_table() -> CoefficientTable {
    let mut cols = quadratic(190);
    cols.extend(bands(190, 1.0, 0.0));
    CoefficientTable::from_columns("solar_spam_bands", cols).unwrap()
}

pub(crate) fn lac_table() -> CoefficientTable {
    let mut cols = vec![
        ("B0".into(), (0..20).map(|i| 10.0 + i as f64).collect()),
        ("B1".into(), (0..20).map(|i| 100.0 * (i + 1) as f64).collect()),
    ];
    cols.extend(bands(20, 5.0, 5.0));
    CoefficientTable::from_columns("lyman_alpha_bands", cols).unwrap()
}
