//! Design matrices for the regression models.
//!
//! Each proxy value `x` becomes one row:
//!
//! - quadratic basis (P1, P2, P3): `[x², x, 1]`
//! - linear-in-square basis (B0, B1): `[x, x²]`
//!
//! The linear-in-square order is value-then-square, the reverse of the quadratic
//! basis. Coefficient tables for the Lyman-alpha model are fitted against that
//! order, so it must not be normalized.

use nalgebra::DMatrix;

use crate::domain::ProxyInput;
use crate::error::{SpamError, SpamResult};

/// Feature layout of a design row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    Quadratic,
    LinearSquare,
}

impl Basis {
    /// Number of features per row.
    pub fn width(self) -> usize {
        match self {
            Basis::Quadratic => 3,
            Basis::LinearSquare => 2,
        }
    }

    /// Column holding the untransformed proxy value.
    pub fn proxy_column(self) -> usize {
        match self {
            Basis::Quadratic => 1,
            Basis::LinearSquare => 0,
        }
    }

    /// Coefficient column names, in feature order.
    pub fn coefficient_columns(self) -> &'static [&'static str] {
        match self {
            Basis::Quadratic => &["P1", "P2", "P3"],
            Basis::LinearSquare => &["B0", "B1"],
        }
    }

    /// Fill a design row for `x`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `self.width()`.
    pub fn fill_row(self, x: f64, out: &mut [f64]) {
        match self {
            Basis::Quadratic => {
                out[0] = x * x;
                out[1] = x;
                out[2] = 1.0;
            }
            Basis::LinearSquare => {
                out[0] = x;
                out[1] = x * x;
            }
        }
    }
}

/// A validated design matrix: one row per proxy input, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    basis: Basis,
    rows: DMatrix<f64>,
}

impl DesignMatrix {
    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.rows
    }

    /// Number of inputs (rows).
    pub fn len(&self) -> usize {
        self.rows.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.nrows() == 0
    }

    /// The original (not squared) proxy values, recovered from the design.
    pub fn proxy_values(&self) -> Vec<f64> {
        self.rows
            .column(self.basis.proxy_column())
            .iter()
            .copied()
            .collect()
    }
}

/// Build the design matrix for `proxy`.
///
/// A scalar yields a one-row matrix, so callers always see a 2-D shape.
pub fn build(basis: Basis, proxy: &ProxyInput) -> SpamResult<DesignMatrix> {
    let values = proxy.values();
    if values.is_empty() {
        return Err(SpamError::invalid_input("an empty sequence"));
    }

    let width = basis.width();
    let mut row = vec![0.0; width];
    let mut data = Vec::with_capacity(values.len() * width);
    for &x in values {
        basis.fill_row(x, &mut row);
        data.extend_from_slice(&row);
    }

    Ok(DesignMatrix {
        basis,
        rows: DMatrix::from_row_slice(values.len(), width, &data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_yields_single_row() {
        let d = build(Basis::Quadratic, &ProxyInput::Scalar(150.0)).unwrap();
        assert_eq!(d.matrix().shape(), (1, 3));
        assert_eq!(d.proxy_values(), vec![150.0]);
    }

    #[test]
    fn quadratic_rows_are_exact_and_ordered() {
        let xs = [65.0, 0.1, 215.0, 73.3];
        let d = build(Basis::Quadratic, &ProxyInput::from(xs)).unwrap();
        assert_eq!(d.len(), xs.len());
        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(d.matrix()[(i, 0)].to_bits(), (x * x).to_bits());
            assert_eq!(d.matrix()[(i, 1)].to_bits(), x.to_bits());
            assert_eq!(d.matrix()[(i, 2)], 1.0);
        }
    }

    #[test]
    fn linear_square_basis_is_value_then_square() {
        // Reversed relative to the quadratic basis; coefficient tables depend on it.
        let d = build(Basis::LinearSquare, &ProxyInput::Scalar(3.0)).unwrap();
        assert_eq!(d.matrix().shape(), (1, 2));
        assert_eq!(d.matrix()[(0, 0)], 3.0);
        assert_eq!(d.matrix()[(0, 1)], 9.0);
        assert_eq!(d.proxy_values(), vec![3.0]);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = build(Basis::Quadratic, &ProxyInput::Sequence(vec![])).unwrap_err();
        assert!(matches!(err, SpamError::InvalidInputType { .. }));
    }
}
