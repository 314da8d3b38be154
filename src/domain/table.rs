//! Coefficient tables.
//!
//! A table is an ordered set of rows (one per band or line) with named columns.
//! Numeric columns hold polynomial coefficients (`P1 P2 P3` or `B0 B1`) and
//! wavelength metadata (`lband uband center` or `lambda`). Text columns (labels,
//! ion names) are carried through but never used in evaluation.
//!
//! Tables are immutable once built; models validate the columns they need at
//! construction time.

use nalgebra::DMatrix;

use crate::error::{SpamError, SpamResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    name: String,
    rows: usize,
    numeric: Vec<(String, Vec<f64>)>,
    text: Vec<(String, Vec<String>)>,
}

impl CoefficientTable {
    /// Build a table from numeric columns.
    ///
    /// All columns must have the same length and distinct names.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> SpamResult<Self> {
        let name = name.into();
        let Some((_, first)) = columns.first() else {
            return Err(SpamError::malformed(name, "table has no columns"));
        };
        let rows = first.len();

        let mut table = Self {
            name,
            rows,
            numeric: Vec::with_capacity(columns.len()),
            text: Vec::new(),
        };
        for (column, values) in columns {
            table.push_numeric(column, values)?;
        }
        Ok(table)
    }

    /// Append a text column.
    pub fn with_text_column(mut self, column: impl Into<String>, values: Vec<String>) -> SpamResult<Self> {
        let column = column.into();
        self.check_new_column(&column, values.len())?;
        self.text.push((column, values));
        Ok(self)
    }

    fn push_numeric(&mut self, column: String, values: Vec<f64>) -> SpamResult<()> {
        self.check_new_column(&column, values.len())?;
        self.numeric.push((column, values));
        Ok(())
    }

    fn check_new_column(&self, column: &str, len: usize) -> SpamResult<()> {
        if self.has_column(column) {
            return Err(SpamError::malformed(
                &self.name,
                format!("duplicate column `{column}`"),
            ));
        }
        if len != self.rows {
            return Err(SpamError::malformed(
                &self.name,
                format!("column `{column}` has {len} rows, expected {}", self.rows),
            ));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.numeric.iter().any(|(c, _)| c == column) || self.text.iter().any(|(c, _)| c == column)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|(c, _)| c.as_str())
            .chain(self.text.iter().map(|(c, _)| c.as_str()))
    }

    pub fn column(&self, column: &str) -> Option<&[f64]> {
        self.numeric
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_slice())
    }

    pub fn text_column(&self, column: &str) -> Option<&[String]> {
        self.text
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_slice())
    }

    /// Numeric column lookup that fails with a table error when missing.
    pub fn require(&self, column: &str) -> SpamResult<&[f64]> {
        if let Some(values) = self.column(column) {
            return Ok(values);
        }
        let reason = if self.text_column(column).is_some() {
            format!("column `{column}` is not numeric")
        } else {
            format!("missing column `{column}`")
        };
        Err(SpamError::malformed(&self.name, reason))
    }

    /// Fail unless the table has exactly `expected` rows.
    pub fn expect_rows(&self, expected: usize) -> SpamResult<()> {
        if self.rows != expected {
            return Err(SpamError::malformed(
                &self.name,
                format!("expected {expected} rows, found {}", self.rows),
            ));
        }
        Ok(())
    }

    /// Stack the named columns into a `rows × columns.len()` matrix.
    pub fn coefficient_matrix(&self, columns: &[&str]) -> SpamResult<DMatrix<f64>> {
        let cols = columns
            .iter()
            .map(|c| self.require(c))
            .collect::<SpamResult<Vec<_>>>()?;
        Ok(DMatrix::from_fn(self.rows, cols.len(), |i, j| cols[j][i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CoefficientTable {
        CoefficientTable::from_columns(
            "test",
            vec![
                ("P1".to_string(), vec![1.0, 2.0]),
                ("P2".to_string(), vec![3.0, 4.0]),
                ("P3".to_string(), vec![5.0, 6.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn coefficient_matrix_is_rows_by_columns() {
        let m = table().coefficient_matrix(&["P1", "P2", "P3"]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 2)], 6.0);
    }

    #[test]
    fn mismatched_column_lengths_are_rejected() {
        let err = CoefficientTable::from_columns(
            "bad",
            vec![
                ("P1".to_string(), vec![1.0, 2.0]),
                ("P2".to_string(), vec![3.0]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("column `P2` has 1 rows, expected 2"));
    }

    #[test]
    fn missing_and_text_columns_are_reported() {
        let t = table()
            .with_text_column("label", vec!["a".into(), "b".into()])
            .unwrap();
        assert!(t.require("B0").unwrap_err().to_string().contains("missing column `B0`"));
        assert!(t.require("label").unwrap_err().to_string().contains("not numeric"));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = table().with_text_column("P1", vec!["a".into(), "b".into()]).unwrap_err();
        assert!(err.to_string().contains("duplicate column `P1`"));
    }
}
