//! Proxy-index input.
//!
//! A model accepts either one proxy value or an ordered sequence of them. All
//! boundary conversions (text, JSON) validate here, before any matrix is built.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{SpamError, SpamResult};

/// Largest number of values a `start:stop:step` range may expand to.
pub const MAX_RANGE_LEN: usize = 1_000_000;

/// One proxy value or an ordered sequence of proxy values.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyInput {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl ProxyInput {
    /// Values in caller order. A scalar is a one-element slice.
    pub fn values(&self) -> &[f64] {
        match self {
            ProxyInput::Scalar(v) => std::slice::from_ref(v),
            ProxyInput::Sequence(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ProxyInput::Scalar(_))
    }

    /// Half-open range `[start, stop)` with the given step (numpy `arange` semantics).
    pub fn range(start: f64, stop: f64, step: f64) -> SpamResult<Self> {
        if step == 0.0 || !step.is_finite() || !start.is_finite() || !stop.is_finite() {
            return Err(SpamError::invalid_input(format!(
                "range {start}:{stop}:{step}"
            )));
        }
        let count = ((stop - start) / step).ceil();
        if count > MAX_RANGE_LEN as f64 {
            return Err(SpamError::invalid_input(format!(
                "range {start}:{stop}:{step} has {count} values (at most {MAX_RANGE_LEN})"
            )));
        }
        let count = if count > 0.0 { count as usize } else { 0 };
        let values = (0..count).map(|i| start + i as f64 * step).collect();
        Ok(ProxyInput::Sequence(values))
    }

    /// Convert a JSON value: a number or an array of numbers.
    pub fn from_json(value: &Value) -> SpamResult<Self> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(ProxyInput::Scalar)
                .ok_or_else(|| SpamError::invalid_input(format!("number {n}"))),
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let v = match item {
                        Value::Number(n) => n.as_f64(),
                        _ => None,
                    };
                    match v {
                        Some(v) => values.push(v),
                        None => {
                            return Err(SpamError::HeterogeneousSequence {
                                index,
                                found: json_type_name(item).to_string(),
                            });
                        }
                    }
                }
                Ok(ProxyInput::Sequence(values))
            }
            other => Err(SpamError::invalid_input(json_type_name(other))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse CLI text.
///
/// Accepted forms:
/// - `150` (scalar)
/// - `65,75,85` or `65 75 85` (sequence)
/// - `65:220:10` (range, stop excluded)
impl FromStr for ProxyInput {
    type Err = SpamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains(':') {
            let parts: Vec<&str> = s.split(':').map(str::trim).collect();
            let [start, stop, step] = parts.as_slice() else {
                return Err(SpamError::invalid_input(format!("'{s}' (range must be start:stop:step)")));
            };
            let parse = |tok: &str| {
                tok.parse::<f64>()
                    .map_err(|_| SpamError::invalid_input(format!("'{tok}' in range '{s}'")))
            };
            return ProxyInput::range(parse(*start)?, parse(*stop)?, parse(*step)?);
        }

        let is_list = s.contains(',') || s.contains(char::is_whitespace);
        if !is_list {
            return s
                .parse::<f64>()
                .map(ProxyInput::Scalar)
                .map_err(|_| SpamError::invalid_input(format!("'{s}'")));
        }

        // With commas every field counts, so `65,,75` is an error at index 1.
        // Without them runs of whitespace separate values.
        let tokens: Vec<&str> = if s.contains(',') {
            s.split(',').map(str::trim).collect()
        } else {
            s.split_whitespace().collect()
        };

        let mut values = Vec::with_capacity(tokens.len());
        for (index, tok) in tokens.into_iter().enumerate() {
            let v = tok.parse::<f64>().map_err(|_| SpamError::HeterogeneousSequence {
                index,
                found: format!("'{tok}'"),
            })?;
            values.push(v);
        }
        Ok(ProxyInput::Sequence(values))
    }
}

impl From<f64> for ProxyInput {
    fn from(value: f64) -> Self {
        ProxyInput::Scalar(value)
    }
}

impl From<f32> for ProxyInput {
    fn from(value: f32) -> Self {
        ProxyInput::Scalar(f64::from(value))
    }
}

impl From<i32> for ProxyInput {
    fn from(value: i32) -> Self {
        ProxyInput::Scalar(f64::from(value))
    }
}

impl From<u32> for ProxyInput {
    fn from(value: u32) -> Self {
        ProxyInput::Scalar(f64::from(value))
    }
}

impl From<Vec<f64>> for ProxyInput {
    fn from(values: Vec<f64>) -> Self {
        ProxyInput::Sequence(values)
    }
}

impl From<&[f64]> for ProxyInput {
    fn from(values: &[f64]) -> Self {
        ProxyInput::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for ProxyInput {
    fn from(values: [f64; N]) -> Self {
        ProxyInput::Sequence(values.to_vec())
    }
}

impl From<Vec<i32>> for ProxyInput {
    fn from(values: Vec<i32>) -> Self {
        ProxyInput::Sequence(values.into_iter().map(f64::from).collect())
    }
}
