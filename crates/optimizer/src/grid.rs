// In crates/optimizer/src/grid.rs

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strategies::{ParamValue, ParameterSet};

use crate::{Error, Result};

/// How one parameter is swept.
///
/// In TOML: `period = [10, 20, 60]`, `period = { start = 10, end = 30, step = 5 }`
/// or a fixed `period = 14`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamRange {
    List(Vec<ParamValue>),
    Range {
        start: ParamValue,
        end: ParamValue,
        #[serde(default)]
        step: Option<ParamValue>,
    },
    Fixed(ParamValue),
}

impl ParamRange {
    /// The values this range takes, in declared order. `end` is inclusive.
    pub fn values(&self, param: &str) -> Result<Vec<ParamValue>> {
        match self {
            ParamRange::List(values) if values.is_empty() => Err(Error::invalid_range(param, "list is empty")),
            ParamRange::List(values) => Ok(values.clone()),
            ParamRange::Fixed(value) => Ok(vec![*value]),
            ParamRange::Range { start, end, step } => expand_range(param, *start, *end, *step),
        }
    }
}

fn expand_range(param: &str, start: ParamValue, end: ParamValue, step: Option<ParamValue>) -> Result<Vec<ParamValue>> {
    let step = step.unwrap_or(ParamValue::Int(1));
    if step.as_f64() <= 0.0 || !step.as_f64().is_finite() {
        return Err(Error::invalid_range(param, format!("step must be positive, got {step}")));
    }
    if start.as_f64() > end.as_f64() {
        return Err(Error::invalid_range(param, format!("start {start} is after end {end}")));
    }

    if let (ParamValue::Int(start), ParamValue::Int(end), ParamValue::Int(step)) = (start, end, step) {
        let step = usize::try_from(step).map_err(|_| Error::invalid_range(param, "step is too large"))?;
        return Ok((start..=end).step_by(step).map(ParamValue::Int).collect());
    }

    // Values are computed from the start rather than accumulated, so 0.1 steps do not drift.
    let (start, end, step) = (start.as_f64(), end.as_f64(), step.as_f64());
    let count = ((end - start) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| ParamValue::Float(start + i as f64 * step)).collect())
}

/// The sweep ranges for one strategy family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterGrid(BTreeMap<String, ParamRange>);

impl ParameterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, param: &str, range: ParamRange) -> Self {
        self.0.insert(param.to_string(), range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn params(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Every combination of the grid's values.
    ///
    /// Parameters vary in name order with the last name changing fastest, and
    /// each parameter follows its declared value order. Ranking ties fall back
    /// to this order.
    pub fn expand(&self) -> Result<Vec<ParameterSet>> {
        if self.0.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let names: Vec<&String> = self.0.keys().collect();
        let axes = self
            .0
            .iter()
            .map(|(name, range)| range.values(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(axes
            .into_iter()
            .multi_cartesian_product()
            .map(|values| {
                names
                    .iter()
                    .zip(values)
                    .map(|(name, value)| ((*name).clone(), value))
                    .collect()
            })
            .collect())
    }

    /// Number of combinations `expand` yields.
    pub fn combinations(&self) -> Result<usize> {
        self.0
            .iter()
            .map(|(name, range)| range.values(name).map(|v| v.len()))
            .product()
    }
}

impl FromIterator<(String, ParamRange)> for ParameterGrid {
    fn from_iter<I: IntoIterator<Item = (String, ParamRange)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
