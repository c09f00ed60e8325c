use std::collections::BTreeMap;
use std::fmt;

use crate::{Error, Result};

/// Numeric value stored under a result tag, keeping its numeric kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatValue {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer (counts).
    Unsigned(u64),
    /// Floating point value; may be NaN for undefined estimates.
    Float(f64),
}

impl StatValue {
    /// Value widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            StatValue::Int(v) => v as f64,
            StatValue::Unsigned(v) => v as f64,
            StatValue::Float(v) => v,
        }
    }

    /// Value as an unsigned count, if it is one.
    pub fn as_unsigned(self) -> Option<u64> {
        match self {
            StatValue::Unsigned(v) => Some(v),
            _ => None,
        }
    }

    /// True for NaN floats.
    pub fn is_nan(self) -> bool {
        matches!(self, StatValue::Float(v) if v.is_nan())
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Int(v) => write!(f, "{v}"),
            StatValue::Unsigned(v) => write!(f, "{v}"),
            StatValue::Float(v) if v.is_nan() => write!(f, "NA"),
            StatValue::Float(v) => match f.precision() {
                Some(p) => write!(f, "{v:.p$}"),
                None => write!(f, "{v}"),
            },
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Int(v)
    }
}

impl From<i32> for StatValue {
    fn from(v: i32) -> Self {
        StatValue::Int(i64::from(v))
    }
}

impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        StatValue::Unsigned(v)
    }
}

impl From<u32> for StatValue {
    fn from(v: u32) -> Self {
        StatValue::Unsigned(u64::from(v))
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::Unsigned(v as u64)
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

/// Values computed by a statistic, one per tag.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatResult {
    values: BTreeMap<String, StatValue>,
}

impl StatResult {
    /// Empty result.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Value stored under `tag`.
    pub fn value(&self, tag: &str) -> Result<StatValue> {
        self.values
            .get(tag)
            .copied()
            .ok_or_else(|| Error::Lookup(format!("no value found for tag '{tag}'")))
    }

    /// Store a value, overwriting any previous one.
    pub fn set_value(&mut self, tag: impl Into<String>, value: impl Into<StatValue>) {
        self.values.insert(tag.into(), value.into());
    }

    /// Whether a value is stored under `tag`.
    pub fn has_value(&self, tag: &str) -> bool {
        self.values.contains_key(tag)
    }

    /// Tags with a stored value, sorted.
    pub fn available_tags(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(tag, value)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, StatValue)> + '_ {
        self.values.iter().map(|(tag, value)| (tag.as_str(), *value))
    }
}

/// Result holding a single value under a fixed tag.
///
/// Writes addressed to any other tag fail with [`Error::Lookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleStatResult {
    name: String,
    inner: StatResult,
}

impl SimpleStatResult {
    /// New result for `name`, initialised to 0.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut inner = StatResult::new();
        inner.set_value(name.clone(), 0i64);
        Self { name, inner }
    }

    /// The single tag of this result.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn get(&self) -> StatValue {
        self.inner.values.get(&self.name).copied().unwrap_or(StatValue::Int(0))
    }

    /// Overwrite the value.
    pub fn set(&mut self, value: impl Into<StatValue>) {
        self.inner.set_value(self.name.clone(), value);
    }

    /// Overwrite the value, checking that `tag` is this result's tag.
    pub fn set_value(&mut self, tag: &str, value: impl Into<StatValue>) -> Result<()> {
        if tag != self.name {
            return Err(Error::Lookup(format!(
                "invalid tag '{tag}' for single-value result '{}'",
                self.name
            )));
        }
        self.set(value);
        Ok(())
    }

    /// Read-only view as a general result.
    pub fn as_result(&self) -> &StatResult {
        &self.inner
    }
}
