use crate::{Error, Result};

/// Maps values to half-open bins `[b[i], b[i+1])`, numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorizer {
    bounds: Vec<f64>,
}

impl Categorizer {
    /// Create a categorizer from at least two bounds. Bounds are sorted.
    pub fn new(mut bounds: Vec<f64>) -> Result<Self> {
        if bounds.len() < 2 {
            return Err(Error::configuration(format!(
                "at least two bounds are required to define a category, got {}",
                bounds.len()
            )));
        }
        if bounds.iter().any(|b| b.is_nan()) {
            return Err(Error::configuration("category bounds must not be NaN"));
        }
        bounds.sort_by(f64::total_cmp);
        Ok(Self { bounds })
    }

    /// Number of bins.
    pub fn number_of_categories(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Sorted bounds.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// 1-based category of `value`.
    pub fn category(&self, value: f64) -> Result<usize> {
        let lower = self.bounds[0];
        let upper = self.bounds[self.bounds.len() - 1];
        if value >= lower {
            if let Some(idx) = self.bounds[1..].iter().position(|&b| value < b) {
                return Ok(idx + 1);
            }
        }
        Err(Error::OutOfRange {
            value,
            lower,
            upper,
        })
    }
}
