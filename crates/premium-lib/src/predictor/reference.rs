//! Simple fitted predictors
//!
//! Neither type trains anything: their parameters come from a model fitted
//! elsewhere, or from a fixed baseline.

use super::Predictor;
use crate::table::Table;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Predicts the same value for every row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantPredictor {
    name: String,
    value: f64,
}

impl ConstantPredictor {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Residual baseline that corrects nothing
    pub fn zero() -> Self {
        Self::new("zero", 0.0)
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Predictor for ConstantPredictor {
    fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        Ok(vec![self.value; table.n_rows()])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Linear model over named numeric columns
///
/// `prediction[i] = intercept + Σ weight * table[column][i]`. Columns not
/// listed in the coefficients are ignored, so the model can score a table
/// carrying extra features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearPredictor {
    name: String,
    intercept: f64,
    coefficients: Vec<(String, f64)>,
}

impl LinearPredictor {
    pub fn new(name: impl Into<String>, intercept: f64) -> Self {
        Self {
            name: name.into(),
            intercept,
            coefficients: Vec::new(),
        }
    }

    /// Add the weight of `column`
    pub fn with_coefficient(mut self, column: impl Into<String>, weight: f64) -> Self {
        self.coefficients.push((column.into(), weight));
        self
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[(String, f64)] {
        &self.coefficients
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        let mut predictions = vec![self.intercept; table.n_rows()];
        for (column, weight) in &self.coefficients {
            let values = table.numeric(column)?;
            for (prediction, value) in predictions.iter_mut().zip(values) {
                *prediction += weight * value;
            }
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
