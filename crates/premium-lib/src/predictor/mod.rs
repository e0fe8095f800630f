//! Prediction over tables

mod hybrid;
mod reference;

pub use hybrid::HybridPredictor;
pub use reference::{ConstantPredictor, LinearPredictor};

use crate::table::Table;
use anyhow::Result;
use std::sync::Arc;

/// Trait for fitted prediction models
///
/// Implementations must already be trained: nothing in this crate fits a
/// model lazily. `predict` returns exactly one value per input row, in row
/// order.
pub trait Predictor: Send + Sync {
    /// Predict one value per row of `table`
    fn predict(&self, table: &Table) -> Result<Vec<f64>>;

    /// Short name used in logs and error context
    fn name(&self) -> &str;
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        (**self).predict(table)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        (**self).predict(table)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
