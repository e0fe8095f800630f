//! Residual-correction ensemble
//!
//! A base model produces a coarse estimate and a residual model, fitted on
//! the base model's errors, corrects it. The hybrid output is the plain sum
//! of the two: no weighting, clipping or link function.

use super::Predictor;
use crate::error::FrameError;
use crate::observability::PredictionMetrics;
use crate::table::Table;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{debug, warn};

/// Sum of a base predictor and a residual predictor
///
/// Both sub-predictors are owned for the lifetime of the hybrid and are
/// trusted to be fitted already; construction performs no checks.
///
/// Every call records [`PredictionMetrics`], so a hybrid nested inside
/// another counts its rows again under the outer call.
pub struct HybridPredictor {
    base: Box<dyn Predictor>,
    residual: Box<dyn Predictor>,
    name: String,
    metrics: PredictionMetrics,
}

impl HybridPredictor {
    pub fn new(base: impl Predictor + 'static, residual: impl Predictor + 'static) -> Self {
        let name = format!("hybrid({}+{})", base.name(), residual.name());
        Self {
            base: Box::new(base),
            residual: Box::new(residual),
            name,
            metrics: PredictionMetrics::new(),
        }
    }

    pub fn base(&self) -> &dyn Predictor {
        self.base.as_ref()
    }

    pub fn residual(&self) -> &dyn Predictor {
        self.residual.as_ref()
    }

    /// Predict `base[i] + residual[i]` for every row of `table`
    ///
    /// Fails with `ShapeMismatch` when either sub-predictor does not return
    /// one value per row; the partial outputs are discarded.
    pub fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        let start = Instant::now();
        let result = self.combine(table);
        let elapsed = start.elapsed();

        match &result {
            Ok(predictions) => {
                self.metrics.observe_prediction_latency(elapsed.as_secs_f64());
                self.metrics.add_predictions(predictions.len());
                debug!(
                    predictor = %self.name,
                    rows = predictions.len(),
                    elapsed_us = elapsed.as_micros() as u64,
                    "Hybrid prediction completed"
                );
            }
            Err(e) => {
                self.metrics.inc_prediction_errors();
                let error = format!("{:#}", e);
                warn!(predictor = %self.name, error = %error, "Hybrid prediction failed");
            }
        }

        result
    }

    fn combine(&self, table: &Table) -> Result<Vec<f64>> {
        let rows = table.n_rows();

        let base = self
            .base
            .predict(table)
            .with_context(|| format!("Base predictor `{}` failed", self.base.name()))?;
        let residual = self
            .residual
            .predict(table)
            .with_context(|| format!("Residual predictor `{}` failed", self.residual.name()))?;

        if base.len() != rows {
            return Err(FrameError::shape(
                format!("base predictor `{}` output", self.base.name()),
                rows,
                base.len(),
            )
            .into());
        }
        if residual.len() != rows {
            return Err(FrameError::shape(
                format!("residual predictor `{}` output", self.residual.name()),
                rows,
                residual.len(),
            )
            .into());
        }

        Ok(base.iter().zip(&residual).map(|(b, r)| b + r).collect())
    }
}

impl Predictor for HybridPredictor {
    fn predict(&self, table: &Table) -> Result<Vec<f64>> {
        HybridPredictor::predict(self, table)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::ConstantPredictor;
    use std::sync::Arc;

    /// Returns a canned output regardless of the input
    struct FixedPredictor {
        name: &'static str,
        output: Vec<f64>,
    }

    impl FixedPredictor {
        fn new(name: &'static str, output: Vec<f64>) -> Self {
            Self { name, output }
        }
    }

    impl Predictor for FixedPredictor {
        fn predict(&self, _table: &Table) -> Result<Vec<f64>> {
            Ok(self.output.clone())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _table: &Table) -> Result<Vec<f64>> {
            Err(FrameError::missing("income_x_age").into())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn two_rows() -> Table {
        Table::new()
            .with_column("income_lakhs", vec![10.0, 20.0])
            .unwrap()
            .with_column("age", vec![30.0, 40.0])
            .unwrap()
    }

    #[test]
    fn test_sum_of_base_and_residual() {
        let hybrid = HybridPredictor::new(
            FixedPredictor::new("base", vec![5.0, 7.0]),
            FixedPredictor::new("residual", vec![0.5, -1.0]),
        );

        assert_eq!(hybrid.predict(&two_rows()).unwrap(), vec![5.5, 6.0]);
    }

    #[test]
    fn test_name_lists_sub_predictors() {
        let hybrid = HybridPredictor::new(
            FixedPredictor::new("lr_int", vec![]),
            FixedPredictor::new("xgb_res", vec![]),
        );
        assert_eq!(Predictor::name(&hybrid), "hybrid(lr_int+xgb_res)");
        assert_eq!(hybrid.base().name(), "lr_int");
        assert_eq!(hybrid.residual().name(), "xgb_res");
    }

    #[test]
    fn test_base_length_mismatch() {
        let hybrid = HybridPredictor::new(
            FixedPredictor::new("base", vec![5.0]),
            FixedPredictor::new("residual", vec![0.5, -1.0]),
        );

        let err = hybrid.predict(&two_rows()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<FrameError>(),
            Some(&FrameError::shape("base predictor `base` output", 2, 1))
        );
    }

    #[test]
    fn test_residual_length_mismatch() {
        let hybrid = HybridPredictor::new(
            FixedPredictor::new("base", vec![5.0, 7.0]),
            FixedPredictor::new("residual", vec![0.5, -1.0, 2.0]),
        );

        let err = hybrid.predict(&two_rows()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<FrameError>(),
            Some(&FrameError::shape("residual predictor `residual` output", 2, 3))
        );
    }

    #[test]
    fn test_sub_predictor_error_propagates_with_context() {
        let hybrid = HybridPredictor::new(
            FixedPredictor::new("base", vec![5.0, 7.0]),
            FailingPredictor,
        );

        let err = hybrid.predict(&two_rows()).unwrap_err();

        assert!(err.to_string().contains("Residual predictor `failing` failed"));
        assert_eq!(
            err.downcast_ref::<FrameError>(),
            Some(&FrameError::missing("income_x_age"))
        );
    }

    #[test]
    fn test_empty_table() {
        let hybrid =
            HybridPredictor::new(ConstantPredictor::new("mean", 3.0), ConstantPredictor::zero());
        assert!(hybrid.predict(&Table::new()).unwrap().is_empty());
    }

    #[test]
    fn test_hybrids_compose() {
        let inner = HybridPredictor::new(
            FixedPredictor::new("base", vec![1.0, 2.0]),
            FixedPredictor::new("residual", vec![0.25, 0.25]),
        );
        let outer = HybridPredictor::new(inner, ConstantPredictor::new("offset", 10.0));

        assert_eq!(outer.predict(&two_rows()).unwrap(), vec![11.25, 12.25]);
    }

    #[test]
    fn test_shared_sub_predictor_across_threads() {
        let base: Arc<dyn Predictor> = Arc::new(ConstantPredictor::new("mean", 100.0));
        let hybrid = Arc::new(HybridPredictor::new(
            Arc::clone(&base),
            ConstantPredictor::new("bias", -1.0),
        ));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let hybrid = Arc::clone(&hybrid);
                std::thread::spawn(move || hybrid.predict(&two_rows()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![99.0, 99.0]);
        }
        assert_eq!(base.name(), "mean");
    }
}
