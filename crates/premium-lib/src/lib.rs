//! Library for hybrid insurance-premium prediction
//!
//! This crate provides the core functionality for:
//! - Columnar tables of numeric and one-hot encoded features
//! - Income interaction feature construction
//! - Additive base + residual prediction
//! - Artifact directory management and observability

pub mod artifacts;
pub mod error;
pub mod features;
pub mod observability;
pub mod predictor;
pub mod table;

pub use artifacts::{ArtifactStore, DEFAULT_ARTIFACT_DIR};
pub use error::FrameError;
pub use features::{build_interaction_features, InteractionFeatureBuilder};
pub use observability::{PredictionMetrics, StructuredLogger};
pub use predictor::{ConstantPredictor, HybridPredictor, LinearPredictor, Predictor};
pub use table::{Column, ColumnData, ColumnType, Table};
