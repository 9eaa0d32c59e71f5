//! Drift assertions for model monitoring.
//!
//! An evaluator freezes statistics of a reference vector, such as the
//! training time distribution of a model output, and replays a chosen set
//! of checks against newly observed data on demand.

// Modules
pub mod categorical;
pub mod config;
pub mod constants;
pub mod continuous;
pub mod data;
pub mod errors;
pub mod evaluator;
pub mod stats;
pub mod utils;

// Individual classes, and functions
pub use categorical::{CategoricalAssertion, CategoricalEvaluator, CategoricalParam, Chi2Binding};
pub use config::{CategoricalConfig, ConfigIO, ContinuousConfig};
pub use continuous::{ContinuousAssertion, ContinuousEvaluator, ContinuousParam};
pub use data::{AsVector, Matrix};
pub use errors::DriftError;
pub use evaluator::{Assertion, CheckResult, EvaluationReport, Evaluator};
