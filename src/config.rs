//! Evaluator Configuration
//!
//! Construction options for the continuous and categorical evaluators:
//! which assertions to register, whether check outcomes are logged at info
//! level, and reference statistics or thresholds that pre-seed the parameter
//! store.
use crate::categorical::CategoricalAssertion;
use crate::constants::{DEFAULT_CHI2_STAT, DEFAULT_KS_STAT};
use crate::continuous::ContinuousAssertion;
use crate::errors::DriftError;
use crate::evaluator::{all_assertions, AssertionSelection};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_continuous_assertions() -> AssertionSelection {
    all_assertions::<ContinuousAssertion>()
}
fn default_categorical_assertions() -> AssertionSelection {
    all_assertions::<CategoricalAssertion>()
}
fn default_verbose() -> bool {
    true
}
fn default_ks_stat() -> f64 {
    DEFAULT_KS_STAT
}
fn default_chi2_stat() -> f64 {
    DEFAULT_CHI2_STAT
}

/// Configuration for the `ContinuousEvaluator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousConfig {
    /// Assertions to register, defaults to all of them.
    #[serde(default = "default_continuous_assertions")]
    pub assertions: AssertionSelection,
    /// Log every check outcome at info level.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Reference minimum, computed from the reference data when missing.
    #[serde(default)]
    pub min: Option<f64>,
    /// Reference maximum, computed from the reference data when missing.
    #[serde(default)]
    pub max: Option<f64>,
    /// Reference mean, computed from the reference data when missing.
    #[serde(default)]
    pub mean: Option<f64>,
    /// Reference standard deviation, computed from the reference data when missing.
    #[serde(default)]
    pub std: Option<f64>,
    /// Largest KS statistic that still passes.
    #[serde(default = "default_ks_stat")]
    pub ks_stat: f64,
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        ContinuousConfig {
            assertions: default_continuous_assertions(),
            verbose: default_verbose(),
            min: None,
            max: None,
            mean: None,
            std: None,
            ks_stat: DEFAULT_KS_STAT,
        }
    }
}

impl ContinuousConfig {
    /// Set the assertions to register.
    /// * `assertions` - A single assertion name or an ordered list of names.
    pub fn set_assertions<A: Into<AssertionSelection>>(mut self, assertions: A) -> Self {
        self.assertions = assertions.into();
        self
    }

    /// Set the verbose flag.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the reference minimum instead of computing it.
    pub fn set_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the reference maximum instead of computing it.
    pub fn set_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the reference mean instead of computing it.
    pub fn set_mean(mut self, mean: f64) -> Self {
        self.mean = Some(mean);
        self
    }

    /// Set the reference standard deviation instead of computing it.
    pub fn set_std(mut self, std: f64) -> Self {
        self.std = Some(std);
        self
    }

    /// Set the KS statistic threshold.
    /// * `ks_stat` - Comparison data passes the KS check when its statistic is at most this value.
    pub fn set_ks_stat(mut self, ks_stat: f64) -> Self {
        self.ks_stat = ks_stat;
        self
    }
}

/// Configuration for the `CategoricalEvaluator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalConfig {
    /// Assertions to register, defaults to all of them.
    #[serde(default = "default_categorical_assertions")]
    pub assertions: AssertionSelection,
    /// Log every check outcome at info level.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Largest chi-squared statistic that still passes.
    #[serde(default = "default_chi2_stat")]
    pub chi2_stat: f64,
}

impl Default for CategoricalConfig {
    fn default() -> Self {
        CategoricalConfig {
            assertions: default_categorical_assertions(),
            verbose: default_verbose(),
            chi2_stat: DEFAULT_CHI2_STAT,
        }
    }
}

impl CategoricalConfig {
    /// Set the assertions to register.
    /// * `assertions` - A single assertion name or an ordered list of names.
    pub fn set_assertions<A: Into<AssertionSelection>>(mut self, assertions: A) -> Self {
        self.assertions = assertions.into();
        self
    }

    /// Set the verbose flag.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the chi-squared statistic threshold.
    pub fn set_chi2_stat(mut self, chi2_stat: f64) -> Self {
        self.chi2_stat = chi2_stat;
        self
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Dump a configuration as a json object.
    fn json_dump(&self) -> Result<String, DriftError> {
        serde_json::to_string(self).map_err(|e| DriftError::Type(e.to_string()))
    }

    /// Load a configuration from a json string.
    ///
    /// Values of the wrong type, such as a non-boolean `verbose`, are reported
    /// as [`DriftError::Type`].
    fn from_json(json_str: &str) -> Result<Self, DriftError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| DriftError::Type(e.to_string()))
    }

    /// Load a configuration from a path to a json file.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, DriftError> {
        let json_str = fs::read_to_string(path).map_err(|e| DriftError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for ContinuousConfig {}
impl ConfigIO for CategoricalConfig {}
