//! Continuous Evaluator
//!
//! Drift checks for continuous values, such as the outputs of a regression
//! model or a numeric input feature. The reference minimum, maximum, mean and
//! standard deviation are frozen at construction, together with a
//! Kolmogorov-Smirnov test bound to the reference sample.
use crate::config::ContinuousConfig;
use crate::constants::{KS_MIN_SAMPLES, MEAN_STD_BAND, STD_BAND};
use crate::data::AsVector;
use crate::errors::DriftError;
use crate::evaluator::{
    register, validate_assertions, Assertion, BuildFn, CheckFn, CheckResult, Evaluator, EvaluatorBase, ParamKind,
    Parameter, ParameterStore, PartialTest,
};
use crate::stats::{self, ks_2samp, KsResult};
use crate::utils::{validate_real_parameter, validate_sample_size};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


const MINIMUM: &str = "minimum";
const MAXIMUM: &str = "maximum";
const MEAN: &str = "mean";
const STD: &str = "std";
const KS_TEST: &str = "ks_test";
const KS_STAT: &str = "ks_stat";

/// Checks available for continuous data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuousAssertion {
    /// No comparison value below the reference minimum.
    Minimum,
    /// No comparison value above the reference maximum.
    Maximum,
    /// Comparison mean within two reference standard deviations of the reference mean.
    Mean,
    /// Comparison standard deviation within half of the reference standard deviation of it.
    Std,
    /// Two sample KS statistic at most `ks_stat`.
    KsTest,
}

impl Assertion for ContinuousAssertion {
    const ALL: &'static [Self] = &[
        ContinuousAssertion::Minimum,
        ContinuousAssertion::Maximum,
        ContinuousAssertion::Mean,
        ContinuousAssertion::Std,
        ContinuousAssertion::KsTest,
    ];

    fn name(&self) -> &'static str {
        match self {
            ContinuousAssertion::Minimum => MINIMUM,
            ContinuousAssertion::Maximum => MAXIMUM,
            ContinuousAssertion::Mean => MEAN,
            ContinuousAssertion::Std => STD,
            ContinuousAssertion::KsTest => KS_TEST,
        }
    }
}

impl FromStr for ContinuousAssertion {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MINIMUM => Ok(ContinuousAssertion::Minimum),
            MAXIMUM => Ok(ContinuousAssertion::Maximum),
            MEAN => Ok(ContinuousAssertion::Mean),
            STD => Ok(ContinuousAssertion::Std),
            KS_TEST => Ok(ContinuousAssertion::KsTest),
            _ => Err(Self::unknown(s)),
        }
    }
}

impl fmt::Display for ContinuousAssertion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Reference parameter of a continuous evaluator.
#[derive(Debug, Clone)]
pub enum ContinuousParam {
    /// A reference statistic or threshold.
    Scalar(f64),
    /// KS test bound to the reference sample.
    KsTest(PartialTest<KsResult>),
}

impl ContinuousParam {
    /// Bind a KS test to `reference`, without the sample size floor.
    pub fn ks_test(reference: &[f64]) -> Self {
        ContinuousParam::KsTest(PartialTest::new(reference.to_vec(), ks_2samp))
    }
}

impl Parameter for ContinuousParam {
    fn kind(&self) -> ParamKind {
        match self {
            ContinuousParam::Scalar(_) => ParamKind::Scalar,
            ContinuousParam::KsTest(_) => ParamKind::BoundTest,
        }
    }
    fn scalar(value: f64) -> Self {
        ContinuousParam::Scalar(value)
    }
    fn as_scalar(&self) -> Option<f64> {
        match self {
            ContinuousParam::Scalar(v) => Some(*v),
            ContinuousParam::KsTest(_) => None,
        }
    }
}

impl From<f64> for ContinuousParam {
    fn from(value: f64) -> Self {
        ContinuousParam::Scalar(value)
    }
}

type Store = ParameterStore<ContinuousParam>;

// Builders skip parameters that are already bound, so seeded values win.
fn build_scalar(
    params: &mut Store,
    key: &str,
    data: &[f64],
    reduce: fn(&[f64]) -> Result<f64, DriftError>,
) -> Result<(), DriftError> {
    if params.is_bound(key) {
        return Ok(());
    }
    params.update(key, ContinuousParam::Scalar(reduce(data)?))
}

fn build_min(params: &mut Store, data: &[f64]) -> Result<(), DriftError> {
    build_scalar(params, MINIMUM, data, stats::min)
}

fn build_max(params: &mut Store, data: &[f64]) -> Result<(), DriftError> {
    build_scalar(params, MAXIMUM, data, stats::max)
}

fn build_mean(params: &mut Store, data: &[f64]) -> Result<(), DriftError> {
    build_scalar(params, MEAN, data, stats::mean)
}

fn build_std(params: &mut Store, data: &[f64]) -> Result<(), DriftError> {
    build_scalar(params, STD, data, stats::std)
}

fn build_ks_test(params: &mut Store, data: &[f64]) -> Result<(), DriftError> {
    if params.is_bound(KS_TEST) {
        return Ok(());
    }
    validate_sample_size("KS test", stats::count_real(data), KS_MIN_SAMPLES)?;
    params.update(KS_TEST, ContinuousParam::ks_test(data))
}

/// Evaluator for continuous model outputs (e.g., regression models).
///
/// ```
/// use driftcheck::{ContinuousEvaluator, Evaluator};
///
/// let reference: Vec<f64> = (0..100).map(|x| x as f64 / 10.0).collect();
/// let evaluator = ContinuousEvaluator::with_defaults(&reference).unwrap();
///
/// let shifted: Vec<f64> = reference.iter().map(|x| x + 50.0).collect();
/// let report = evaluator.evaluate(&shifted).unwrap();
/// assert!(!report.all_passed());
/// assert!(evaluator.evaluate_reference().unwrap().all_passed());
/// ```
#[derive(Debug, Clone)]
pub struct ContinuousEvaluator {
    base: EvaluatorBase<f64, ContinuousParam>,
    assertions: Vec<ContinuousAssertion>,
}

impl ContinuousEvaluator {
    /// Freeze the reference statistics of every requested assertion.
    ///
    /// * `reference` - The reference data, all future data is compared to it.
    /// * `config` - Assertions to register and any pre-seeded statistics.
    pub fn new<D>(reference: &D, config: ContinuousConfig) -> Result<Self, DriftError>
    where
        D: AsVector<f64> + ?Sized,
    {
        let mut base: EvaluatorBase<f64, ContinuousParam> = EvaluatorBase::new(reference, config.verbose)?;

        let seeded = [
            (MINIMUM, config.min),
            (MAXIMUM, config.max),
            (MEAN, config.mean),
            (STD, config.std),
        ];
        for (key, value) in seeded {
            if let Some(v) = value {
                validate_real_parameter(v, key)?;
            }
            base.declare_scalar(key, value);
        }
        base.declare(KS_TEST, ParamKind::BoundTest, None);
        validate_real_parameter(config.ks_stat, KS_STAT)?;
        base.declare_scalar(KS_STAT, Some(config.ks_stat));

        let assertions = validate_assertions::<ContinuousAssertion>(&config.assertions)?;
        register::<Self>(&mut base, &assertions)?;

        // The mean check needs the standard deviation for its band.
        if assertions.contains(&ContinuousAssertion::Mean) && !assertions.contains(&ContinuousAssertion::Std) {
            debug!("Building std for the mean check.");
            base.build(build_std)?;
        }

        Ok(ContinuousEvaluator { base, assertions })
    }

    /// Register every assertion with default thresholds.
    pub fn with_defaults<D>(reference: &D) -> Result<Self, DriftError>
    where
        D: AsVector<f64> + ?Sized,
    {
        Self::new(reference, ContinuousConfig::default())
    }

    fn params(&self) -> &Store {
        self.base.params()
    }

    fn ks_binding(&self) -> Result<&PartialTest<KsResult>, DriftError> {
        match self.params().require(KS_TEST)? {
            ContinuousParam::KsTest(test) => Ok(test),
            other => Err(DriftError::ParameterType(
                KS_TEST.to_string(),
                other.kind().to_string(),
                ParamKind::BoundTest.to_string(),
            )),
        }
    }

    /// Check whether `data` has any smaller values than expected.
    pub fn check_min(&self, data: &[f64]) -> Result<CheckResult, DriftError> {
        let minimum = self.params().require_scalar(MINIMUM)?;
        let min_obs = stats::min(data)?;
        let result = CheckResult::new(MINIMUM, min_obs >= minimum).with_observed(min_obs);
        self.base.log_check(&result, format_args!("min observed={}", min_obs));
        Ok(result)
    }

    /// Check whether `data` has any larger values than expected.
    pub fn check_max(&self, data: &[f64]) -> Result<CheckResult, DriftError> {
        let maximum = self.params().require_scalar(MAXIMUM)?;
        let max_obs = stats::max(data)?;
        let result = CheckResult::new(MAXIMUM, max_obs <= maximum).with_observed(max_obs);
        self.base.log_check(&result, format_args!("max observed={}", max_obs));
        Ok(result)
    }

    /// Check whether `data` has a different mean than expected.
    ///
    /// Passes when the mean of `data` is within two reference standard
    /// deviations of the reference mean, bounds included.
    pub fn check_mean(&self, data: &[f64]) -> Result<CheckResult, DriftError> {
        let mean = self.params().require_scalar(MEAN)?;
        let std = self.params().require_scalar(STD)?;
        let mean_obs = stats::mean(data)?;
        let band = std * MEAN_STD_BAND;
        let passed = mean_obs >= mean - band && mean_obs <= mean + band;
        let result = CheckResult::new(MEAN, passed).with_observed(mean_obs);
        self.base.log_check(
            &result,
            format_args!("mean observed={} (Expected {} +- {})", mean_obs, mean, band),
        );
        Ok(result)
    }

    /// Check whether `data` is more or less spread out than expected.
    ///
    /// Passes when the standard deviation of `data` is within half of the
    /// reference standard deviation of it, bounds included.
    pub fn check_std(&self, data: &[f64]) -> Result<CheckResult, DriftError> {
        let std = self.params().require_scalar(STD)?;
        let std_obs = stats::std(data)?;
        let half_std = std * STD_BAND;
        let passed = std_obs >= std - half_std && std_obs <= std + half_std;
        let result = CheckResult::new(STD, passed).with_observed(std_obs);
        self.base.log_check(
            &result,
            format_args!("std observed={} (Expected {} +- {})", std_obs, std, half_std),
        );
        Ok(result)
    }

    /// Test whether `data` is distributed like the reference data.
    ///
    /// The observed value is the KS statistic, which must not exceed `ks_stat`.
    /// At least 25 values of `data` must be real, and any NaN fails the check.
    pub fn check_ks(&self, data: &[f64]) -> Result<CheckResult, DriftError> {
        let test = self.ks_binding()?;
        let threshold = self.params().require_scalar(KS_STAT)?;
        validate_sample_size("KS test", stats::count_real(data), KS_MIN_SAMPLES)?;
        let res = test.call(data);
        let result = CheckResult::new(KS_TEST, res.statistic <= threshold).with_observed(res.statistic);
        self.base.log_check(
            &result,
            format_args!("test statistic={}, p={}", res.statistic, res.p_value),
        );
        Ok(result)
    }
}

impl Evaluator for ContinuousEvaluator {
    type Value = f64;
    type Assertion = ContinuousAssertion;
    type Param = ContinuousParam;

    fn callables(assertion: ContinuousAssertion) -> (BuildFn<f64, ContinuousParam>, CheckFn<Self>) {
        match assertion {
            ContinuousAssertion::Minimum => (build_min, Self::check_min),
            ContinuousAssertion::Maximum => (build_max, Self::check_max),
            ContinuousAssertion::Mean => (build_mean, Self::check_mean),
            ContinuousAssertion::Std => (build_std, Self::check_std),
            ContinuousAssertion::KsTest => (build_ks_test, Self::check_ks),
        }
    }

    fn base(&self) -> &EvaluatorBase<f64, ContinuousParam> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EvaluatorBase<f64, ContinuousParam> {
        &mut self.base
    }

    fn assertions(&self) -> &[ContinuousAssertion] {
        &self.assertions
    }
}
