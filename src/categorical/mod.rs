//! Categorical Evaluator
//!
//! Drift checks for label vectors, such as the outputs of a classifier. The
//! set of reference categories and their counts are frozen at construction.
use crate::config::CategoricalConfig;
use crate::constants::CHI2_MIN_CELL;
use crate::data::AsVector;
use crate::errors::DriftError;
use crate::evaluator::{
    register, validate_assertions, Assertion, BuildFn, CheckFn, CheckResult, Evaluator, EvaluatorBase, ParamKind,
    Parameter, ParameterStore, PartialTest,
};
use crate::stats::{chi2_contingency, unique_counts, Chi2Result};
use crate::utils::{fmt_vec_output, validate_real_parameter, validate_sample_size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::str::FromStr;

#[cfg(test)]
mod tests;

const CAT_EXISTS: &str = "cat_exists";
const CHI2_TEST: &str = "chi2_test";
const CHI2_STAT: &str = "chi2_stat";
const CHI2_NAME: &str = "chi-squared contingency test";

/// Label types a categorical evaluator can hold.
pub trait Category: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> Category for T {}

/// Checks available for categorical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalAssertion {
    /// Comparison data holds exactly the reference categories.
    CatExists,
    /// Chi-squared statistic of the category counts at most `chi2_stat`.
    Chi2Test,
}

impl Assertion for CategoricalAssertion {
    const ALL: &'static [Self] = &[CategoricalAssertion::CatExists, CategoricalAssertion::Chi2Test];

    fn name(&self) -> &'static str {
        match self {
            CategoricalAssertion::CatExists => CAT_EXISTS,
            CategoricalAssertion::Chi2Test => CHI2_TEST,
        }
    }
}

impl FromStr for CategoricalAssertion {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CAT_EXISTS => Ok(CategoricalAssertion::CatExists),
            CHI2_TEST => Ok(CategoricalAssertion::Chi2Test),
            _ => Err(Self::unknown(s)),
        }
    }
}

impl fmt::Display for CategoricalAssertion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn validate_cells<T>(counts: &[(T, usize)]) -> Result<(), DriftError> {
    for (_, n) in counts {
        validate_sample_size(CHI2_NAME, *n, CHI2_MIN_CELL)?;
    }
    Ok(())
}

fn chi2_rows(reference: &[f64], sample: &[f64]) -> Chi2Result {
    chi2_contingency(&[reference.to_vec(), sample.to_vec()], true)
}

/// Chi-squared contingency test bound to the reference category counts.
#[derive(Debug, Clone)]
pub struct Chi2Binding<T> {
    categories: Vec<T>,
    test: PartialTest<Chi2Result>,
}

impl<T: Category> Chi2Binding<T> {
    /// Bind reference counts, every category needs at least 5 observations.
    ///
    /// * `counts` - Distinct categories with the number of times each was observed.
    pub fn from_counts(mut counts: Vec<(T, usize)>) -> Result<Self, DriftError> {
        validate_cells(&counts)?;
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        let (categories, counts): (Vec<T>, Vec<f64>) = counts.into_iter().map(|(c, n)| (c, n as f64)).unzip();
        Ok(Chi2Binding {
            categories,
            test: PartialTest::new(counts, chi2_rows),
        })
    }

    /// Bind the counts of `data`.
    pub fn from_data(data: &[T]) -> Result<Self, DriftError> {
        Self::from_counts(unique_counts(data))
    }

    /// Reference categories, sorted.
    pub fn categories(&self) -> &[T] {
        &self.categories
    }

    /// Reference counts, in the order of [`Chi2Binding::categories`].
    pub fn reference_counts(&self) -> &[f64] {
        self.test.reference()
    }

    /// Count `data` per reference category and run the test on the 2xN table.
    pub fn call(&self, data: &[T]) -> Result<Chi2Result, DriftError> {
        let counts = unique_counts(data);
        validate_cells(&counts)?;
        let mut aligned = vec![0usize; self.categories.len()];
        for (category, n) in counts {
            let idx = self
                .categories
                .binary_search(&category)
                .map_err(|_| DriftError::CategoryMismatch(format!("{:?}", category)))?;
            aligned[idx] = n;
        }
        // Reference categories missing from the data are empty cells.
        for n in &aligned {
            validate_sample_size(CHI2_NAME, *n, CHI2_MIN_CELL)?;
        }
        let aligned: Vec<f64> = aligned.into_iter().map(|n| n as f64).collect();
        Ok(self.test.call(&aligned))
    }
}

/// Reference parameter of a categorical evaluator.
#[derive(Debug, Clone)]
pub enum CategoricalParam<T> {
    /// A threshold.
    Scalar(f64),
    /// Categories seen in the reference data.
    Categories(BTreeSet<T>),
    /// Chi-squared test bound to the reference counts.
    Chi2Test(Chi2Binding<T>),
}

impl<T: Category> Parameter for CategoricalParam<T> {
    fn kind(&self) -> ParamKind {
        match self {
            CategoricalParam::Scalar(_) => ParamKind::Scalar,
            CategoricalParam::Categories(_) => ParamKind::Categories,
            CategoricalParam::Chi2Test(_) => ParamKind::BoundTest,
        }
    }
    fn scalar(value: f64) -> Self {
        CategoricalParam::Scalar(value)
    }
    fn as_scalar(&self) -> Option<f64> {
        match self {
            CategoricalParam::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

fn build_exist<T: Category>(params: &mut ParameterStore<CategoricalParam<T>>, data: &[T]) -> Result<(), DriftError> {
    if params.is_bound(CAT_EXISTS) {
        return Ok(());
    }
    let categories: BTreeSet<T> = data.iter().cloned().collect();
    params.update(CAT_EXISTS, CategoricalParam::Categories(categories))
}

fn build_chi2_test<T: Category>(
    params: &mut ParameterStore<CategoricalParam<T>>,
    data: &[T],
) -> Result<(), DriftError> {
    let binding = Chi2Binding::from_data(data)?;
    params.update(CHI2_TEST, CategoricalParam::Chi2Test(binding))
}

/// Evaluator for categorical model outputs (e.g., classification models).
///
/// ```
/// use driftcheck::{CategoricalEvaluator, Evaluator};
///
/// let mut reference = vec!["cat"; 10];
/// reference.extend(vec!["dog"; 10]);
/// let evaluator = CategoricalEvaluator::with_defaults(&reference).unwrap();
///
/// let mut comparison = vec!["cat"; 10];
/// comparison.extend(vec!["bird"; 10]);
/// let report = evaluator.evaluate_reference().unwrap();
/// assert!(report.all_passed());
/// assert!(!evaluator.check_exist(&comparison).unwrap().passed);
/// ```
#[derive(Debug, Clone)]
pub struct CategoricalEvaluator<T = String> {
    base: EvaluatorBase<T, CategoricalParam<T>>,
    assertions: Vec<CategoricalAssertion>,
}

impl<T: Category> CategoricalEvaluator<T> {
    /// Freeze the reference categories and counts of every requested assertion.
    ///
    /// * `reference` - The reference labels, all future data is compared to them.
    /// * `config` - Assertions to register and the chi-squared threshold.
    pub fn new<D>(reference: &D, config: CategoricalConfig) -> Result<Self, DriftError>
    where
        D: AsVector<T> + ?Sized,
    {
        let mut base: EvaluatorBase<T, CategoricalParam<T>> = EvaluatorBase::new(reference, config.verbose)?;
        base.declare(CHI2_TEST, ParamKind::BoundTest, None);
        base.declare(CAT_EXISTS, ParamKind::Categories, None);
        validate_real_parameter(config.chi2_stat, CHI2_STAT)?;
        base.declare_scalar(CHI2_STAT, Some(config.chi2_stat));

        let assertions = validate_assertions::<CategoricalAssertion>(&config.assertions)?;
        register::<Self>(&mut base, &assertions)?;

        Ok(CategoricalEvaluator { base, assertions })
    }

    /// Register every assertion with the default threshold.
    pub fn with_defaults<D>(reference: &D) -> Result<Self, DriftError>
    where
        D: AsVector<T> + ?Sized,
    {
        Self::new(reference, CategoricalConfig::default())
    }

    fn params(&self) -> &ParameterStore<CategoricalParam<T>> {
        self.base.params()
    }

    /// Check that `data` holds exactly the reference categories.
    ///
    /// Unseen categories and missing categories both fail. The observed
    /// value is the number of distinct categories in `data`.
    pub fn check_exist(&self, data: &[T]) -> Result<CheckResult, DriftError> {
        let expected = match self.params().require(CAT_EXISTS)? {
            CategoricalParam::Categories(categories) => categories,
            other => {
                return Err(DriftError::ParameterType(
                    CAT_EXISTS.to_string(),
                    other.kind().to_string(),
                    ParamKind::Categories.to_string(),
                ))
            }
        };
        let observed: BTreeSet<T> = data.iter().cloned().collect();
        let result = CheckResult::new(CAT_EXISTS, observed == *expected).with_observed(observed.len() as f64);
        self.base.log_check(
            &result,
            format_args!(
                "observed=[{}] (Expected [{}])",
                fmt_vec_output(&observed.iter().collect::<Vec<_>>()),
                fmt_vec_output(&expected.iter().collect::<Vec<_>>())
            ),
        );
        Ok(result)
    }

    /// Test whether the category frequencies of `data` match the reference.
    ///
    /// The observed value is the chi-squared statistic, which must not
    /// exceed `chi2_stat`.
    pub fn check_chi2(&self, data: &[T]) -> Result<CheckResult, DriftError> {
        let binding = match self.params().require(CHI2_TEST)? {
            CategoricalParam::Chi2Test(binding) => binding,
            other => {
                return Err(DriftError::ParameterType(
                    CHI2_TEST.to_string(),
                    other.kind().to_string(),
                    ParamKind::BoundTest.to_string(),
                ))
            }
        };
        let threshold = self.params().require_scalar(CHI2_STAT)?;
        let res = binding.call(data)?;
        let result = CheckResult::new(CHI2_TEST, res.statistic <= threshold).with_observed(res.statistic);
        self.base.log_check(
            &result,
            format_args!("test statistic={}, p={}", res.statistic, res.p_value),
        );
        Ok(result)
    }
}

impl<T: Category> Evaluator for CategoricalEvaluator<T> {
    type Value = T;
    type Assertion = CategoricalAssertion;
    type Param = CategoricalParam<T>;

    fn callables(assertion: CategoricalAssertion) -> (BuildFn<T, CategoricalParam<T>>, CheckFn<Self>) {
        match assertion {
            CategoricalAssertion::CatExists => (build_exist::<T>, Self::check_exist),
            CategoricalAssertion::Chi2Test => (build_chi2_test::<T>, Self::check_chi2),
        }
    }

    fn base(&self) -> &EvaluatorBase<T, CategoricalParam<T>> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EvaluatorBase<T, CategoricalParam<T>> {
        &mut self.base
    }

    fn assertions(&self) -> &[CategoricalAssertion] {
        &self.assertions
    }
}
