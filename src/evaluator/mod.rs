//! Evaluator
//!
//! The contract every evaluator implements. An evaluator captures a
//! reference vector, binds one reference parameter per requested assertion
//! through the assertion's builder, and later replays the matching checkers
//! against comparison data.
//!
//! # Submodules
//!
//! * `base`: State shared by every evaluator and the assertion selection.
//! * `params`: The parameter store and partially applied tests.
//! * `report`: Check results and evaluation reports.

pub mod base;
pub mod params;
pub mod report;

pub use base::{AssertionSelection, BuildFn, EvaluatorBase};
pub use params::{ParamKind, Parameter, ParameterStore, PartialTest};
pub use report::{CheckResult, EvaluationReport};

use crate::data::AsVector;
use crate::errors::DriftError;
use crate::utils::{items_to_strings, validate_real_parameter};
use log::debug;
use std::fmt::Debug;
use std::str::FromStr;

/// Runs one check of comparison data against the evaluator's reference parameters.
pub type CheckFn<E> = fn(&E, &[<E as Evaluator>::Value]) -> Result<CheckResult, DriftError>;

/// A named statistical check an evaluator can register.
pub trait Assertion: Copy + Eq + Debug + FromStr<Err = DriftError> + 'static {
    /// Every assertion of this kind, in default order.
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;

    /// Error for a name outside [`Assertion::ALL`].
    fn unknown(name: &str) -> DriftError {
        DriftError::UnknownAssertion(
            name.to_string(),
            items_to_strings(Self::ALL.iter().map(|a| a.name()).collect()),
        )
    }
}

/// Check that every requested name is registered, keeping the caller's order.
pub fn validate_assertions<A: Assertion>(selection: &AssertionSelection) -> Result<Vec<A>, DriftError> {
    selection.names().into_iter().map(A::from_str).collect()
}

/// Every name registered for `A`, the default selection.
pub fn all_assertions<A: Assertion>() -> AssertionSelection {
    AssertionSelection::Many(A::ALL.iter().map(|a| a.name().to_string()).collect())
}

/// Shared evaluation protocol over a reference vector.
pub trait Evaluator: Sized {
    /// Element type of the data.
    type Value: Clone;
    type Assertion: Assertion;
    type Param: Parameter;

    /// Builder and checker registered for `assertion`.
    fn callables(assertion: Self::Assertion) -> (BuildFn<Self::Value, Self::Param>, CheckFn<Self>);

    fn base(&self) -> &EvaluatorBase<Self::Value, Self::Param>;

    fn base_mut(&mut self) -> &mut EvaluatorBase<Self::Value, Self::Param>;

    /// Active assertions, in the order they run.
    fn assertions(&self) -> &[Self::Assertion];

    /// Every assertion this evaluator can register.
    fn registry() -> &'static [Self::Assertion] {
        <Self::Assertion as Assertion>::ALL
    }

    fn reference(&self) -> &[Self::Value] {
        self.base().reference()
    }

    fn verbose(&self) -> bool {
        self.base().verbose()
    }

    fn parameters(&self) -> &ParameterStore<Self::Param> {
        self.base().params()
    }

    /// Checkers for the active assertions.
    fn tests(&self) -> Vec<CheckFn<Self>> {
        self.assertions().iter().map(|a| Self::callables(*a).1).collect()
    }

    /// Run every active check against `data`.
    ///
    /// * `data` - The comparison data, it must be a single vector.
    fn evaluate<D>(&self, data: &D) -> Result<EvaluationReport, DriftError>
    where
        D: AsVector<Self::Value> + ?Sized,
    {
        let data = data.as_vector()?;
        self.check_data(data)
    }

    /// Run every active check against the reference data itself.
    fn evaluate_reference(&self) -> Result<EvaluationReport, DriftError> {
        self.check_data(self.reference())
    }

    /// Run the checks in order, stopping at the first error.
    fn check_data(&self, data: &[Self::Value]) -> Result<EvaluationReport, DriftError> {
        let mut results = Vec::with_capacity(self.assertions().len());
        for check in self.tests() {
            results.push(check(self, data)?);
        }
        Ok(EvaluationReport::new(results))
    }

    /// Overwrite a reference parameter.
    ///
    /// * `key` - A key already in the parameter store.
    /// * `value` - A value with the same role as the one stored under `key`,
    ///   scalars must be real.
    fn update_param(&mut self, key: &str, value: Self::Param) -> Result<(), DriftError> {
        if let Some(v) = value.as_scalar() {
            validate_real_parameter(v, key)?;
        }
        self.base_mut().params_mut().update(key, value)?;
        debug!("Updated assertion parameter {}.", key);
        Ok(())
    }
}

/// Bind the reference parameters of every requested assertion, in order.
pub(crate) fn register<E: Evaluator>(
    base: &mut EvaluatorBase<E::Value, E::Param>,
    assertions: &[E::Assertion],
) -> Result<(), DriftError> {
    for assertion in assertions {
        let (builder, _) = E::callables(*assertion);
        base.build(builder)?;
        debug!("Built reference parameters for {}.", assertion.name());
    }
    Ok(())
}
