use crate::data::AsVector;
use crate::errors::DriftError;
use crate::evaluator::params::{ParamKind, Parameter, ParameterStore};
use crate::evaluator::report::CheckResult;
use crate::utils::pass_fail;
use log::{log, Level};
use serde::{Deserialize, Serialize};

/// Builds a reference parameter from the reference data.
pub type BuildFn<V, P> = fn(&mut ParameterStore<P>, &[V]) -> Result<(), DriftError>;

/// Assertions requested by the caller, either a single name or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssertionSelection {
    One(String),
    Many(Vec<String>),
}

impl AssertionSelection {
    /// Normalized list of names, in the order given.
    pub fn names(&self) -> Vec<&str> {
        match self {
            AssertionSelection::One(name) => vec![name.as_str()],
            AssertionSelection::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for AssertionSelection {
    fn from(name: &str) -> Self {
        AssertionSelection::One(name.to_string())
    }
}

impl From<String> for AssertionSelection {
    fn from(name: String) -> Self {
        AssertionSelection::One(name)
    }
}

impl From<Vec<String>> for AssertionSelection {
    fn from(names: Vec<String>) -> Self {
        AssertionSelection::Many(names)
    }
}

impl From<Vec<&str>> for AssertionSelection {
    fn from(names: Vec<&str>) -> Self {
        AssertionSelection::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AssertionSelection {
    fn from(names: [&str; N]) -> Self {
        AssertionSelection::Many(names.into_iter().map(String::from).collect())
    }
}

/// State shared by every evaluator: the reference data, the verbose flag
/// and the parameter store.
#[derive(Debug, Clone)]
pub struct EvaluatorBase<V, P> {
    reference: Vec<V>,
    verbose: bool,
    params: ParameterStore<P>,
}

impl<V: Clone, P: Parameter> EvaluatorBase<V, P> {
    /// Copy the reference data, which must be a single vector.
    pub fn new<D>(reference: &D, verbose: bool) -> Result<Self, DriftError>
    where
        D: AsVector<V> + ?Sized,
    {
        let reference = reference.as_vector()?.to_vec();
        Ok(EvaluatorBase {
            reference,
            verbose,
            params: ParameterStore::new(),
        })
    }

    pub fn reference(&self) -> &[V] {
        &self.reference
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn params(&self) -> &ParameterStore<P> {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParameterStore<P> {
        &mut self.params
    }

    pub(crate) fn declare(&mut self, key: &str, kind: ParamKind, value: Option<P>) {
        self.params.declare(key, kind, value);
    }

    /// Declare a scalar key, seeded with `value` when one was given.
    pub(crate) fn declare_scalar(&mut self, key: &str, value: Option<f64>) {
        self.params.declare(key, ParamKind::Scalar, value.map(P::scalar));
    }

    /// Run a builder against the reference data.
    pub(crate) fn build(&mut self, builder: BuildFn<V, P>) -> Result<(), DriftError> {
        builder(&mut self.params, &self.reference)
    }

    /// Report a check outcome, at info level when verbose.
    pub(crate) fn log_check(&self, result: &CheckResult, detail: std::fmt::Arguments) {
        let level = if self.verbose { Level::Info } else { Level::Debug };
        log!(level, "{} {} check; {}", pass_fail(result.passed), result.name, detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Matrix;

    #[derive(Debug, Clone)]
    struct Scalar(f64);

    impl Parameter for Scalar {
        fn kind(&self) -> ParamKind {
            ParamKind::Scalar
        }
        fn scalar(value: f64) -> Self {
            Scalar(value)
        }
        fn as_scalar(&self) -> Option<f64> {
            Some(self.0)
        }
    }

    fn build_len(params: &mut ParameterStore<Scalar>, data: &[f64]) -> Result<(), DriftError> {
        params.update("len", Scalar(data.len() as f64))
    }

    #[test]
    fn test_selection_normalizes_single_name() {
        assert_eq!(AssertionSelection::from("mean").names(), vec!["mean"]);
        assert_eq!(
            AssertionSelection::from(vec!["std", "mean"]).names(),
            vec!["std", "mean"]
        );
        assert_eq!(AssertionSelection::from(["a", "b"]).names(), vec!["a", "b"]);
    }

    #[test]
    fn test_selection_deserializes_string_or_list() {
        let one: AssertionSelection = serde_json::from_str("\"mean\"").unwrap();
        assert_eq!(one, AssertionSelection::One("mean".to_string()));
        let many: AssertionSelection = serde_json::from_str("[\"mean\", \"std\"]").unwrap();
        assert_eq!(many.names(), vec!["mean", "std"]);
        assert!(serde_json::from_str::<AssertionSelection>("3").is_err());
    }

    #[test]
    fn test_base_copies_reference() {
        let data = vec![1.0, 2.0, 3.0];
        let base = EvaluatorBase::<f64, Scalar>::new(&data, false).unwrap();
        assert_eq!(base.reference(), &[1.0, 2.0, 3.0]);
        assert!(!base.verbose());
        assert!(base.params().is_empty());
    }

    #[test]
    fn test_base_rejects_matrix() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let m = Matrix::new(&data, 2, 2);
        let err = EvaluatorBase::<f64, Scalar>::new(&m, true).unwrap_err();
        assert_eq!(err, DriftError::Shape(2));
    }

    #[test]
    fn test_build_runs_against_reference() {
        let data = vec![1.0, 2.0, 3.0];
        let mut base = EvaluatorBase::<f64, Scalar>::new(&data, true).unwrap();
        base.declare_scalar("len", None);
        base.build(build_len).unwrap();
        assert_eq!(base.params().require_scalar("len"), Ok(3.0));
    }
}
