//! Parameter Store
//!
//! Named reference parameters bound once from the reference data and read
//! by the checks on every evaluation. Each key is declared up front with a
//! role, so later updates can be checked against what the key holds.
use crate::errors::DriftError;
use hashbrown::HashMap;
use serde::Serialize;
use std::fmt::{self, Debug, Display};

/// Role a parameter plays in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamKind {
    /// A single reference statistic or threshold.
    Scalar,
    /// A statistical test bound to the reference sample.
    BoundTest,
    /// The set of categories seen in the reference data.
    Categories,
}

impl Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamKind::Scalar => write!(f, "scalar"),
            ParamKind::BoundTest => write!(f, "bound test"),
            ParamKind::Categories => write!(f, "category set"),
        }
    }
}

/// Values that can live in a [`ParameterStore`].
pub trait Parameter: Clone + Debug {
    /// Role of this value.
    fn kind(&self) -> ParamKind;
    /// Wrap a scalar.
    fn scalar(value: f64) -> Self;
    /// The scalar held by this value, if it is one.
    fn as_scalar(&self) -> Option<f64>;
}

/// A two sample test with the reference sample already applied.
///
/// Calling it supplies the remaining comparison sample.
pub struct PartialTest<O> {
    reference: Vec<f64>,
    func: fn(&[f64], &[f64]) -> O,
}

impl<O> PartialTest<O> {
    /// Bind `reference` as the first argument of `func`.
    pub fn new(reference: Vec<f64>, func: fn(&[f64], &[f64]) -> O) -> Self {
        PartialTest { reference, func }
    }

    /// The bound reference sample.
    pub fn reference(&self) -> &[f64] {
        &self.reference
    }

    /// Run the test against `sample`.
    pub fn call(&self, sample: &[f64]) -> O {
        (self.func)(&self.reference, sample)
    }
}

impl<O> Clone for PartialTest<O> {
    fn clone(&self) -> Self {
        PartialTest {
            reference: self.reference.clone(),
            func: self.func,
        }
    }
}

impl<O> Debug for PartialTest<O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PartialTest")
            .field("reference_len", &self.reference.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
struct Slot<P> {
    kind: ParamKind,
    value: Option<P>,
}

/// Mapping from parameter name to its bound reference value.
#[derive(Debug, Clone)]
pub struct ParameterStore<P> {
    slots: HashMap<String, Slot<P>>,
    order: Vec<String>,
}

impl<P: Parameter> Default for ParameterStore<P> {
    fn default() -> Self {
        ParameterStore {
            slots: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<P: Parameter> ParameterStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key with its role and an optional initial value.
    pub(crate) fn declare(&mut self, key: &str, kind: ParamKind, value: Option<P>) {
        if !self.slots.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.slots.insert(key.to_string(), Slot { kind, value });
    }

    /// Overwrite the value held by `key`.
    ///
    /// The key must already be declared, and `value` must play the same
    /// role as the one the key was declared with.
    pub fn update(&mut self, key: &str, value: P) -> Result<(), DriftError> {
        let slot = self
            .slots
            .get_mut(key)
            .ok_or_else(|| DriftError::UnknownParameter(key.to_string()))?;
        if slot.kind != value.kind() {
            return Err(DriftError::ParameterType(
                key.to_string(),
                slot.kind.to_string(),
                value.kind().to_string(),
            ));
        }
        slot.value = Some(value);
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Whether `key` holds a value.
    pub fn is_bound(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The value bound to `key`, `None` when unknown or not yet bound.
    pub fn get(&self, key: &str) -> Option<&P> {
        self.slots.get(key).and_then(|s| s.value.as_ref())
    }

    pub fn kind(&self, key: &str) -> Option<ParamKind> {
        self.slots.get(key).map(|s| s.kind)
    }

    /// The value bound to `key`, or [`DriftError::NotConfigured`].
    pub fn require(&self, key: &str) -> Result<&P, DriftError> {
        self.get(key).ok_or_else(|| DriftError::NotConfigured(key.to_string()))
    }

    /// The scalar bound to `key`.
    pub fn require_scalar(&self, key: &str) -> Result<f64, DriftError> {
        let value = self.require(key)?;
        value.as_scalar().ok_or_else(|| {
            DriftError::ParameterType(
                key.to_string(),
                value.kind().to_string(),
                ParamKind::Scalar.to_string(),
            )
        })
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keys with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&P>)> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.slots.get(k).and_then(|s| s.value.as_ref())))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestParam {
        Scalar(f64),
        Test(PartialTest<f64>),
    }

    impl Parameter for TestParam {
        fn kind(&self) -> ParamKind {
            match self {
                TestParam::Scalar(_) => ParamKind::Scalar,
                TestParam::Test(_) => ParamKind::BoundTest,
            }
        }
        fn scalar(value: f64) -> Self {
            TestParam::Scalar(value)
        }
        fn as_scalar(&self) -> Option<f64> {
            match self {
                TestParam::Scalar(v) => Some(*v),
                _ => None,
            }
        }
    }

    impl PartialEq for PartialTest<f64> {
        fn eq(&self, other: &Self) -> bool {
            self.reference == other.reference
        }
    }

    fn sum_diff(a: &[f64], b: &[f64]) -> f64 {
        a.iter().sum::<f64>() - b.iter().sum::<f64>()
    }

    fn store() -> ParameterStore<TestParam> {
        let mut store = ParameterStore::new();
        store.declare("minimum", ParamKind::Scalar, None);
        store.declare("threshold", ParamKind::Scalar, Some(TestParam::Scalar(0.2)));
        store.declare("test", ParamKind::BoundTest, None);
        store
    }

    #[test]
    fn test_declaration_order() {
        let store = store();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["minimum", "threshold", "test"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_bound("minimum"));
        assert!(store.is_bound("threshold"));
    }

    #[test]
    fn test_update_unknown_key() {
        let mut store = store();
        assert_eq!(
            store.update("bogus", TestParam::Scalar(1.0)),
            Err(DriftError::UnknownParameter("bogus".to_string()))
        );
    }

    #[test]
    fn test_update_checks_role() {
        let mut store = store();
        let test = PartialTest::new(vec![1.0, 2.0], sum_diff as fn(&[f64], &[f64]) -> f64);
        let err = store.update("minimum", TestParam::Test(test.clone())).unwrap_err();
        assert!(matches!(err, DriftError::ParameterType(k, _, _) if k == "minimum"));
        store.update("test", TestParam::Test(test)).unwrap();
        match store.get("test") {
            Some(TestParam::Test(t)) => assert_eq!(t.call(&[1.0]), 2.0),
            _ => panic!("expected a bound test"),
        }
    }

    #[test]
    fn test_require() {
        let mut store = store();
        assert_eq!(
            store.require_scalar("minimum"),
            Err(DriftError::NotConfigured("minimum".to_string()))
        );
        store.update("minimum", TestParam::Scalar(-3.0)).unwrap();
        assert_eq!(store.require_scalar("minimum"), Ok(-3.0));
        assert_eq!(store.require_scalar("threshold"), Ok(0.2));
    }

    #[test]
    fn test_partial_test_keeps_reference() {
        let test = PartialTest::new(vec![1.0, 2.0, 3.0], sum_diff as fn(&[f64], &[f64]) -> f64);
        assert_eq!(test.reference(), &[1.0, 2.0, 3.0]);
        assert_eq!(test.call(&[6.0]), 0.0);
        assert_eq!(test.clone().call(&[1.0]), 5.0);
    }
}
