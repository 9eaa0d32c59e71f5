use crate::errors::DriftError;
use serde::Serialize;

/// Outcome of a single check against comparison data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// Name of the assertion that produced this result.
    pub name: &'static str,
    /// Whether the comparison data passed.
    pub passed: bool,
    /// The statistic observed on the comparison data, if the check has one.
    pub observed: Option<f64>,
}

impl CheckResult {
    pub fn new(name: &'static str, passed: bool) -> Self {
        CheckResult {
            name,
            passed,
            observed: None,
        }
    }

    pub fn with_observed(mut self, observed: f64) -> Self {
        self.observed = Some(observed);
        self
    }
}

impl From<&CheckResult> for (&'static str, bool) {
    fn from(r: &CheckResult) -> Self {
        (r.name, r.passed)
    }
}

/// Ordered results of one evaluation, in the order the assertions were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvaluationReport {
    results: Vec<CheckResult>,
}

impl EvaluationReport {
    pub fn new(results: Vec<CheckResult>) -> Self {
        EvaluationReport { results }
    }

    /// True when every check passed. An empty report passes.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// First result reported under `name`.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// `(name, passed)` pairs in report order.
    pub fn to_pairs(&self) -> Vec<(&'static str, bool)> {
        self.results.iter().map(Into::into).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Dump the report as a json array.
    pub fn to_json(&self) -> Result<String, DriftError> {
        serde_json::to_string(self).map_err(|e| DriftError::Type(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a EvaluationReport {
    type Item = &'a CheckResult;
    type IntoIter = std::slice::Iter<'a, CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
