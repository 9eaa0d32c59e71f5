use crate::errors::DriftError;
use std::fmt::Debug;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

/// Comma separated rendering of a list of labels.
pub fn fmt_vec_output<T: Debug>(v: &[T]) -> String {
    let mut res = String::new();
    if let Some(last) = v.len().checked_sub(1) {
        for n in &v[..last] {
            res.push_str(format!("{:?}", n).as_str());
            res.push_str(", ");
        }
        res.push_str(format!("{:?}", &v[last]).as_str());
    }
    res
}

// Validation
pub fn validate_real_parameter(value: f64, parameter: &str) -> Result<(), DriftError> {
    validate_float_parameter(value, f64::NEG_INFINITY, f64::INFINITY, parameter)
}
pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), DriftError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(DriftError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Check that a sample is large enough for a statistical test.
pub fn validate_sample_size(test: &'static str, found: usize, required: usize) -> Result<(), DriftError> {
    if found < required {
        Err(DriftError::InsufficientData { test, required, found })
    } else {
        Ok(())
    }
}

/// Passed or Failed, for log lines.
pub fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "Passed"
    } else {
        "Failed"
    }
}
