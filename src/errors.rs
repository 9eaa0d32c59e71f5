//! Errors
//!
//! Custom error types used throughout the `driftcheck` crate.
use thiserror::Error;

/// Errors that can occur while building or evaluating drift checks.
#[derive(Debug, Error, PartialEq)]
pub enum DriftError {
    /// Input data is not a single vector, the value is the rank that was found.
    #[error("Input data not a single vector, found data of rank {0}.")]
    Shape(usize),
    /// A configuration value had the wrong type.
    #[error("Unexpected type in configuration: {0}")]
    Type(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Requested assertion is not registered, second value lists the accepted names.
    #[error("Unexpected assertion request {0}, expected one of {1}.")]
    UnknownAssertion(String, String),
    /// Requested key is not in the parameter store.
    #[error("Requested key {0} is not in the assertion parameters.")]
    UnknownParameter(String),
    /// First value is the key, second the role it holds, third the role that was passed.
    #[error("Parameter {0} holds a {1}, a {2} was provided.")]
    ParameterType(String, String, String),
    /// A check ran before its reference parameter was bound.
    #[error("Must input or load reference {0}.")]
    NotConfigured(String),
    /// Not enough observations for a reliable test.
    #[error("Not enough data for reliable {test}, need at least {required} but found {found}.")]
    InsufficientData {
        test: &'static str,
        required: usize,
        found: usize,
    },
    /// Comparison data holds a category the reference never saw.
    #[error("Category {0} was not present in the reference data.")]
    CategoryMismatch(String),
    /// Reduction over an empty vector.
    #[error("Input data is empty.")]
    EmptyInput,
    /// Unable to read a configuration file.
    #[error("Unable to read configuration from a file {0}")]
    UnableToRead(String),
}
