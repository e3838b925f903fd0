//! Error types for rule tree evaluation

use crate::value::ValueKind;
use thiserror::Error;

/// Main error type for rule construction and evaluation
///
/// Every error is terminal for the evaluation call that produced it: the
/// tree walk stops and the error is returned to the caller unchanged.
/// Branches skipped by short-circuiting never surface errors.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("unsupported logic \"{0}\": logic must be \"and\" or \"or\"")]
    InvalidLogic(String),

    #[error("a rule group may not have an empty list of rules")]
    EmptyRuleGroup,

    #[error("a rule must contain either property/operator/value or a rule_group, not both and not neither")]
    AmbiguousRule,

    #[error("property \"{0}\" not found in values")]
    PropertyNotFound(String),

    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    #[error("unsupported operator \"{operator}\" for type {kind}")]
    UnsupportedOperator { operator: String, kind: ValueKind },

    #[error("type mismatch: expected a {expected} rule value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: ValueKind,
    },

    #[error("the regex \"{pattern}\" failed to compile: {source}")]
    RegexCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Result type alias for rule construction and evaluation
pub type Result<T> = std::result::Result<T, RuleError>;
