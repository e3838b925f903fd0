//! Operator tokens and the per-kind comparison table
//!
//! Dispatch is a lookup table keyed by `(ValueKind, Operator)` and built
//! once on first use. Each entry is a plain function pointer taking the
//! property's value and the rule's comparison value. Adding an operator is
//! one table entry plus one function.

use crate::error::{Result, RuleError};
use crate::rule::cache;
use crate::value::{Value, ValueKind};
use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Comparison operator token, parsed case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    In,
    NotIn,
    Regex,
    NotRegex,
    Has,
    DoesNotHave,
}

impl Operator {
    /// Parse an operator token; `None` for unknown tokens
    pub fn parse(token: &str) -> Option<Operator> {
        match token.to_ascii_uppercase().as_str() {
            "EQ" => Some(Operator::Eq),
            "NOT_EQ" => Some(Operator::NotEq),
            "GT" => Some(Operator::Gt),
            "GT_EQ" => Some(Operator::GtEq),
            "LT" => Some(Operator::Lt),
            "LT_EQ" => Some(Operator::LtEq),
            "IN" => Some(Operator::In),
            "NOT_IN" => Some(Operator::NotIn),
            "REGEX" => Some(Operator::Regex),
            "NOT_REGEX" => Some(Operator::NotRegex),
            "HAS" => Some(Operator::Has),
            "DOES_NOT_HAVE" => Some(Operator::DoesNotHave),
            _ => None,
        }
    }
}

/// Comparison function: (property value, rule value) -> verdict
type CompareFn = fn(&Value, &Value) -> Result<bool>;

static OPERATOR_TABLE: Lazy<AHashMap<(ValueKind, Operator), CompareFn>> = Lazy::new(build_table);

/// Look up the comparison for a value kind and operator
///
/// `None` means the operator is not valid for that kind.
pub(crate) fn lookup(kind: ValueKind, operator: Operator) -> Option<CompareFn> {
    OPERATOR_TABLE.get(&(kind, operator)).copied()
}

fn build_table() -> AHashMap<(ValueKind, Operator), CompareFn> {
    let mut table: AHashMap<(ValueKind, Operator), CompareFn> = AHashMap::with_capacity(32);

    table.insert((ValueKind::Bool, Operator::Eq), bool_eq);
    table.insert((ValueKind::Bool, Operator::NotEq), bool_not_eq);

    table.insert((ValueKind::Number, Operator::Eq), num_eq);
    table.insert((ValueKind::Number, Operator::NotEq), num_not_eq);
    table.insert((ValueKind::Number, Operator::Gt), num_gt);
    table.insert((ValueKind::Number, Operator::GtEq), num_gt_eq);
    table.insert((ValueKind::Number, Operator::Lt), num_lt);
    table.insert((ValueKind::Number, Operator::LtEq), num_lt_eq);

    table.insert((ValueKind::String, Operator::Eq), str_eq);
    table.insert((ValueKind::String, Operator::NotEq), str_not_eq);
    table.insert((ValueKind::String, Operator::Gt), str_gt);
    table.insert((ValueKind::String, Operator::GtEq), str_gt_eq);
    table.insert((ValueKind::String, Operator::Lt), str_lt);
    table.insert((ValueKind::String, Operator::LtEq), str_lt_eq);
    table.insert((ValueKind::String, Operator::Regex), str_regex);
    table.insert((ValueKind::String, Operator::NotRegex), str_not_regex);
    table.insert((ValueKind::String, Operator::In), str_in);
    table.insert((ValueKind::String, Operator::NotIn), str_not_in);

    table.insert((ValueKind::StringSeq, Operator::Has), seq_has);
    table.insert(
        (ValueKind::StringSeq, Operator::DoesNotHave),
        seq_does_not_have,
    );

    table
}

fn expect_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(RuleError::TypeMismatch {
            expected: "bool",
            actual: other.kind(),
        }),
    }
}

fn expect_number(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuleError::TypeMismatch {
            expected: "number",
            actual: other.kind(),
        }),
    }
}

fn expect_str(value: &Value) -> Result<&str> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(RuleError::TypeMismatch {
            expected: "string",
            actual: other.kind(),
        }),
    }
}

fn expect_string_seq(value: &Value) -> Result<&[String]> {
    match value {
        Value::StringSeq(seq) => Ok(seq),
        other => Err(RuleError::TypeMismatch {
            expected: "string sequence",
            actual: other.kind(),
        }),
    }
}

fn bool_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_bool(actual)? == expect_bool(expected)?)
}

fn bool_not_eq(actual: &Value, expected: &Value) -> Result<bool> {
    bool_eq(actual, expected).map(|r| !r)
}

// Numeric comparisons run on the widened f64 representation; equality is
// exact, not epsilon-based.

fn num_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_number(actual)? == expect_number(expected)?)
}

fn num_not_eq(actual: &Value, expected: &Value) -> Result<bool> {
    num_eq(actual, expected).map(|r| !r)
}

fn num_gt(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_number(actual)? > expect_number(expected)?)
}

fn num_gt_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_number(actual)? >= expect_number(expected)?)
}

fn num_lt(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_number(actual)? < expect_number(expected)?)
}

fn num_lt_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_number(actual)? <= expect_number(expected)?)
}

// String ordering is byte-wise lexicographic.

fn str_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_str(actual)? == expect_str(expected)?)
}

fn str_not_eq(actual: &Value, expected: &Value) -> Result<bool> {
    str_eq(actual, expected).map(|r| !r)
}

fn str_gt(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_str(actual)? > expect_str(expected)?)
}

fn str_gt_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_str(actual)? >= expect_str(expected)?)
}

fn str_lt(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_str(actual)? < expect_str(expected)?)
}

fn str_lt_eq(actual: &Value, expected: &Value) -> Result<bool> {
    Ok(expect_str(actual)? <= expect_str(expected)?)
}

fn str_regex(actual: &Value, expected: &Value) -> Result<bool> {
    let pattern = expect_str(expected)?;
    let regex = cache::get_or_compile(pattern)?;
    Ok(regex.is_match(expect_str(actual)?))
}

fn str_not_regex(actual: &Value, expected: &Value) -> Result<bool> {
    str_regex(actual, expected).map(|r| !r)
}

/// Scalar property tested against a sequence-valued rule operand
fn str_in(actual: &Value, expected: &Value) -> Result<bool> {
    let candidates = expect_string_seq(expected)?;
    let actual = expect_str(actual)?;
    Ok(candidates.iter().any(|candidate| candidate == actual))
}

fn str_not_in(actual: &Value, expected: &Value) -> Result<bool> {
    str_in(actual, expected).map(|r| !r)
}

/// Sequence-valued property tested against a scalar rule operand; a
/// separate operator family from `str_in`, never merged with it
fn seq_has(actual: &Value, expected: &Value) -> Result<bool> {
    let seq = expect_string_seq(actual)?;
    let needle = expect_str(expected)?;
    Ok(seq.iter().any(|item| item == needle))
}

fn seq_does_not_have(actual: &Value, expected: &Value) -> Result<bool> {
    seq_has(actual, expected).map(|r| !r)
}
