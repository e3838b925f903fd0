//! Recursive rule tree evaluation
//!
//! Pure functions over an immutable tree and a borrowed value mapping.
//! Evaluation is depth-first, left-to-right, and short-circuits per the
//! group's logic: a rule after a decisive result is never evaluated, so an
//! unreachable malformed rule cannot raise an error.

use crate::error::{Result, RuleError};
use crate::rule::model::{Leaf, Logic, Rule, RuleGroup};
use crate::rule::operators::{self, Operator};
use crate::value::ValueMap;

/// Evaluate a rule group against a value mapping
pub(crate) fn eval_group(group: &RuleGroup, values: &ValueMap) -> Result<bool> {
    let logic = Logic::parse(&group.logic)?;
    if group.rules.is_empty() {
        return Err(RuleError::EmptyRuleGroup);
    }

    match logic {
        Logic::And => {
            for rule in &group.rules {
                if !eval_rule(rule, values)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Logic::Or => {
            for rule in &group.rules {
                if eval_rule(rule, values)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Evaluate one rule: recurse into a nested group or test a leaf
fn eval_rule(rule: &Rule, values: &ValueMap) -> Result<bool> {
    match rule {
        Rule::Group(group) => eval_group(group, values),
        Rule::Leaf(leaf) => eval_leaf(leaf, values),
    }
}

/// Evaluate a leaf predicate: look up the property, classify its kind, and
/// dispatch through the operator table
fn eval_leaf(leaf: &Leaf, values: &ValueMap) -> Result<bool> {
    let actual = values
        .get(&leaf.property)
        .ok_or_else(|| RuleError::PropertyNotFound(leaf.property.clone()))?;

    let kind = actual.kind();
    let compare = Operator::parse(&leaf.operator)
        .and_then(|operator| operators::lookup(kind, operator))
        .ok_or_else(|| RuleError::UnsupportedOperator {
            operator: leaf.operator.clone(),
            kind,
        })?;

    compare(actual, &leaf.value)
}
