//! Rule tree data model
//!
//! A [`RuleGroup`] is an ordered list of rules combined under AND/OR logic;
//! each [`Rule`] is either a leaf predicate or a nested group. Trees are
//! immutable once built and hold no evaluation state, so one tree may be
//! evaluated concurrently by any number of callers.

use crate::error::{Result, RuleError};
use crate::rule::evaluator;
use crate::value::{Value, ValueMap};
use serde::{Deserialize, Serialize};

/// Canonical combinator logic for a rule group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    /// Parse a logic token, case-insensitively
    pub fn parse(token: &str) -> Result<Logic> {
        if token.eq_ignore_ascii_case("and") {
            Ok(Logic::And)
        } else if token.eq_ignore_ascii_case("or") {
            Ok(Logic::Or)
        } else {
            Err(RuleError::InvalidLogic(token.to_string()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }
}

/// A collection of rules combined under AND/OR logic
///
/// `logic` keeps the raw token so that misconfigured input surfaces as
/// [`RuleError::InvalidLogic`] when the group is tested, not silently before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub logic: String,
    pub rules: Vec<Rule>,
}

/// One rule: a leaf predicate or a nested sub-group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr", into = "RuleRepr")]
pub enum Rule {
    Leaf(Leaf),
    Group(Box<RuleGroup>),
}

/// A leaf predicate: one property compared against a literal
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub property: String,
    pub operator: String,
    pub value: Value,
}

impl Leaf {
    pub fn new(
        property: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            property: property.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Raw wire shape of a rule
///
/// The external schema allows any subset of the fields, so validation of the
/// exactly-one-shape invariant happens in `TryFrom`, rejecting ambiguous
/// rules at construction rather than treating them as always-false leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule_group: Option<RuleGroup>,
}

impl TryFrom<RuleRepr> for Rule {
    type Error = RuleError;

    fn try_from(repr: RuleRepr) -> Result<Rule> {
        let has_leaf_field =
            repr.property.is_some() || repr.operator.is_some() || repr.value.is_some();
        match (repr.rule_group, has_leaf_field) {
            (Some(_), true) | (None, false) => Err(RuleError::AmbiguousRule),
            (Some(group), false) => Ok(Rule::Group(Box::new(group))),
            (None, true) => match (repr.property, repr.operator, repr.value) {
                (Some(property), Some(operator), Some(value)) => Ok(Rule::Leaf(Leaf {
                    property,
                    operator,
                    value,
                })),
                // A partial leaf is as ambiguous as an empty rule
                _ => Err(RuleError::AmbiguousRule),
            },
        }
    }
}

impl From<Rule> for RuleRepr {
    fn from(rule: Rule) -> RuleRepr {
        match rule {
            Rule::Leaf(leaf) => RuleRepr {
                property: Some(leaf.property),
                operator: Some(leaf.operator),
                value: Some(leaf.value),
                rule_group: None,
            },
            Rule::Group(group) => RuleRepr {
                property: None,
                operator: None,
                value: None,
                rule_group: Some(*group),
            },
        }
    }
}

impl Rule {
    /// Build a leaf predicate rule
    pub fn leaf(
        property: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Rule {
        Rule::Leaf(Leaf::new(property, operator, value))
    }

    /// Wrap a group as a nested rule
    pub fn group(group: RuleGroup) -> Rule {
        Rule::Group(Box::new(group))
    }
}

impl RuleGroup {
    /// Deserialize a rule group from JSON configuration
    pub fn from_json(json: &str) -> Result<RuleGroup> {
        Ok(serde_json::from_str(json)?)
    }

    /// Test this rule group against a mapping of property values
    ///
    /// Rules are evaluated depth-first in insertion order and short-circuit
    /// per the group's logic; skipped rules are never evaluated, not even
    /// for their failure modes.
    pub fn test(&self, values: &ValueMap) -> Result<bool> {
        evaluator::eval_group(self, values)
    }

    /// Combine two groups under AND logic
    ///
    /// Builds a new group whose rules are the two operands as nested groups.
    pub fn and(self, other: RuleGroup) -> RuleGroup {
        RuleGroup {
            logic: Logic::And.as_str().to_string(),
            rules: vec![Rule::group(self), Rule::group(other)],
        }
    }

    /// Combine two groups under OR logic
    pub fn or(self, other: RuleGroup) -> RuleGroup {
        RuleGroup {
            logic: Logic::Or.as_str().to_string(),
            rules: vec![Rule::group(self), Rule::group(other)],
        }
    }
}
