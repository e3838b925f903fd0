//! Rulegate - Config-driven boolean rule tree evaluation
//!
//! A rule tree is data, not code: callers deserialize a [`RuleGroup`] from
//! JSON configuration, supply a [`ValueMap`] of named runtime values, and
//! get back a single boolean verdict or an error explaining why no verdict
//! could be produced. Intended for feature gating, eligibility checks, and
//! routing predicates driven by external configuration.
//!
//! ```
//! use rulegate::{values_from_json, RuleGroup};
//!
//! let group = RuleGroup::from_json(
//!     r#"{
//!         "logic": "and",
//!         "rules": [
//!             {"property": "age", "operator": "gt_eq", "value": 18},
//!             {"property": "country", "operator": "in", "value": ["se", "no"]}
//!         ]
//!     }"#,
//! )?;
//!
//! let values = values_from_json(r#"{"age": 27, "country": "se"}"#)?;
//! assert!(group.test(&values)?);
//! # Ok::<(), rulegate::RuleError>(())
//! ```
//!
//! Trees are immutable after construction and hold no evaluation state, so
//! one tree may be shared and tested concurrently without synchronization.

pub mod error;
pub mod rule;
pub mod value;

pub use crate::error::{Result, RuleError};
pub use crate::rule::{Leaf, Logic, Operator, Rule, RuleGroup};
pub use crate::value::{values_from_json, Value, ValueKind, ValueMap};
