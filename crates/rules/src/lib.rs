//! Declarative device compliance rules.
//!
//! This crate provides:
//! - YAML rule documents with two-pass serde deserialization
//! - A loader that turns a rule file into a [`RuleSet`](schema::RuleSet)
//! - Advisory validation of rule parameters
//! - The evaluator that applies every rule to every device

pub mod evaluator;
pub mod loader;
pub mod schema;
pub mod validation;

pub use evaluator::{CheckResult, ComplianceSummary, RuleEvaluator};
pub use loader::{parse_rule_set, ConfigLoadError, RuleLoader};
pub use schema::{Rule, RuleCheck, RuleSet, RuleType};
pub use validation::{validate_rule_set, ValidationReport, ValidationWarning};
