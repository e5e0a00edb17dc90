//! Advisory validation of a loaded rule set.
//!
//! Misconfigured rules never block a run: the evaluator reports them as
//! non-compliant results. Validation exists so operators learn about the
//! problem up front instead of reading it off every device in the report.
//! Returns a [`ValidationReport`] holding warnings only.

mod checks;
pub mod fuzzy;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::schema::{RuleCheck, RuleSet};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

/// A non-blocking advisory warning about one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Path-like location, e.g. `"rules[2].cidr"`.
    pub path: String,
    /// Id of the rule the warning is about (may be empty).
    pub rule_id: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub(crate) fn warn(
        &mut self,
        path: impl Into<String>,
        rule_id: &str,
        message: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            rule_id: rule_id.to_string(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn warn_with_suggestion(
        &mut self,
        path: impl Into<String>,
        rule_id: &str,
        message: impl Into<String>,
        suggestion: Option<&str>,
    ) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            rule_id: rule_id.to_string(),
            message: message.into(),
            suggestion: suggestion.map(|s| format!("did you mean '{s}'?")),
        });
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(s) = &self.suggestion {
            write!(f, " ({s})")?;
        }
        Ok(())
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Check every rule in the set and collect advisory warnings.
pub fn validate_rule_set(rule_set: &RuleSet) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen = HashSet::new();

    for (index, rule) in rule_set.iter().enumerate() {
        let path = format!("rules[{index}]");

        if rule.id.trim().is_empty() {
            report.warn(format!("{path}.id"), &rule.id, "rule has no id");
        } else if !seen.insert(rule.id.as_str()) {
            report.warn(
                format!("{path}.id"),
                &rule.id,
                format!("duplicate rule id '{}'", rule.id),
            );
        }

        match &rule.check {
            RuleCheck::Tag { required_tags } => {
                checks::check_tags(&path, &rule.id, required_tags, &mut report)
            }
            RuleCheck::Interface { regex } => {
                checks::check_regex(&path, &rule.id, regex, &mut report)
            }
            RuleCheck::IpRange { cidr } => checks::check_cidr(&path, &rule.id, cidr, &mut report),
            RuleCheck::AllowedValues { field, allowed } => {
                checks::check_allowed_values(&path, &rule.id, field, allowed, &mut report)
            }
            RuleCheck::RequiredFields { fields } => {
                checks::check_required_fields(&path, &rule.id, fields, &mut report)
            }
            RuleCheck::Unknown { rule_type } => {
                checks::check_unknown_type(&path, &rule.id, rule_type, &mut report)
            }
        }
    }

    report
}
