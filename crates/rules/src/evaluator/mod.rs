//! Compliance evaluator: applies every rule to every device.
//!
//! Evaluation is a total function over (device, rule). Misconfigured rules
//! (bad regex, bad CIDR, unknown type) come back as non-compliant results
//! with a descriptive message, never as errors, so the report always covers
//! the full device × rule grid.

mod checks;


use std::collections::HashSet;

use netcheck_core::Device;
use serde::{Deserialize, Serialize};

use crate::schema::{Rule, RuleCheck, RuleSet};

// ── Results ─────────────────────────────────────────────────────────

/// The outcome of applying one rule to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub device_name: String,
    pub rule_id: String,
    pub compliant: bool,
    pub message: String,
}

impl CheckResult {
    pub(crate) fn pass(device: &Device, rule: &Rule, message: impl Into<String>) -> Self {
        Self::new(device, rule, true, message)
    }

    pub(crate) fn fail(device: &Device, rule: &Rule, message: impl Into<String>) -> Self {
        Self::new(device, rule, false, message)
    }

    fn new(device: &Device, rule: &Rule, compliant: bool, message: impl Into<String>) -> Self {
        Self {
            device_name: device.name.clone(),
            rule_id: rule.id.clone(),
            compliant,
            message: message.into(),
        }
    }
}

/// Aggregate counts over a compliance report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Distinct devices with at least one failed check.
    pub failing_devices: usize,
}

impl ComplianceSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let passed = results.iter().filter(|r| r.compliant).count();
        let failing_devices = results
            .iter()
            .filter(|r| !r.compliant)
            .map(|r| r.device_name.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            failing_devices,
        }
    }

    pub fn all_compliant(&self) -> bool {
        self.failed == 0
    }
}

// ── Rule evaluator ──────────────────────────────────────────────────

/// Evaluates compliance rules against devices.
///
/// Stateless: identical inputs always produce identical output.
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluate every rule against every device.
    ///
    /// Returns `devices.len() * rule_set.len()` results, device-major:
    /// all rules for the first device, then all rules for the second, and so on.
    pub fn evaluate(devices: &[Device], rule_set: &RuleSet) -> Vec<CheckResult> {
        let mut results = Vec::with_capacity(devices.len() * rule_set.len());
        for device in devices {
            for rule in rule_set.iter() {
                results.push(Self::evaluate_rule(device, rule));
            }
        }
        results
    }

    /// Apply a single rule to a single device, dispatching on the rule's check.
    pub fn evaluate_rule(device: &Device, rule: &Rule) -> CheckResult {
        match &rule.check {
            RuleCheck::Tag { required_tags } => checks::tag(device, rule, required_tags),
            RuleCheck::Interface { regex } => checks::interface(device, rule, regex),
            RuleCheck::IpRange { cidr } => checks::ip_range(device, rule, cidr),
            RuleCheck::AllowedValues { field, allowed } => {
                checks::allowed_values(device, rule, field, allowed)
            }
            RuleCheck::RequiredFields { fields } => checks::required_fields(device, rule, fields),
            RuleCheck::Unknown { rule_type } => {
                CheckResult::fail(device, rule, format!("Unknown rule type: {}", rule_type))
            }
        }
    }
}
