//! One compliance run: rules in, devices in, results out.

use std::path::Path;

use anyhow::{Context, Result};
use netcheck_inventory::{FetchError, InventorySource};
use netcheck_rules::{
    validate_rule_set, CheckResult, ComplianceSummary, RuleEvaluator, RuleLoader, RuleSet,
    ValidationReport,
};
use tracing::{info, warn};

/// Everything the reporter needs from a finished run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub device_count: usize,
    pub rule_count: usize,
    pub results: Vec<CheckResult>,
    pub summary: ComplianceSummary,
}

/// Load the rule file and log any validation warnings.
///
/// Warnings never stop a run: the affected rules still produce
/// (non-compliant) results.
pub fn load_rules(path: &Path) -> Result<(RuleSet, ValidationReport)> {
    let rule_set = RuleLoader::new(path)
        .load()
        .with_context(|| format!("failed to load rules from {}", path.display()))?;

    let report = validate_rule_set(&rule_set);
    for warning in &report.warnings {
        warn!(rule_id = %warning.rule_id, "{}", warning);
    }
    Ok((rule_set, report))
}

/// Fetch devices from `source` and evaluate `rule_set` against them.
///
/// A fetch failure aborts the run; no partial report is produced.
pub async fn run_check(
    source: &dyn InventorySource,
    rule_set: &RuleSet,
) -> std::result::Result<CheckOutcome, FetchError> {
    let devices = source.fetch_devices().await?;
    info!(devices = devices.len(), rules = rule_set.len(), "evaluating compliance");

    let results = RuleEvaluator::evaluate(&devices, rule_set);
    let summary = ComplianceSummary::from_results(&results);
    info!(
        passed = summary.passed,
        failed = summary.failed,
        failing_devices = summary.failing_devices,
        "evaluated compliance for all devices"
    );

    Ok(CheckOutcome {
        device_count: devices.len(),
        rule_count: rule_set.len(),
        results,
        summary,
    })
}
