//! Report rendering: a line per check for people, or one JSON document.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use netcheck_rules::{CheckResult, ComplianceSummary};
use serde::Serialize;

use crate::run::CheckOutcome;

pub fn render_text<W: Write>(out: &mut W, outcome: &CheckOutcome, only_failures: bool) -> io::Result<()> {
    writeln!(out, "Compliance Report:")?;
    writeln!(out, "==================")?;

    for result in outcome
        .results
        .iter()
        .filter(|r| !only_failures || !r.compliant)
    {
        let status = if result.compliant { "PASS" } else { "FAIL" };
        writeln!(
            out,
            "{} [{}] Device: {:<15} | {}",
            status, result.rule_id, result.device_name, result.message
        )?;
    }

    let s = &outcome.summary;
    writeln!(out)?;
    writeln!(
        out,
        "{} devices, {} rules: {} checks, {} passed, {} failed ({} non-compliant devices)",
        outcome.device_count, outcome.rule_count, s.total, s.passed, s.failed, s.failing_devices
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    devices: usize,
    rules: usize,
    summary: &'a ComplianceSummary,
    results: Vec<&'a CheckResult>,
}

pub fn render_json<W: Write>(
    out: &mut W,
    outcome: &CheckOutcome,
    only_failures: bool,
    generated_at: DateTime<Utc>,
) -> io::Result<()> {
    let report = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        devices: outcome.device_count,
        rules: outcome.rule_count,
        summary: &outcome.summary,
        results: outcome
            .results
            .iter()
            .filter(|r| !only_failures || !r.compliant)
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
