//! Per-type rule parameter checks.

use std::str::FromStr;

use ipnet::IpNet;
use netcheck_core::DeviceField;
use regex::Regex;

use super::fuzzy::fuzzy_match;
use super::ValidationReport;

const RULE_TYPES: &[&str] = &["tag", "interface", "ip_range", "allowed_values", "required_fields"];

pub(super) fn check_tags(path: &str, id: &str, required_tags: &[String], report: &mut ValidationReport) {
    if required_tags.is_empty() {
        report.warn(
            format!("{path}.required_tags"),
            id,
            "no required_tags listed; rule can never pass",
        );
    }
}

pub(super) fn check_regex(path: &str, id: &str, regex: &str, report: &mut ValidationReport) {
    if regex.is_empty() {
        report.warn(
            format!("{path}.regex"),
            id,
            "empty regex matches every interface name",
        );
        return;
    }
    if let Err(e) = Regex::new(regex) {
        report.warn(format!("{path}.regex"), id, format!("invalid regex: {e}"));
    }
}

pub(super) fn check_cidr(path: &str, id: &str, cidr: &str, report: &mut ValidationReport) {
    if IpNet::from_str(cidr).is_err() {
        report.warn(format!("{path}.cidr"), id, format!("invalid CIDR '{cidr}'"));
    }
}

pub(super) fn check_allowed_values(
    path: &str,
    id: &str,
    field: &str,
    allowed: &[String],
    report: &mut ValidationReport,
) {
    check_field_name(&format!("{path}.field"), id, field, report);
    if allowed.is_empty() {
        report.warn(
            format!("{path}.allowed"),
            id,
            "no allowed values listed; rule can never pass",
        );
    }
}

pub(super) fn check_required_fields(
    path: &str,
    id: &str,
    fields: &[String],
    report: &mut ValidationReport,
) {
    if fields.is_empty() {
        report.warn(
            format!("{path}.fields"),
            id,
            "no fields listed; rule always passes",
        );
    }
    for (i, field) in fields.iter().enumerate() {
        check_field_name(&format!("{path}.fields[{i}]"), id, field, report);
    }
}

pub(super) fn check_unknown_type(path: &str, id: &str, rule_type: &str, report: &mut ValidationReport) {
    let message = if rule_type.is_empty() {
        "rule has no type; it will fail on every device".to_string()
    } else {
        format!("unknown rule type '{rule_type}'; it will fail on every device")
    };
    report.warn_with_suggestion(
        format!("{path}.type"),
        id,
        message,
        fuzzy_match(rule_type, RULE_TYPES),
    );
}

/// Unsupported names read as empty on every device.
fn check_field_name(path: &str, id: &str, field: &str, report: &mut ValidationReport) {
    if DeviceField::parse(field).is_none() {
        report.warn_with_suggestion(
            path,
            id,
            format!("unsupported device field '{field}' always reads as empty"),
            fuzzy_match(field, DeviceField::NAMES),
        );
    }
}
