//! One function per rule type. Each returns exactly one [`CheckResult`].

use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use netcheck_core::Device;
use regex::Regex;

use super::CheckResult;
use crate::schema::Rule;

/// Passes on the first required tag the device carries.
pub(super) fn tag(device: &Device, rule: &Rule, required_tags: &[String]) -> CheckResult {
    let found = required_tags
        .iter()
        .any(|required| device.tags.iter().any(|tag| tag == required));

    if found {
        CheckResult::pass(device, rule, "Has required tag")
    } else {
        CheckResult::fail(device, rule, "Missing required tags")
    }
}

/// Stops at the first interface that does not match; zero interfaces pass.
pub(super) fn interface(device: &Device, rule: &Rule, pattern: &str) -> CheckResult {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(_) => return CheckResult::fail(device, rule, "Invalid regex in rule"),
    };

    match device.interfaces.iter().find(|name| !re.is_match(name)) {
        Some(name) => CheckResult::fail(
            device,
            rule,
            format!("Interface '{}' does not match regex", name),
        ),
        None => CheckResult::pass(device, rule, "All interfaces match regex"),
    }
}

/// The device address may carry a prefix length (`10.1.2.3/24`); only the
/// address part is tested.
pub(super) fn ip_range(device: &Device, rule: &Rule, cidr: &str) -> CheckResult {
    let Ok(net) = IpNet::from_str(cidr) else {
        return CheckResult::fail(device, rule, "Invalid CIDR in rule");
    };

    let address = device.primary_ip_str().split('/').next().unwrap_or_default();
    let Ok(ip) = IpAddr::from_str(address) else {
        return CheckResult::fail(device, rule, "Invalid IP format");
    };

    // `::ffff:a.b.c.d` is tested as the IPv4 address it carries.
    if net.contains(&ip.to_canonical()) {
        CheckResult::pass(device, rule, "IP is within CIDR")
    } else {
        CheckResult::fail(device, rule, "IP not in allowed CIDR")
    }
}

pub(super) fn allowed_values(
    device: &Device,
    rule: &Rule,
    field: &str,
    allowed: &[String],
) -> CheckResult {
    let value = device.field_value(field);

    if allowed.iter().any(|a| a == value) {
        CheckResult::pass(device, rule, "Field value is allowed")
    } else {
        CheckResult::fail(device, rule, format!("Field '{}' value not allowed", field))
    }
}

/// Stops at the first field that is blank after trimming.
pub(super) fn required_fields(device: &Device, rule: &Rule, fields: &[String]) -> CheckResult {
    match fields
        .iter()
        .find(|field| device.field_value(field).trim().is_empty())
    {
        Some(field) => CheckResult::fail(device, rule, format!("Field '{}' is empty", field)),
        None => CheckResult::pass(device, rule, "All required fields present"),
    }
}
