//! Rule type enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported compliance check types, keyed by the document's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Tag,
    Interface,
    IpRange,
    AllowedValues,
    RequiredFields,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Tag => write!(f, "tag"),
            RuleType::Interface => write!(f, "interface"),
            RuleType::IpRange => write!(f, "ip_range"),
            RuleType::AllowedValues => write!(f, "allowed_values"),
            RuleType::RequiredFields => write!(f, "required_fields"),
        }
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "tag" => Ok(RuleType::Tag),
            "interface" => Ok(RuleType::Interface),
            "ip_range" => Ok(RuleType::IpRange),
            "allowed_values" => Ok(RuleType::AllowedValues),
            "required_fields" => Ok(RuleType::RequiredFields),
            other => Err(format!("unknown rule type: '{}'", other)),
        }
    }
}
