//! Typed compliance rules and their per-type parameters.

use serde::{Deserialize, Serialize};

use super::{scalar, RuleType};

/// The full set of rules loaded for one run, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

/// A single compliance rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Expected to be unique within a rule set; duplicates are only warned about.
    pub id: String,
    pub description: String,
    pub check: RuleCheck,
}

impl Rule {
    /// The `type` string this rule was declared with.
    pub fn type_name(&self) -> String {
        match &self.check {
            RuleCheck::Unknown { rule_type } => rule_type.clone(),
            check => check.rule_type().map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}

/// The check a rule performs, with the parameters of that check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCheck {
    /// Passes when the device carries at least one of `required_tags`.
    Tag { required_tags: Vec<String> },
    /// Passes when every interface name matches `regex`.
    Interface { regex: String },
    /// Passes when the device's primary IP lies inside `cidr`.
    IpRange { cidr: String },
    /// Passes when the named device field equals one of `allowed`.
    AllowedValues { field: String, allowed: Vec<String> },
    /// Passes when every named device field is non-blank.
    RequiredFields { fields: Vec<String> },
    /// Declared with a `type` this engine does not know; never passes.
    Unknown { rule_type: String },
}

impl RuleCheck {
    pub fn rule_type(&self) -> Option<RuleType> {
        match self {
            RuleCheck::Tag { .. } => Some(RuleType::Tag),
            RuleCheck::Interface { .. } => Some(RuleType::Interface),
            RuleCheck::IpRange { .. } => Some(RuleType::IpRange),
            RuleCheck::AllowedValues { .. } => Some(RuleType::AllowedValues),
            RuleCheck::RequiredFields { .. } => Some(RuleType::RequiredFields),
            RuleCheck::Unknown { .. } => None,
        }
    }
}

// ── Per-type parameters (second-pass targets) ───────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagParams {
    #[serde(default, deserialize_with = "scalar::string_list")]
    pub required_tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceParams {
    #[serde(default, deserialize_with = "scalar::string")]
    pub regex: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpRangeParams {
    #[serde(default, deserialize_with = "scalar::string")]
    pub cidr: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedValuesParams {
    #[serde(default, deserialize_with = "scalar::string")]
    pub field: String,
    #[serde(default, deserialize_with = "scalar::string_list")]
    pub allowed: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequiredFieldsParams {
    #[serde(default, deserialize_with = "scalar::string_list")]
    pub fields: Vec<String>,
}
