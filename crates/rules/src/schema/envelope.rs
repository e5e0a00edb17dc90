//! Rule envelope for lightweight first-pass deserialization.

use serde::{Deserialize, Serialize};

use super::{
    scalar, AllowedValuesParams, InterfaceParams, IpRangeParams, RequiredFieldsParams, Rule,
    RuleCheck, RuleType, TagParams,
};

/// Top-level shape of a rule document: a `rules:` sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetDocument {
    #[serde(default)]
    pub rules: Vec<RuleEnvelope>,
}

/// Lightweight first-pass deserializer that reads only the header fields.
///
/// Used during two-pass loading: first read `type` to determine the
/// concrete check, then deserialize the remaining keys as its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEnvelope {
    #[serde(default, deserialize_with = "scalar::string")]
    pub id: String,
    #[serde(default, deserialize_with = "scalar::string")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "scalar::string")]
    pub rule_type: String,
    /// Remaining fields captured as raw YAML for second-pass deserialization.
    #[serde(flatten)]
    pub rest: serde_yaml::Value,
}

impl RuleEnvelope {
    /// Parse the `type` field into a typed [`RuleType`].
    pub fn parsed_type(&self) -> std::result::Result<RuleType, String> {
        self.rule_type.parse()
    }

    /// Two-pass: deserialize the remaining keys into the type-specific parameters.
    ///
    /// An unrecognised `type` is not an error here; it becomes
    /// [`RuleCheck::Unknown`] so the evaluator can report it per device.
    pub fn parse_full(&self) -> std::result::Result<Rule, String> {
        let check = match self.parsed_type() {
            Ok(RuleType::Tag) => {
                let p: TagParams = self.params()?;
                RuleCheck::Tag {
                    required_tags: p.required_tags,
                }
            }
            Ok(RuleType::Interface) => {
                let p: InterfaceParams = self.params()?;
                RuleCheck::Interface { regex: p.regex }
            }
            Ok(RuleType::IpRange) => {
                let p: IpRangeParams = self.params()?;
                RuleCheck::IpRange { cidr: p.cidr }
            }
            Ok(RuleType::AllowedValues) => {
                let p: AllowedValuesParams = self.params()?;
                RuleCheck::AllowedValues {
                    field: p.field,
                    allowed: p.allowed,
                }
            }
            Ok(RuleType::RequiredFields) => {
                let p: RequiredFieldsParams = self.params()?;
                RuleCheck::RequiredFields { fields: p.fields }
            }
            Err(_) => RuleCheck::Unknown {
                rule_type: self.rule_type.clone(),
            },
        };

        Ok(Rule {
            id: self.id.clone(),
            description: self.description.clone(),
            check,
        })
    }

    fn params<T: serde::de::DeserializeOwned>(&self) -> std::result::Result<T, String> {
        serde_yaml::from_value(self.rest.clone()).map_err(|e| e.to_string())
    }
}
