//! [`RuleLoader`]: reads a rule document from disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::schema::{RuleSet, RuleSetDocument};

use super::error::{ConfigLoadError, Result};

/// Loads the rule set for a run from a single YAML document.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    path: PathBuf,
}

impl RuleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the rule document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the rule document.
    ///
    /// Each loaded rule is logged at `info`.
    pub fn load(&self) -> Result<RuleSet> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigLoadError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let rule_set = parse_rule_set(&contents)?;

        for rule in rule_set.iter() {
            info!(
                rule_id = %rule.id,
                rule_type = %rule.type_name(),
                description = %rule.description,
                "loaded rule"
            );
        }
        info!(path = %self.path.display(), count = rule_set.len(), "rule set loaded");
        Ok(rule_set)
    }
}

/// Parse a YAML rule document via two-pass deserialization.
///
/// First pass reads every entry as a [`RuleEnvelope`](crate::schema::RuleEnvelope);
/// second pass turns each into a typed [`Rule`](crate::schema::Rule).
/// A blank (or comment-only) document yields an empty set.
pub fn parse_rule_set(yaml: &str) -> Result<RuleSet> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    if value.is_null() {
        debug!("empty rule document");
        return Ok(RuleSet::default());
    }

    // First pass: envelopes (id, description, type + raw params).
    let document: RuleSetDocument = serde_yaml::from_value(value)?;

    // Second pass: typed checks.
    let rules = document
        .rules
        .iter()
        .map(|envelope| {
            envelope
                .parse_full()
                .map_err(|message| ConfigLoadError::InvalidRule {
                    id: envelope.id.clone(),
                    message,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RuleSet::new(rules))
}
