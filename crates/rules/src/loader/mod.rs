//! Rule document loader.
//!
//! Reads a single YAML rule document and turns it into a [`RuleSet`](crate::schema::RuleSet)
//! via two-pass deserialization (RuleEnvelope -> Rule).

mod core;
mod error;


pub use self::core::{parse_rule_set, RuleLoader};
pub use self::error::{ConfigLoadError, Result};
