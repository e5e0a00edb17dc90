//! YAML DSL schema types with serde deserialization.
//!
//! Defines the type hierarchy for compliance rule documents:
//! - `RuleSetDocument` / `RuleEnvelope`: lightweight first-pass view (id, description, type)
//! - `Rule` / `RuleCheck`: typed rule with the parameters of its check
//! - `RuleType`: the closed set of supported check types

mod envelope;
mod kind;
mod rule;
mod scalar;

pub use envelope::*;
pub use kind::*;
pub use rule::*;
