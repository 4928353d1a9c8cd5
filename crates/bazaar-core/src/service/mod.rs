//! Business logic services (use cases).
//!
//! Services validate raw requests, enforce marketplace rules and orchestrate
//! repository calls. They depend on traits (ports), never on concrete
//! infrastructure implementations.

pub mod friendship;
pub mod ledger;
pub mod messaging;
pub mod registry;
pub mod silence;

use bazaar_types::error::BazaarError;

/// Require a field that must be present and not blank. Returns it trimmed.
pub(crate) fn require(field: &str, value: Option<String>) -> Result<String, BazaarError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(BazaarError::Validation(format!("missing {field}"))),
    }
}

/// Require a field that must be present but may be empty (substring filters).
pub(crate) fn require_present(field: &str, value: Option<String>) -> Result<String, BazaarError> {
    value.ok_or_else(|| BazaarError::Validation(format!("missing {field}")))
}
