//! Domain-invariant rule family
//!
//! One rule instance per integrated domain library, built purely from
//! configuration. The rule is import-gated: it only fires when the candidate
//! imports the library and the library's required safety-invariant call
//! (e.g., `isValid()` for CadQuery geometry, `ERC()` for SKiDL circuits) is
//! absent from the source.

use regex::Regex;

use crate::config::DomainConfig;
use crate::error::GateError;
use crate::input::Candidate;
use crate::output::Decision;
use crate::rules::{imports, PatternRule};

/// Asks for confirmation when a domain library is used without its required
/// safety-invariant call.
pub struct DomainInvariantRule {
    id: String,
    module: String,
    required_call: String,
    check_name: String,
    call_re: Regex,
}

impl DomainInvariantRule {
    /// Build one rule instance from a config entry
    pub fn new(config: &DomainConfig) -> Result<Self, GateError> {
        if config.module.trim().is_empty() {
            return Err(GateError::Config(
                "domain entry has an empty module name".to_string(),
            ));
        }
        if config.required_call.trim().is_empty() {
            return Err(GateError::Config(format!(
                "domain '{}' has an empty required_call",
                config.module
            )));
        }

        let pattern = format!(r"\b{}\s*\(", regex::escape(&config.required_call));
        let call_re = Regex::new(&pattern).map_err(|e| {
            GateError::Config(format!("domain '{}': {}", config.module, e))
        })?;

        let check_name = if config.check_name.is_empty() {
            format!("{}()", config.required_call)
        } else {
            config.check_name.clone()
        };

        Ok(Self {
            id: format!("domain-{}", config.module),
            module: config.module.clone(),
            required_call: config.required_call.clone(),
            check_name,
            call_re,
        })
    }
}

impl PatternRule for DomainInvariantRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn check(&self, candidate: &Candidate) -> Option<Decision> {
        // Import-gated: candidates that never touch the library pass through
        if !imports::imports_module(&candidate.source, &self.module) {
            return None;
        }

        if self.call_re.is_match(&candidate.source) {
            return None;
        }

        Some(Decision::ask(
            self.id.as_str(),
            format!(
                "imports '{}' but never calls the required {} '{}()'",
                self.module, self.check_name, self.required_call
            ),
        ))
    }
}
