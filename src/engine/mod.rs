//! The gate engine
//!
//! Runs one candidate through the full gate: language scoping, syntax
//! validation, then the ordered pattern rule set with first-match-wins
//! short-circuiting. The engine holds no state across evaluations; the same
//! candidate always yields the same decision under the same rule set.

pub mod syntax;

use crate::config::Config;
use crate::error::GateError;
use crate::input::{Candidate, Language};
use crate::output::{Decision, SYNTAX_RULE_ID};
use crate::rules::domain::DomainInvariantRule;
use crate::rules::dynamic::DynamicExecRule;
use crate::rules::imports::RestrictedImportRule;
use crate::rules::PatternRule;

/// The policy gate engine
pub struct GateEngine {
    python: String,
    rules: Vec<Box<dyn PatternRule>>,
}

impl GateEngine {
    /// Build an engine from configuration.
    ///
    /// Compiles every rule up front and fails fast on a malformed rule set,
    /// before any candidate is evaluated. Registration order is the
    /// evaluation order: restricted imports, dynamic execution, then the
    /// domain rules in config order.
    pub fn new(config: Config) -> Result<Self, GateError> {
        let mut rules: Vec<Box<dyn PatternRule>> = Vec::new();

        rules.push(Box::new(RestrictedImportRule::new(
            config.rules.restricted_modules,
        )?));
        rules.push(Box::new(DynamicExecRule::new(
            config.rules.dynamic_primitives,
        )?));
        for domain in &config.domains {
            rules.push(Box::new(DomainInvariantRule::new(domain)?));
        }

        Ok(Self {
            python: config.general.python,
            rules,
        })
    }

    /// Evaluate one candidate and render a decision.
    ///
    /// Out-of-scope candidates (anything that is not a Python target) pass
    /// through with `allow` and no rule evaluation. For Python candidates
    /// the syntax check runs unconditionally first; no later rule can
    /// override a syntax failure.
    pub fn evaluate(&self, candidate: &Candidate) -> Result<Decision, GateError> {
        if candidate.language != Language::Python {
            return Ok(Decision::Allow);
        }

        match syntax::check(&self.python, &candidate.source)? {
            syntax::SyntaxCheck::Valid => {}
            syntax::SyntaxCheck::Invalid(diag) => {
                return Ok(Decision::block(
                    SYNTAX_RULE_ID,
                    format!("candidate does not parse: {}", diag),
                ));
            }
        }

        Ok(self.scan_rules(candidate).unwrap_or(Decision::Allow))
    }

    /// Run the pattern rule set in registration order, stopping at the
    /// first trigger
    pub fn scan_rules(&self, candidate: &Candidate) -> Option<Decision> {
        self.rules.iter().find_map(|rule| rule.check(candidate))
    }

    /// Registered rule IDs, in evaluation order
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DomainConfig;

    fn engine() -> GateEngine {
        GateEngine::new(Config::default()).unwrap()
    }

    fn py(source: &str) -> Candidate {
        Candidate::new("generated.py", source)
    }

    #[test]
    fn test_registration_order() {
        let engine = engine();
        assert_eq!(
            engine.rule_ids(),
            vec![
                "restricted-import",
                "dynamic-exec",
                "domain-cadquery",
                "domain-skidl"
            ]
        );
    }

    #[test]
    fn test_clean_source_allowed() {
        let decision = engine().evaluate(&py("x = 1 + 1\nprint(x)\n")).unwrap();
        assert!(decision.is_allow());
    }

    #[test]
    fn test_out_of_scope_passthrough() {
        // Even unparsable-as-Python content is allowed for non-.py targets
        let candidate = Candidate::new("notes.md", "this is ( not python");
        let decision = engine().evaluate(&candidate).unwrap();
        assert!(decision.is_allow());
    }

    #[test]
    fn test_syntax_failure_blocks_before_rules() {
        // Contains a restricted import, but the unmatched parenthesis is
        // reported first because syntax always runs first
        let decision = engine()
            .evaluate(&py("import subprocess\nsubprocess.run([\"ls\"\n"))
            .unwrap();
        assert!(decision.is_block());
        assert_eq!(decision.rule_id(), Some("syntax"));
    }

    #[test]
    fn test_first_match_wins_across_rules() {
        // Triggers both restricted-import and dynamic-exec; only the first
        // registered rule is reported
        let decision = engine()
            .evaluate(&py("import os\nx = eval(\"1\")\n"))
            .unwrap();
        assert_eq!(decision.rule_id(), Some("restricted-import"));
    }

    #[test]
    fn test_deny_list_beats_domain_list() {
        // Registration-order precedence for the deny/allow collision case
        let decision = engine()
            .evaluate(&py("import subprocess\nimport cadquery\n"))
            .unwrap();
        assert_eq!(decision.rule_id(), Some("restricted-import"));
    }

    #[test]
    fn test_empty_source_allowed() {
        let decision = engine().evaluate(&py("")).unwrap();
        assert!(decision.is_allow());
    }

    #[test]
    fn test_config_error_fails_construction() {
        let mut config = Config::default();
        config.domains.push(DomainConfig {
            module: "pyspice".to_string(),
            required_call: String::new(),
            check_name: String::new(),
        });
        assert!(matches!(
            GateEngine::new(config),
            Err(GateError::Config(_))
        ));
    }

    #[test]
    fn test_idempotent_evaluation() {
        let engine = engine();
        let candidate = py("import cadquery as cq\n");
        let first = engine.evaluate(&candidate).unwrap();
        let second = engine.evaluate(&candidate).unwrap();
        assert_eq!(first, second);
    }
}
