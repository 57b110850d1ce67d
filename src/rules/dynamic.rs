//! Dynamic-execution rule
//!
//! Scans for calls to dynamic code-evaluation primitives (`eval(...)`,
//! `exec(...)`) anywhere in the source text. Unlike the import rules this is
//! a raw-text scan: matches inside string literals and comments are accepted
//! as a conservative tradeoff. A word boundary keeps unrelated names like
//! `literal_eval(` from counting.

use regex::Regex;

use crate::error::GateError;
use crate::input::Candidate;
use crate::output::Decision;
use crate::rules::PatternRule;

/// Asks for confirmation when the source calls a dynamic-evaluation primitive.
pub struct DynamicExecRule {
    primitives: Vec<(String, Regex)>,
}

impl DynamicExecRule {
    pub const ID: &'static str = "dynamic-exec";

    /// Build the rule from the configured primitive names
    pub fn new(primitives: Vec<String>) -> Result<Self, GateError> {
        let mut compiled = Vec::with_capacity(primitives.len());
        for name in primitives {
            if name.trim().is_empty() {
                return Err(GateError::Config(
                    "dynamic_primitives contains an empty name".to_string(),
                ));
            }
            let pattern = format!(r"\b{}\s*\(", regex::escape(&name));
            let re = Regex::new(&pattern)
                .map_err(|e| GateError::Config(format!("primitive '{}': {}", name, e)))?;
            compiled.push((name, re));
        }
        Ok(Self {
            primitives: compiled,
        })
    }
}

impl PatternRule for DynamicExecRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn check(&self, candidate: &Candidate) -> Option<Decision> {
        for (name, re) in &self.primitives {
            if re.is_match(&candidate.source) {
                return Some(Decision::ask(
                    Self::ID,
                    format!("calls dynamic-execution primitive '{}()'", name),
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> DynamicExecRule {
        DynamicExecRule::new(vec!["eval".to_string(), "exec".to_string()]).unwrap()
    }

    fn candidate(source: &str) -> Candidate {
        Candidate::new("script.py", source)
    }

    #[test]
    fn test_eval_call_triggers() {
        let decision = rule().check(&candidate("x = eval(\"1+1\")\n")).unwrap();
        assert!(decision.is_ask());
        assert!(decision.reason().unwrap().contains("eval()"));
    }

    #[test]
    fn test_exec_call_triggers() {
        let decision = rule().check(&candidate("exec(code)\n")).unwrap();
        assert!(decision.reason().unwrap().contains("exec()"));
    }

    #[test]
    fn test_space_before_paren_triggers() {
        assert!(rule().check(&candidate("eval (expr)\n")).is_some());
    }

    #[test]
    fn test_literal_eval_does_not_trigger() {
        assert!(rule()
            .check(&candidate("from ast import literal_eval\nliteral_eval(s)\n"))
            .is_none());
    }

    #[test]
    fn test_bare_name_does_not_trigger() {
        // Reference to the name without call syntax
        assert!(rule().check(&candidate("f = eval\n")).is_none());
    }

    #[test]
    fn test_string_occurrence_triggers_conservatively() {
        // Accepted false positive: call syntax inside a string literal
        assert!(rule().check(&candidate("s = \"eval(x)\"\n")).is_some());
    }

    #[test]
    fn test_clean_source_passes() {
        assert!(rule().check(&candidate("print(\"hello\")\n")).is_none());
    }

    #[test]
    fn test_empty_primitive_rejected() {
        assert!(DynamicExecRule::new(vec!["".to_string()]).is_err());
    }
}
