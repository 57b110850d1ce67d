//! Import detection and the restricted-module-import rule
//!
//! Import matching is line-anchored: only `import X` / `from X import ...`
//! at statement position count, so mentions inside comments and string
//! literals do not trigger import-gated rules. Dotted imports match on their
//! root segment (`import os.path` counts as `os`). Module names are
//! case-sensitive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GateError;
use crate::input::Candidate;
use crate::output::Decision;
use crate::rules::PatternRule;

/// Matches an import statement, capturing the keyword and the rest of the line
static IMPORT_STMT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(import|from)\s+([^\n]+)")
        .expect("import statement pattern is valid")
});

/// Extract the root module names imported by the source, in source order.
///
/// `import a, b as x, c.d` yields every listed module; `from a.b import c`
/// yields only the source module.
pub fn imported_modules(source: &str) -> Vec<&str> {
    let mut modules = Vec::new();
    for caps in IMPORT_STMT.captures_iter(source) {
        let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let clause = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        if keyword == "from" {
            modules.extend(module_root(clause));
        } else {
            // `import` takes a comma-separated module list
            modules.extend(clause.split(',').filter_map(module_root));
        }
    }
    modules
}

/// Root segment of one import clause entry, if it starts with a valid name
fn module_root(segment: &str) -> Option<&str> {
    let segment = segment.trim_start();
    let end = segment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(segment.len());
    let root = segment[..end].split('.').next()?;
    let first = root.chars().next()?;
    if first.is_ascii_alphabetic() || first == '_' {
        Some(root)
    } else {
        None
    }
}

/// Check whether the source imports the given module (root-segment match)
pub fn imports_module(source: &str, module: &str) -> bool {
    imported_modules(source).iter().any(|m| *m == module)
}

/// Asks for confirmation when the source imports a system-capability module
/// (process control, subprocess execution, filesystem bulk operations,
/// interpreter access).
pub struct RestrictedImportRule {
    modules: Vec<String>,
}

impl RestrictedImportRule {
    pub const ID: &'static str = "restricted-import";

    /// Build the rule from the configured deny list
    pub fn new(modules: Vec<String>) -> Result<Self, GateError> {
        if modules.iter().any(|m| m.trim().is_empty()) {
            return Err(GateError::Config(
                "restricted_modules contains an empty module name".to_string(),
            ));
        }
        Ok(Self { modules })
    }
}

impl PatternRule for RestrictedImportRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn check(&self, candidate: &Candidate) -> Option<Decision> {
        // First offending import in source order names the decision
        for imported in imported_modules(&candidate.source) {
            if self.modules.iter().any(|m| m == imported) {
                return Some(Decision::ask(
                    Self::ID,
                    format!("imports restricted module '{}'", imported),
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RestrictedImportRule {
        RestrictedImportRule::new(vec![
            "os".to_string(),
            "subprocess".to_string(),
            "sys".to_string(),
            "shutil".to_string(),
        ])
        .unwrap()
    }

    fn candidate(source: &str) -> Candidate {
        Candidate::new("script.py", source)
    }

    #[test]
    fn test_plain_import_triggers() {
        let decision = rule().check(&candidate("import subprocess\n")).unwrap();
        assert!(decision.is_ask());
        assert!(decision.reason().unwrap().contains("subprocess"));
    }

    #[test]
    fn test_from_import_triggers() {
        let decision = rule().check(&candidate("from os import path\n")).unwrap();
        assert!(decision.is_ask());
        assert!(decision.reason().unwrap().contains("'os'"));
    }

    #[test]
    fn test_dotted_import_matches_root() {
        assert!(rule().check(&candidate("import os.path\n")).is_some());
        assert!(rule().check(&candidate("from os.path import join\n")).is_some());
    }

    #[test]
    fn test_aliased_import_triggers() {
        assert!(rule().check(&candidate("import shutil as sh\n")).is_some());
    }

    #[test]
    fn test_indented_import_triggers() {
        let source = "def f():\n    import sys\n";
        assert!(rule().check(&candidate(source)).is_some());
    }

    #[test]
    fn test_prefix_module_does_not_match() {
        // "osmium" starts with "os" but is a different module
        assert!(rule().check(&candidate("import osmium\n")).is_none());
    }

    #[test]
    fn test_comment_mention_does_not_trigger() {
        assert!(rule().check(&candidate("# import subprocess later\nx = 1\n")).is_none());
    }

    #[test]
    fn test_string_mention_does_not_trigger() {
        assert!(rule().check(&candidate("doc = \"import os\"\n")).is_none());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(rule().check(&candidate("import OS\n")).is_none());
    }

    #[test]
    fn test_first_import_named() {
        let decision = rule()
            .check(&candidate("import sys\nimport subprocess\n"))
            .unwrap();
        assert!(decision.reason().unwrap().contains("'sys'"));
    }

    #[test]
    fn test_empty_module_name_rejected() {
        let result = RestrictedImportRule::new(vec!["os".to_string(), "  ".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_comma_separated_import_triggers() {
        let decision = rule()
            .check(&candidate("import math, subprocess\nsubprocess.run([\"ls\"])\n"))
            .unwrap();
        assert!(decision.is_ask());
        assert!(decision.reason().unwrap().contains("subprocess"));
    }

    #[test]
    fn test_comma_separated_import_with_aliases() {
        let decision = rule()
            .check(&candidate("import math, shutil as sh, json\n"))
            .unwrap();
        assert!(decision.reason().unwrap().contains("shutil"));
    }

    #[test]
    fn test_comma_separated_modules_all_extracted() {
        let source = "import math, cadquery, os.path\n";
        assert_eq!(imported_modules(source), vec!["math", "cadquery", "os"]);
        assert!(imports_module(source, "cadquery"));
    }

    #[test]
    fn test_imported_modules_extraction() {
        let source = "import cadquery as cq\nfrom skidl import Part\nimport math\n";
        assert_eq!(imported_modules(source), vec!["cadquery", "skidl", "math"]);
        assert!(imports_module(source, "skidl"));
        assert!(!imports_module(source, "numpy"));
    }
}
