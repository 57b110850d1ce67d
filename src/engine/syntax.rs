//! Syntax validation through the Python parser
//!
//! The candidate source is staged into a uniquely named scratch file and
//! handed to `python -m py_compile`. The scratch file is a NamedTempFile, so
//! it is removed on every exit path, including the tooling-failure ones.
//!
//! A parse failure is a normal outcome (the engine turns it into `block`);
//! an unavailable or crashing interpreter is a `GateError::Tooling` so the
//! caller never mistakes a broken toolchain for safe code.

use std::io::Write;
use std::process::Command;

use crate::error::GateError;

/// Maximum diagnostic lines carried into the block reason
const MAX_DIAGNOSTIC_LINES: usize = 5;

/// Outcome of one syntax check
#[derive(Debug)]
pub enum SyntaxCheck {
    /// Source parses under the Python grammar
    Valid,

    /// Source failed to parse; carries a bounded diagnostic excerpt
    Invalid(String),
}

/// Validate the source text with the external Python parser.
///
/// Empty source is trivially valid (a zero-statement program) and never
/// spawns the parser, so an empty draft is not blocked before content
/// exists.
pub fn check(python: &str, source: &str) -> Result<SyntaxCheck, GateError> {
    if source.trim().is_empty() {
        return Ok(SyntaxCheck::Valid);
    }

    let mut scratch = tempfile::Builder::new()
        .prefix("script-gate-")
        .suffix(".py")
        .tempfile()?;
    scratch.write_all(source.as_bytes())?;
    scratch.flush()?;

    let output = Command::new(python)
        .arg("-m")
        .arg("py_compile")
        .arg(scratch.path())
        .output()
        .map_err(|e| {
            GateError::Tooling(format!("failed to run '{} -m py_compile': {}", python, e))
        })?;

    if output.status.success() {
        return Ok(SyntaxCheck::Valid);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);

    // py_compile reports compile errors on a normal error exit with a
    // recognizable diagnostic. Anything else (signal, empty stderr, an
    // interpreter that rejects the invocation itself) is a tooling failure,
    // not a verdict on the candidate.
    if output.status.code().is_some() && is_compile_diagnostic(&stderr) {
        return Ok(SyntaxCheck::Invalid(truncate_diagnostic(&stderr)));
    }

    Err(GateError::Tooling(format!(
        "'{}' failed during syntax check without a parse diagnostic: {}",
        python,
        truncate_diagnostic(&stderr)
    )))
}

/// Markers py_compile emits for a candidate that failed to compile.
///
/// "Sorry: " prefixes the non-SyntaxError compile failures (e.g. null bytes
/// in the source).
const DIAGNOSTIC_MARKERS: &[&str] = &["SyntaxError", "IndentationError", "TabError", "Sorry: "];

/// Whether stderr carries a compiler diagnostic, as opposed to an
/// interpreter that failed for reasons unrelated to the candidate
fn is_compile_diagnostic(stderr: &str) -> bool {
    DIAGNOSTIC_MARKERS.iter().any(|m| stderr.contains(m))
}

/// Cap the parser diagnostic to its first lines, joined on a single line
fn truncate_diagnostic(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .take(MAX_DIAGNOSTIC_LINES)
        .collect::<Vec<_>>()
        .join(" | ")
}
