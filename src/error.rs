//! Error taxonomy for script-gate
//!
//! Only conditions that are NOT decisions live here. A candidate that fails
//! to parse, or that trips a pattern rule, produces an ordinary `Decision`
//! through the normal channel; `GateError` covers the cases where the gate
//! itself could not render a decision and the caller must fall back.

use thiserror::Error;

/// Failures that are distinct from the allow/ask/block decision lattice.
#[derive(Debug, Error)]
pub enum GateError {
    /// The external Python parser is unavailable or crashed for a reason
    /// unrelated to the candidate's syntax. Must never be treated as `allow`.
    #[error("syntax validator tooling failure: {0}")]
    Tooling(String),

    /// The rule set configuration is malformed. Raised at engine
    /// construction, before any candidate is evaluated.
    #[error("invalid rule configuration: {0}")]
    Config(String),

    /// I/O failure while staging the candidate for validation.
    #[error("scratch file I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
