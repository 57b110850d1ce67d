//! Decision lattice and caller-facing response format
//!
//! Produces the JSON response the tool-invocation layer expects:
//! `{"decision": "allow"|"ask"|"block", "reason": "..."}` with the reason
//! present only when the decision is not allow.

use serde::Serialize;

/// Rule identifier the syntax validator reports under.
pub const SYNTAX_RULE_ID: &str = "syntax";

/// Decision result from the gate engine.
///
/// The three values form a total severity order: allow < ask < block.
/// Every non-allow decision names the rule that produced it and carries a
/// human-readable reason, so this type doubles as the evaluation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the write/execute proceed; no rule triggered.
    Allow,

    /// Pause for human confirmation before proceeding.
    Ask { rule_id: String, reason: String },

    /// Refuse the operation outright.
    Block { rule_id: String, reason: String },
}

impl Decision {
    /// Create an ask decision
    pub fn ask(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Decision::Ask {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a block decision
    pub fn block(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Decision::Block {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Severity rank: allow = 0, ask = 1, block = 2
    pub fn severity(&self) -> u8 {
        match self {
            Decision::Allow => 0,
            Decision::Ask { .. } => 1,
            Decision::Block { .. } => 2,
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is an ask decision
    pub fn is_ask(&self) -> bool {
        matches!(self, Decision::Ask { .. })
    }

    /// Check if this is a block decision
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// The wire literal for this decision
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Ask { .. } => "ask",
            Decision::Block { .. } => "block",
        }
    }

    /// Get the triggering rule ID, or None when no rule triggered
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Ask { rule_id, .. } => Some(rule_id),
            Decision::Block { rule_id, .. } => Some(rule_id),
        }
    }

    /// Get the reason, or None for allow
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Ask { reason, .. } => Some(reason),
            Decision::Block { reason, .. } => Some(reason),
        }
    }
}

/// The structured response consumed by the caller.
///
/// Pure formatting boundary: no decision logic happens here.
#[derive(Debug, Serialize)]
pub struct GateResponse {
    /// One of "allow", "ask", "block"
    pub decision: &'static str,

    /// Present iff decision != allow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GateResponse {
    /// Build the response for a decision
    pub fn from_decision(decision: &Decision) -> Self {
        let reason = decision
            .rule_id()
            .map(|id| format!("[{}] {}", id, decision.reason().unwrap_or_default()));
        GateResponse {
            decision: decision.as_str(),
            reason,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
