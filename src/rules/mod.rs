//! Pattern rules for script-gate
//!
//! Each rule is a stateless predicate over a candidate plus the decision it
//! yields when triggered. Rules never yield `allow`; a candidate that trips
//! no rule falls through to `allow` in the engine. Registration order is
//! part of the contract: the engine evaluates rules in order and stops at
//! the first trigger.

pub mod domain;
pub mod dynamic;
pub mod imports;

use crate::input::Candidate;
use crate::output::Decision;

/// A stateless check in the ordered rule set.
///
/// `check` returns the rule's decision when the candidate triggers it, or
/// None to let evaluation continue. Implementations must yield only `ask`
/// or `block`, and the message must name the specific condition detected
/// (which import, which primitive, which missing invariant).
pub trait PatternRule: Send + Sync {
    /// Stable identifier, reported in the evaluation result
    fn id(&self) -> &str;

    /// Evaluate the trigger predicate against a candidate
    fn check(&self, candidate: &Candidate) -> Option<Decision>;
}
