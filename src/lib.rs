//! script-gate - policy gate for AI-generated Python scripts
//!
//! This library inspects machine-generated source scripts immediately before
//! they are persisted or executed and renders a tri-state decision with a
//! human-readable justification. It sits between an automated code generator
//! and the filesystem as the last line of defense against syntactically
//! broken, operationally dangerous, or domain-unsafe code.
//!
//! # Features
//!
//! - **Syntax validation**: candidates must parse under the Python grammar
//!   (checked through the real interpreter's `py_compile`)
//! - **Restricted imports**: system-capability modules (os, subprocess, sys,
//!   shutil) require human confirmation
//! - **Dynamic execution**: `eval(`/`exec(` calls require confirmation
//! - **Domain invariants**: CAD/EDA scripts must carry their library's
//!   safety check (`isValid()` for CadQuery, `ERC()` for SKiDL)
//! - **Configurable**: all three rule surfaces are TOML data, not code
//!
//! # Decision lattice
//!
//! `allow` < `ask` < `block`. The syntax check runs first and is terminal on
//! failure; pattern rules run in registration order with first-match-wins.
//!
//! # Example
//!
//! ```no_run
//! use script_gate::{Candidate, Config, GateEngine};
//!
//! let engine = GateEngine::new(Config::default()).unwrap();
//!
//! let candidate = Candidate::new("part.py", "import subprocess\n");
//! let decision = engine.evaluate(&candidate).unwrap();
//! assert!(decision.is_ask());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::GateEngine;
pub use error::GateError;
pub use input::{Candidate, HookInput, Language, ToolInput};
pub use output::{Decision, GateResponse};
