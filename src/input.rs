//! Input parsing for the hook JSON format
//!
//! Parses the JSON the assistant's tool-invocation layer sends on stdin and
//! turns it into a `Candidate` for the gate engine.

use serde::Deserialize;
use std::path::Path;

/// Main input structure from the tool-invocation hook
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Write", "Edit")
    pub tool_name: String,

    /// Tool-specific input parameters
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// Tool-specific input variants
#[derive(Debug, Clone)]
pub enum ToolInput {
    /// Full-file write
    Write { file_path: String, content: String },

    /// In-place edit; the replacement text is what gets gated
    Edit {
        file_path: String,
        #[allow(dead_code)]
        old_string: String,
        new_string: String,
    },

    /// Unknown tool - pass through
    Unknown { raw: serde_json::Value },
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Deserialize as raw JSON value first
        let value = serde_json::Value::deserialize(deserializer)?;

        // Determine the shape based on which fields are present
        if let Some(obj) = value.as_object() {
            if let Some(file_path) = obj.get("file_path").and_then(|v| v.as_str()) {
                // Edit has old_string and new_string
                if let (Some(old_string), Some(new_string)) = (
                    obj.get("old_string").and_then(|v| v.as_str()),
                    obj.get("new_string").and_then(|v| v.as_str()),
                ) {
                    return Ok(ToolInput::Edit {
                        file_path: file_path.to_string(),
                        old_string: old_string.to_string(),
                        new_string: new_string.to_string(),
                    });
                }

                // Write has content
                if let Some(content) = obj.get("content").and_then(|v| v.as_str()) {
                    return Ok(ToolInput::Write {
                        file_path: file_path.to_string(),
                        content: content.to_string(),
                    });
                }
            }
        }

        // Unknown tool format - preserve raw data
        Ok(ToolInput::Unknown { raw: value })
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the candidate script this input is trying to persist, if any
    pub fn candidate(&self) -> Option<Candidate> {
        match &self.tool_input {
            ToolInput::Write { file_path, content } => {
                Some(Candidate::new(file_path.as_str(), content.as_str()))
            }
            ToolInput::Edit {
                file_path,
                new_string,
                ..
            } => Some(Candidate::new(file_path.as_str(), new_string.as_str())),
            ToolInput::Unknown { .. } => None,
        }
    }

    /// Get a summary of the input for diagnostics
    pub fn summary(&self) -> String {
        match &self.tool_input {
            ToolInput::Write { file_path, .. } => format!("Write: {}", file_path),
            ToolInput::Edit { file_path, .. } => format!("Edit: {}", file_path),
            ToolInput::Unknown { .. } => format!("Unknown tool: {}", self.tool_name),
        }
    }
}

/// Language tag of a candidate, derived from its target path.
///
/// Only Python is governed; everything else passes through the gate
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Other,
}

impl Language {
    /// Derive the language from a target file path
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("py") => Language::Python,
            _ => Language::Other,
        }
    }
}

/// The unit under evaluation: one script about to be written or executed.
///
/// Immutable once created; lives for the duration of a single evaluation.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Language derived from the target path
    pub language: Language,

    /// Full source text
    pub source: String,

    /// Target file path supplied by the caller
    pub path: String,
}

impl Candidate {
    /// Create a candidate for a target path and source text
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let path = path.into();
        Candidate {
            language: Language::from_path(&path),
            source: source.into(),
            path,
        }
    }
}
