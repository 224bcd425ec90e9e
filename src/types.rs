//! Domain types for questionnaire.
//!
//! Plain data shared by the config loader, the wizard core and the
//! report formatter. No behaviour beyond constructors.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

/// Which kind of text control a question is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// One line of text. Line breaks are rejected.
    #[default]
    SingleLine,
    /// Free text spanning several lines.
    MultiLine,
}

/// Output format for the final answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable `prompt: answer` lines.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// STRUCTS
// ============================================================================

/// Static description of one question, supplied once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Text shown above the input box.
    pub prompt: String,
    /// Single-line or multi-line input.
    #[serde(default)]
    pub kind: FieldKind,
    /// Hint shown while the field is empty. None = widget default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A committed `(prompt, answer)` pair, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub prompt: String,
    pub answer: String,
}

impl FieldDescriptor {
    /// Single-line descriptor with the default placeholder.
    pub fn single_line(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: FieldKind::SingleLine,
            placeholder: None,
        }
    }

    /// Multi-line descriptor with the default placeholder.
    pub fn multi_line(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: FieldKind::MultiLine,
            placeholder: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
