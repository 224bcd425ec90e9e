//! Report formatting for completed questionnaires.
//!
//! Pure functions: (answers, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::{Answer, OutputFormat};

/// Format the final answers for output.
pub fn format_answers(answers: &[Answer], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(answers),
        OutputFormat::Json => format_json(answers),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

/// One `prompt: answer` line per question. Multi-line answers keep
/// their own line breaks.
fn format_human(answers: &[Answer]) -> String {
    let mut out = String::new();
    for a in answers {
        out.push_str(&format!("{}: {}\n", a.prompt, a.answer));
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(answers: &[Answer]) -> String {
    // Vec of plain string structs: serialization cannot fail.
    let mut out = serde_json::to_string_pretty(answers).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================
