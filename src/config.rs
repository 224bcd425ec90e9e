//! Questionnaire definitions: the declarative builder and the JSON file.
//!
//! Structure:
//! - Pure functions: builder, parsing, style resolution
//! - Effect functions: reading the file from disk

use std::fs;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::tui::theme::Styles;
use crate::types::{FieldDescriptor, FieldKind};

// ============================================================================
// BUILDER
// ============================================================================

/// Declarative builder for an ordered field list.
///
/// ```
/// use questionnaire::config::FieldsBuilder;
///
/// let fields = FieldsBuilder::new()
///     .single_line("Name")
///     .placeholder("e.g. Ada")
///     .multi_line("Bio")
///     .build();
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FieldsBuilder {
    fields: Vec<FieldDescriptor>,
}

impl FieldsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_line(self, prompt: impl Into<String>) -> Self {
        self.field(prompt, FieldKind::SingleLine)
    }

    pub fn multi_line(self, prompt: impl Into<String>) -> Self {
        self.field(prompt, FieldKind::MultiLine)
    }

    pub fn field(mut self, prompt: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            prompt: prompt.into(),
            kind,
            placeholder: None,
        });
        self
    }

    /// Set the placeholder of the most recently added field.
    /// No-op when no field has been added yet.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.placeholder = Some(text.into());
        }
        self
    }

    pub fn build(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}

// ============================================================================
// QUESTIONNAIRE
// ============================================================================

/// A fully resolved questionnaire: what to ask and how to frame it.
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    pub fields: Vec<FieldDescriptor>,
    pub styles: Styles,
}

impl Default for Questionnaire {
    /// The built-in two-question demo.
    fn default() -> Self {
        Questionnaire {
            fields: FieldsBuilder::new()
                .single_line("first question")
                .multi_line("second question")
                .build(),
            styles: Styles::default(),
        }
    }
}

/// On-disk shape of a questionnaire file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionnaireFile {
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    style: StyleConfig,
}

/// Optional overrides for [`Styles`]. Missing keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleConfig {
    border_color: Option<String>,
    padding: Option<u16>,
    width: Option<u16>,
}

impl StyleConfig {
    fn resolve(self) -> Result<Styles> {
        let defaults = Styles::default();
        let border_color = match self.border_color {
            Some(s) => Color::from_str(&s).map_err(|_| Error::InvalidColor(s))?,
            None => defaults.border_color,
        };
        let styles = Styles {
            border_color,
            padding: self.padding.unwrap_or(defaults.padding),
            width: self.width.unwrap_or(defaults.width),
        };
        validate_styles(&styles)?;
        Ok(styles)
    }
}

/// Width must leave at least one text column inside border and padding.
fn validate_styles(styles: &Styles) -> Result<()> {
    let chrome = 2u32 + 2 * u32::from(styles.padding);
    if u32::from(styles.width) <= chrome {
        return Err(Error::InvalidStyle(format!(
            "width {} leaves no room for text with padding {}",
            styles.width, styles.padding
        )));
    }
    Ok(())
}

/// Parse questionnaire JSON.
pub fn parse_questionnaire(json: &str) -> Result<Questionnaire> {
    let file: QuestionnaireFile = serde_json::from_str(json)?;
    Ok(Questionnaire {
        fields: file.fields,
        styles: file.style.resolve()?,
    })
}

/// Read and parse a questionnaire file.
pub fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    let contents = fs::read_to_string(path)?;
    parse_questionnaire(&contents)
}

// ============================================================================
// TESTS
// ============================================================================
