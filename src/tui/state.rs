//! Wizard state algebra: pure types, zero effects.
//!
//! These types define the whole questionnaire state space. The dispatcher
//! (`update`) and the renderer (`view`) both program against them.
//!
//! Design principle: completion is derived from the cursor, never stored
//! beside it, so `done` and `cursor == len` cannot disagree. Fields are
//! private where an invariant depends on them; the cursor only moves
//! forward through [`Wizard::commit_current`].

use crossterm::event::KeyEvent;

use crate::types::{Answer, FieldDescriptor};

use super::field::FieldWidget;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can hand to the dispatcher.
///
/// The key reader thread translates crossterm events into these. Anything
/// the wizard has no use for arrives as `Other` and is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A terminal key event.
    Key(KeyEvent),
    /// Bracketed paste.
    Paste(String),
    /// The terminal viewport changed size.
    Resize { width: u16, height: u16 },
    /// Mouse, focus and other events. Always a no-op.
    Other,
}

// ============================================================================
// QUESTIONS
// ============================================================================

/// One prompt, the widget that edits its answer, and the committed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    widget: FieldWidget,
    answer: String,
}

impl Question {
    pub fn new(descriptor: &FieldDescriptor) -> Self {
        Question {
            prompt: descriptor.prompt.clone(),
            widget: FieldWidget::from_descriptor(descriptor),
            answer: String::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Committed answer. Empty until the question is confirmed.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn widget(&self) -> &FieldWidget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut FieldWidget {
        &mut self.widget
    }
}

// ============================================================================
// WIZARD
// ============================================================================

/// Where the wizard is in its forward walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Editing the question at this index.
    Editing(usize),
    /// Every question answered. Terminal.
    Done,
}

/// Terminal size as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Top-level model: the ordered questions, a cursor, and layout info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    questions: Vec<Question>,
    /// In `0..=questions.len()`. Equal to the length once done.
    cursor: usize,
    /// None until the first resize event arrives.
    viewport: Option<Viewport>,
}

impl Wizard {
    /// Build the wizard from its descriptors and focus the first field.
    ///
    /// An empty list starts (and stays) in [`Step::Done`].
    pub fn new(descriptors: &[FieldDescriptor]) -> Self {
        let mut questions: Vec<Question> = descriptors.iter().map(Question::new).collect();
        if let Some(first) = questions.first_mut() {
            first.widget.focus();
        }
        Wizard {
            questions,
            cursor: 0,
            viewport: None,
        }
    }

    pub fn step(&self) -> Step {
        if self.is_done() {
            Step::Done
        } else {
            Step::Editing(self.cursor)
        }
    }

    pub fn is_done(&self) -> bool {
        self.cursor == self.questions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_mut(&mut self, index: usize) -> Option<&mut Question> {
        self.questions.get_mut(index)
    }

    /// The question being edited. None once done.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn current_mut(&mut self) -> Option<&mut Question> {
        self.questions.get_mut(self.cursor)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Some(Viewport { width, height });
    }

    /// Copy the current widget's value into its answer slot and advance.
    ///
    /// Returns the index that was committed, or None when already done.
    pub fn commit_current(&mut self) -> Option<usize> {
        let index = self.cursor;
        let question = self.questions.get_mut(index)?;
        question.answer = question.widget.value().to_string();
        self.cursor += 1;
        Some(index)
    }

    /// Final `(prompt, answer)` pairs in field order. None until done.
    pub fn answers(&self) -> Option<Vec<Answer>> {
        if !self.is_done() {
            return None;
        }
        Some(
            self.questions
                .iter()
                .map(|q| Answer {
                    prompt: q.prompt.clone(),
                    answer: q.answer.clone(),
                })
                .collect(),
        )
    }
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of dispatching one event.
///
/// Follows the Elm/TEA pattern: pure code describes WHAT should happen,
/// the host decides HOW and when.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep running with this state, then execute the effects in order.
    Continue { wizard: Wizard, effects: Vec<Effect> },
    /// Stop now. The wizard is returned exactly as it was received.
    Quit(Wizard),
}

impl Transition {
    /// Continue with no effects.
    pub fn stay(wizard: Wizard) -> Self {
        Transition::Continue {
            wizard,
            effects: Vec::new(),
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Transition::Quit(_))
    }

    pub fn wizard(&self) -> &Wizard {
        match self {
            Transition::Continue { wizard, .. } | Transition::Quit(wizard) => wizard,
        }
    }

    pub fn into_wizard(self) -> Wizard {
        match self {
            Transition::Continue { wizard, .. } | Transition::Quit(wizard) => wizard,
        }
    }
}

/// Side effect requested by a transition.
///
/// The dispatcher never performs these. The host applies them after it
/// has stored the new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The field at this index lost focus (its answer was just committed).
    Blur { field: usize },
    /// The field at this index becomes the active one.
    Focus { field: usize },
}

// ============================================================================
// TESTS
// ============================================================================
