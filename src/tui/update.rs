//! Event dispatch: (Wizard, AppEvent) → Transition.
//!
//! This is the core logic of the questionnaire. Fully testable without a
//! terminal. Quit is intercepted before anything else sees the event;
//! everything else is routed by the current [`Step`]. Unrecognised events
//! return the wizard unchanged.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppEvent, Effect, Step, Transition, Wizard};

/// Pure state transition function.
///
/// Takes the wizard by value and hands it back inside the transition,
/// together with the effects the host must apply afterwards.
pub fn dispatch(wizard: Wizard, event: &AppEvent) -> Transition {
    if is_quit(event) {
        return Transition::Quit(wizard);
    }

    match event {
        AppEvent::Resize { width, height } => {
            let mut wizard = wizard;
            wizard.set_viewport(*width, *height);
            Transition::stay(wizard)
        }
        _ => match wizard.step() {
            Step::Editing(_) => update_editing(wizard, event),
            // Nothing but quit and resize past the summary.
            Step::Done => Transition::stay(wizard),
        },
    }
}

/// Execute one effect against the stored wizard.
///
/// Indices that no longer exist are ignored.
pub fn apply_effect(wizard: &mut Wizard, effect: Effect) {
    match effect {
        Effect::Blur { field } => {
            if let Some(question) = wizard.question_mut(field) {
                question.widget_mut().blur();
            }
        }
        Effect::Focus { field } => {
            if let Some(question) = wizard.question_mut(field) {
                question.widget_mut().focus();
            }
        }
    }
}

// ============================================================================
// EVENT CLASSIFICATION
// ============================================================================

/// Ctrl+C or Esc.
pub fn is_quit(event: &AppEvent) -> bool {
    let AppEvent::Key(key) = event else {
        return false;
    };
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Plain Enter. Shift/Alt+Enter are line breaks and go to the widget.
pub fn is_confirm(event: &AppEvent) -> bool {
    match event {
        AppEvent::Key(key) => is_confirm_key(key),
        _ => false,
    }
}

fn is_confirm_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
        && key.kind != KeyEventKind::Release
        && !key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
}

// ============================================================================
// STEP HANDLERS
// ============================================================================

/// Editing: confirm commits and advances, anything else goes to the widget.
fn update_editing(mut wizard: Wizard, event: &AppEvent) -> Transition {
    if is_confirm(event) {
        return confirm(wizard);
    }

    let effects: Vec<Effect> = wizard
        .current_mut()
        .and_then(|question| question.widget_mut().handle_input(event))
        .into_iter()
        .collect();

    Transition::Continue { wizard, effects }
}

/// Commit the current answer, blur its widget, focus the next one if any.
fn confirm(mut wizard: Wizard) -> Transition {
    let Some(committed) = wizard.commit_current() else {
        return Transition::stay(wizard);
    };

    let mut effects = vec![Effect::Blur { field: committed }];
    if let Step::Editing(next) = wizard.step() {
        effects.push(Effect::Focus { field: next });
    }

    Transition::Continue { wizard, effects }
}

// ============================================================================
// TESTS
// ============================================================================
