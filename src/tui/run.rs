//! TUI effects boundary: event loop, terminal lifecycle, event mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal; the wizard logic lives in the pure layers.
//!
//! Architecture: one reader thread feeds an mpsc channel with translated
//! terminal events. The loop renders, blocks for the next event, hands it
//! to `dispatch`, stores the new state, then executes the effects.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Questionnaire;
use crate::types::Answer;

use super::state::{AppEvent, Effect, Transition, Wizard};
use super::update::{apply_effect, dispatch};
use super::view::render;

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every question answered. Answers in field order.
    Completed(Vec<Answer>),
    /// The user quit before the last confirm.
    Aborted,
}

/// Host behaviour knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Leave the loop as soon as the summary is reached.
    pub exit_on_complete: bool,
}

// ============================================================================
// EVENT MAPPING
// ============================================================================

/// Translate a crossterm event into the wizard's event type.
pub fn map_event(event: Event) -> AppEvent {
    match event {
        Event::Key(key) => AppEvent::Key(key),
        Event::Paste(text) => AppEvent::Paste(text),
        Event::Resize(width, height) => AppEvent::Resize { width, height },
        _ => AppEvent::Other,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Kitty keyboard protocol flags. Disambiguation is what lets Shift+Enter
/// arrive as Enter+SHIFT instead of a bare carriage return.
const KEYBOARD_FLAGS: KeyboardEnhancementFlags =
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;

/// Set once the flags were pushed, so restore pops exactly what it pushed.
static KEYBOARD_ENHANCED: AtomicBool = AtomicBool::new(false);

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    enable_keyboard_enhancement();
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Push the keyboard flags when the terminal understands them.
///
/// Not fatal when missing: Alt+Enter and Ctrl+J still insert line breaks.
fn enable_keyboard_enhancement() {
    match supports_keyboard_enhancement() {
        Ok(true) => match io::stdout().execute(PushKeyboardEnhancementFlags(KEYBOARD_FLAGS)) {
            Ok(_) => {
                KEYBOARD_ENHANCED.store(true, Ordering::SeqCst);
                tracing::debug!("keyboard enhancement enabled");
            }
            Err(e) => tracing::warn!(error = %e, "could not enable keyboard enhancement"),
        },
        Ok(false) => tracing::debug!("terminal has no keyboard enhancement, Shift+Enter confirms"),
        Err(e) => tracing::warn!(error = %e, "keyboard enhancement query failed"),
    }
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    if KEYBOARD_ENHANCED.swap(false, Ordering::SeqCst) {
        io::stdout().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(map_event(ev)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event read failed");
                    break;
                }
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the questionnaire in the terminal until it is quit (or completed,
/// with `exit_on_complete`).
pub fn run(questionnaire: &Questionnaire, options: RunOptions) -> io::Result<Outcome> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, questionnaire, options);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    questionnaire: &Questionnaire,
    options: RunOptions,
) -> io::Result<Outcome> {
    let styles = questionnaire.styles;
    let mut wizard = Wizard::new(&questionnaire.fields);
    tracing::info!(fields = wizard.questions().len(), "questionnaire started");

    let (tx, rx) = mpsc::channel::<AppEvent>();

    // The reader only reports size changes, so seed the first layout.
    let (width, height) = crossterm::terminal::size()?;
    let _ = tx.send(AppEvent::Resize { width, height });
    spawn_event_reader(tx);

    loop {
        terminal.draw(|frame| render(&wizard, &styles, frame))?;

        if options.exit_on_complete && wizard.is_done() {
            break;
        }

        // Block on the next event
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader gone
        };
        tracing::trace!(?event, "event");

        match dispatch(wizard, &event) {
            Transition::Continue {
                wizard: next,
                effects,
            } => {
                wizard = next;
                for effect in effects {
                    execute_effect(effect, &mut wizard);
                }
            }
            Transition::Quit(last) => {
                tracing::info!(step = ?last.step(), "quit requested");
                wizard = last;
                break;
            }
        }
    }

    Ok(outcome(&wizard))
}

fn outcome(wizard: &Wizard) -> Outcome {
    match wizard.answers() {
        Some(answers) => Outcome::Completed(answers),
        None => Outcome::Aborted,
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a transition.
fn execute_effect(effect: Effect, wizard: &mut Wizard) {
    apply_effect(wizard, effect);

    match effect {
        Effect::Blur { field } => {
            if let Some(q) = wizard.question(field) {
                tracing::info!(question = %q.prompt(), answer = %q.answer(), "answer committed");
            }
            if wizard.is_done() {
                tracing::info!("questionnaire complete");
            }
        }
        Effect::Focus { field } => {
            tracing::debug!(field, "focus moved");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDescriptor;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

    #[test]
    fn keyboard_flags_disambiguate_modified_enter() {
        assert!(KEYBOARD_FLAGS.contains(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES));
    }

    #[test]
    fn enhanced_shift_enter_reaches_multi_line_field_as_newline() {
        use crate::tui::update::dispatch;

        let wizard = Wizard::new(&[FieldDescriptor::multi_line("Bio")]);
        let shift_enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        let wizard = dispatch(wizard, &map_event(shift_enter)).into_wizard();
        assert_eq!(wizard.cursor(), 0);
        assert_eq!(wizard.current().unwrap().widget().value(), "\n");
    }

    #[test]
    fn key_events_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(map_event(Event::Key(key)), AppEvent::Key(key));
    }

    #[test]
    fn resize_maps_to_viewport_event() {
        assert_eq!(
            map_event(Event::Resize(120, 40)),
            AppEvent::Resize {
                width: 120,
                height: 40
            }
        );
    }

    #[test]
    fn paste_maps_to_paste() {
        assert_eq!(
            map_event(Event::Paste("hello".into())),
            AppEvent::Paste("hello".into())
        );
    }

    #[test]
    fn focus_and_mouse_events_are_other() {
        assert_eq!(map_event(Event::FocusGained), AppEvent::Other);
        let mouse = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_event(Event::Mouse(mouse)), AppEvent::Other);
    }

    #[test]
    fn outcome_is_aborted_until_done() {
        let mut wizard = Wizard::new(&[FieldDescriptor::single_line("Name")]);
        assert_eq!(outcome(&wizard), Outcome::Aborted);
        wizard.commit_current();
        assert_eq!(
            outcome(&wizard),
            Outcome::Completed(vec![Answer {
                prompt: "Name".into(),
                answer: String::new(),
            }])
        );
    }

    #[test]
    fn execute_effect_blurs_and_focuses() {
        let mut wizard = Wizard::new(&[
            FieldDescriptor::single_line("A"),
            FieldDescriptor::single_line("B"),
        ]);
        wizard.commit_current();
        execute_effect(Effect::Blur { field: 0 }, &mut wizard);
        execute_effect(Effect::Focus { field: 1 }, &mut wizard);
        assert!(!wizard.question(0).unwrap().widget().is_focused());
        assert!(wizard.question(1).unwrap().widget().is_focused());
    }
}
