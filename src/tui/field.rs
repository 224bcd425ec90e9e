//! Editable text controls: the single-line and multi-line answer fields.
//!
//! A closed set of two variants behind one enum. Both share the same
//! character-indexed edit buffer; they differ only in how they treat
//! line breaks and vertical motion.
//!
//! Widgets are pure state machines over [`AppEvent`]s. They never draw
//! or touch the terminal; `render()` produces plain text that the view
//! layer places inside its frame.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{FieldDescriptor, FieldKind};

use super::state::{AppEvent, Effect};

/// Placeholder shown in an empty field unless the descriptor overrides it.
pub const DEFAULT_PLACEHOLDER: &str = "Your answer here";

/// Marker inserted at the cursor position by `render()`.
pub const CURSOR_MARKER: char = '█';

/// Rows a multi-line field occupies on screen even when nearly empty.
pub const MULTI_LINE_MIN_ROWS: usize = 6;

// ============================================================================
// WIDGET
// ============================================================================

/// A single editable text control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWidget {
    SingleLine(SingleLineField),
    MultiLine(MultiLineField),
}

/// One line of text. Line-break input is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleLineField {
    buffer: TextBuffer,
    placeholder: String,
    focused: bool,
}

/// Free text. Line-break input splits the current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineField {
    buffer: TextBuffer,
    placeholder: String,
    focused: bool,
}

impl FieldWidget {
    /// Build the widget a descriptor asks for. Starts empty and unfocused.
    pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
        let placeholder = descriptor
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
        match descriptor.kind {
            FieldKind::SingleLine => FieldWidget::SingleLine(SingleLineField {
                buffer: TextBuffer::default(),
                placeholder,
                focused: false,
            }),
            FieldKind::MultiLine => FieldWidget::MultiLine(MultiLineField {
                buffer: TextBuffer::default(),
                placeholder,
                focused: false,
            }),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldWidget::SingleLine(_) => FieldKind::SingleLine,
            FieldWidget::MultiLine(_) => FieldKind::MultiLine,
        }
    }

    /// Current buffer contents. Empty for an untouched field.
    pub fn value(&self) -> &str {
        &self.buffer().text
    }

    /// Cursor position as a character index into `value()`.
    pub fn cursor(&self) -> usize {
        self.buffer().cursor
    }

    pub fn is_focused(&self) -> bool {
        match self {
            FieldWidget::SingleLine(f) => f.focused,
            FieldWidget::MultiLine(f) => f.focused,
        }
    }

    pub fn focus(&mut self) {
        *self.focused_mut() = true;
    }

    /// Idempotent; fine to call on a widget that was never focused.
    pub fn blur(&mut self) {
        *self.focused_mut() = false;
    }

    /// Apply one input event to the buffer.
    ///
    /// Unfocused widgets and unrecognised events are no-ops. No editing
    /// operation currently needs a follow-up effect, so this returns
    /// `None`; the slot exists for the dispatcher to collect.
    pub fn handle_input(&mut self, event: &AppEvent) -> Option<Effect> {
        if !self.is_focused() {
            return None;
        }
        let op = edit_op(event)?;

        match self {
            FieldWidget::SingleLine(f) => f.apply(op),
            FieldWidget::MultiLine(f) => f.apply(op),
        }
        None
    }

    /// Text with the cursor marker, or the placeholder when empty.
    ///
    /// Focus does not change the output: only the wizard decides which
    /// field is on screen.
    pub fn render(&self) -> String {
        let placeholder = match self {
            FieldWidget::SingleLine(f) => &f.placeholder,
            FieldWidget::MultiLine(f) => &f.placeholder,
        };
        self.buffer().render(placeholder)
    }

    /// Minimum number of text rows the view should reserve.
    pub fn min_rows(&self) -> usize {
        match self {
            FieldWidget::SingleLine(_) => 1,
            FieldWidget::MultiLine(f) => f.buffer.line_count().max(MULTI_LINE_MIN_ROWS),
        }
    }

    fn buffer(&self) -> &TextBuffer {
        match self {
            FieldWidget::SingleLine(f) => &f.buffer,
            FieldWidget::MultiLine(f) => &f.buffer,
        }
    }

    fn focused_mut(&mut self) -> &mut bool {
        match self {
            FieldWidget::SingleLine(f) => &mut f.focused,
            FieldWidget::MultiLine(f) => &mut f.focused,
        }
    }
}

impl SingleLineField {
    fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) if is_line_break(c) => {}
            EditOp::Insert(c) => self.buffer.insert_char(c),
            EditOp::InsertText(text) => {
                let flat: String = text.chars().filter(|c| !is_line_break(*c)).collect();
                self.buffer.insert_str(&flat);
            }
            EditOp::NewLine | EditOp::Up | EditOp::Down => {}
            other => self.buffer.apply_common(other),
        }
    }
}

impl MultiLineField {
    fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert('\r') => {}
            EditOp::Insert(c) => self.buffer.insert_char(c),
            EditOp::InsertText(text) => {
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(&normalized);
            }
            EditOp::NewLine => self.buffer.insert_char('\n'),
            EditOp::Up => self.buffer.move_up(),
            EditOp::Down => self.buffer.move_down(),
            other => self.buffer.apply_common(other),
        }
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Editing operation, decoupled from the raw event that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EditOp {
    Insert(char),
    InsertText(String),
    NewLine,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    ClearToLineStart,
    DeleteWordLeft,
}

/// Map a raw event to an editing operation. None = ignore.
///
/// Plain Enter never reaches a widget (the dispatcher treats it as
/// confirm), so line breaks come from Shift/Alt+Enter, Ctrl+J or paste.
fn edit_op(event: &AppEvent) -> Option<EditOp> {
    match event {
        AppEvent::Key(key) => key_op(key),
        AppEvent::Paste(text) => Some(EditOp::InsertText(text.clone())),
        AppEvent::Resize { .. } | AppEvent::Other => None,
    }
}

fn key_op(key: &KeyEvent) -> Option<EditOp> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter if shift || alt => Some(EditOp::NewLine),
        KeyCode::Char('j') if ctrl => Some(EditOp::NewLine),
        KeyCode::Char('u') if ctrl => Some(EditOp::ClearToLineStart),
        KeyCode::Char('w') if ctrl => Some(EditOp::DeleteWordLeft),
        KeyCode::Char(c) if !ctrl && !alt => Some(EditOp::Insert(c)),
        KeyCode::Backspace => Some(EditOp::Backspace),
        KeyCode::Delete => Some(EditOp::Delete),
        KeyCode::Left => Some(EditOp::Left),
        KeyCode::Right => Some(EditOp::Right),
        KeyCode::Home => Some(EditOp::Home),
        KeyCode::End => Some(EditOp::End),
        KeyCode::Up => Some(EditOp::Up),
        KeyCode::Down => Some(EditOp::Down),
        _ => None,
    }
}

// ============================================================================
// EDIT BUFFER
// ============================================================================

/// Text plus a cursor counted in characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    fn apply_common(&mut self, op: EditOp) {
        match op {
            EditOp::Backspace => self.backspace(),
            EditOp::Delete => self.delete(),
            EditOp::Left => self.cursor = self.cursor.saturating_sub(1),
            EditOp::Right => self.cursor = (self.cursor + 1).min(self.len()),
            EditOp::Home => self.cursor = self.line_start(self.cursor),
            EditOp::End => self.cursor = self.line_end(self.cursor),
            EditOp::ClearToLineStart => {
                let start = self.line_start(self.cursor);
                self.drain(start, self.cursor);
            }
            EditOp::DeleteWordLeft => {
                let start = self.word_start(self.cursor);
                self.drain(start, self.cursor);
            }
            // Variant-specific ops are handled by the owning field.
            EditOp::Insert(_)
            | EditOp::InsertText(_)
            | EditOp::NewLine
            | EditOp::Up
            | EditOp::Down => {}
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.drain(self.cursor - 1, self.cursor);
    }

    fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    /// Remove chars in `start..end` and park the cursor at `start`.
    fn drain(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(end);
        self.text.replace_range(from..to, "");
        self.cursor = start;
    }

    fn line_start(&self, pos: usize) -> usize {
        let chars = self.chars();
        let mut start = pos.min(chars.len());
        while start > 0 && chars[start - 1] != '\n' {
            start -= 1;
        }
        start
    }

    fn line_end(&self, pos: usize) -> usize {
        let chars = self.chars();
        let mut end = pos.min(chars.len());
        while end < chars.len() && chars[end] != '\n' {
            end += 1;
        }
        end
    }

    fn word_start(&self, pos: usize) -> usize {
        let chars = self.chars();
        let mut start = pos.min(chars.len());
        while start > 0 && chars[start - 1].is_whitespace() && chars[start - 1] != '\n' {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        start
    }

    fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return;
        }
        let column = self.cursor - start;
        let prev_end = start - 1;
        let prev_start = self.line_start(prev_end);
        self.cursor = (prev_start + column).min(prev_end);
    }

    fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end >= self.len() {
            return;
        }
        let column = self.cursor - self.line_start(self.cursor);
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = (next_start + column).min(next_end);
    }

    fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn render(&self, placeholder: &str) -> String {
        if self.text.is_empty() {
            return format!("{CURSOR_MARKER}{placeholder}");
        }
        let mut out = String::with_capacity(self.text.len() + CURSOR_MARKER.len_utf8());
        let at = self.byte_index(self.cursor);
        out.push_str(&self.text[..at]);
        out.push(CURSOR_MARKER);
        out.push_str(&self.text[at..]);
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn shift_enter() -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT))
    }

    fn focused(descriptor: FieldDescriptor) -> FieldWidget {
        let mut w = FieldWidget::from_descriptor(&descriptor);
        w.focus();
        w
    }

    fn type_str(w: &mut FieldWidget, s: &str) {
        for c in s.chars() {
            let event = if c == '\n' { shift_enter() } else { key(KeyCode::Char(c)) };
            w.handle_input(&event);
        }
    }

    // -- Construction --

    #[test]
    fn new_widget_is_empty_and_unfocused() {
        let w = FieldWidget::from_descriptor(&FieldDescriptor::single_line("Name"));
        assert_eq!(w.value(), "");
        assert!(!w.is_focused());
        assert_eq!(w.kind(), FieldKind::SingleLine);
    }

    #[test]
    fn descriptor_kind_selects_variant() {
        let w = FieldWidget::from_descriptor(&FieldDescriptor::multi_line("Bio"));
        assert!(matches!(w, FieldWidget::MultiLine(_)));
    }

    // -- Focus --

    #[test]
    fn blur_is_idempotent_and_safe_when_never_focused() {
        let mut w = FieldWidget::from_descriptor(&FieldDescriptor::single_line("Name"));
        w.blur();
        w.blur();
        assert!(!w.is_focused());
        w.focus();
        w.blur();
        w.blur();
        assert!(!w.is_focused());
    }

    #[test]
    fn unfocused_widget_ignores_input() {
        let mut w = FieldWidget::from_descriptor(&FieldDescriptor::single_line("Name"));
        w.handle_input(&key(KeyCode::Char('x')));
        assert_eq!(w.value(), "");
    }

    // -- Typing --

    #[test]
    fn typed_characters_accumulate() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Ada");
        assert_eq!(w.value(), "Ada");
        assert_eq!(w.cursor(), 3);
    }

    #[test]
    fn backspace_and_delete_remove_characters() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Adax");
        w.handle_input(&key(KeyCode::Backspace));
        assert_eq!(w.value(), "Ada");

        w.handle_input(&key(KeyCode::Home));
        w.handle_input(&key(KeyCode::Delete));
        assert_eq!(w.value(), "da");
        assert_eq!(w.cursor(), 0);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        w.handle_input(&key(KeyCode::Backspace));
        assert_eq!(w.value(), "");
        assert_eq!(w.cursor(), 0);
    }

    #[test]
    fn insert_in_the_middle_after_moving_left() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Aa");
        w.handle_input(&key(KeyCode::Left));
        type_str(&mut w, "d");
        assert_eq!(w.value(), "Ada");
    }

    #[test]
    fn multibyte_characters_edit_by_char() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "héé");
        w.handle_input(&key(KeyCode::Left));
        w.handle_input(&key(KeyCode::Backspace));
        assert_eq!(w.value(), "hé");
        assert_eq!(w.cursor(), 1);
    }

    #[test]
    fn cursor_motion_clamps_at_both_ends() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "ab");
        w.handle_input(&key(KeyCode::Right));
        assert_eq!(w.cursor(), 2);
        w.handle_input(&key(KeyCode::Home));
        w.handle_input(&key(KeyCode::Left));
        assert_eq!(w.cursor(), 0);
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Ada Lovelace");
        w.handle_input(&ctrl('w'));
        assert_eq!(w.value(), "Ada ");
    }

    #[test]
    fn ctrl_u_clears_to_line_start() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        type_str(&mut w, "keep\ndrop me");
        w.handle_input(&ctrl('u'));
        assert_eq!(w.value(), "keep\n");
    }

    #[test]
    fn other_control_chords_are_ignored() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        w.handle_input(&ctrl('x'));
        w.handle_input(&key(KeyCode::F(5)));
        w.handle_input(&AppEvent::Other);
        w.handle_input(&AppEvent::Resize { width: 10, height: 10 });
        assert_eq!(w.value(), "");
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        w.handle_input(&AppEvent::Key(release));
        assert_eq!(w.value(), "");
    }

    #[test]
    fn handle_input_emits_no_effect() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        assert_eq!(w.handle_input(&key(KeyCode::Char('a'))), None);
    }

    // -- Line breaks --

    #[test]
    fn single_line_rejects_line_breaks() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Line1\nLine2");
        w.handle_input(&ctrl('j'));
        assert_eq!(w.value(), "Line1Line2");
    }

    #[test]
    fn single_line_strips_line_breaks_from_paste() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        w.handle_input(&AppEvent::Paste("a\r\nb\nc".into()));
        assert_eq!(w.value(), "abc");
    }

    #[test]
    fn multi_line_accepts_line_breaks() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        type_str(&mut w, "Line1\nLine2");
        assert_eq!(w.value(), "Line1\nLine2");
        w.handle_input(&ctrl('j'));
        assert_eq!(w.value(), "Line1\nLine2\n");
    }

    #[test]
    fn alt_enter_is_a_line_break_without_keyboard_enhancement() {
        let alt_enter = AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        let mut multi = focused(FieldDescriptor::multi_line("Bio"));
        type_str(&mut multi, "a");
        multi.handle_input(&alt_enter);
        type_str(&mut multi, "b");
        assert_eq!(multi.value(), "a\nb");

        let mut single = focused(FieldDescriptor::single_line("Name"));
        single.handle_input(&alt_enter);
        assert_eq!(single.value(), "");
    }

    #[test]
    fn multi_line_normalizes_pasted_line_endings() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        w.handle_input(&AppEvent::Paste("a\r\nb\rc".into()));
        assert_eq!(w.value(), "a\nb\nc");
    }

    #[test]
    fn up_and_down_keep_column_and_clamp_to_line() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        type_str(&mut w, "abcdef\nxy");
        // cursor at end of "xy" (column 2)
        w.handle_input(&key(KeyCode::Up));
        assert_eq!(w.cursor(), 2);
        w.handle_input(&key(KeyCode::End));
        w.handle_input(&key(KeyCode::Down));
        // column 6 clamps to end of "xy"
        assert_eq!(w.cursor(), 9);
        w.handle_input(&key(KeyCode::Down));
        assert_eq!(w.cursor(), 9);
    }

    #[test]
    fn up_on_first_line_is_noop() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        type_str(&mut w, "abc");
        w.handle_input(&key(KeyCode::Up));
        assert_eq!(w.cursor(), 3);
    }

    // -- Rendering --

    #[test]
    fn empty_field_renders_placeholder() {
        let w = FieldWidget::from_descriptor(&FieldDescriptor::single_line("Name"));
        assert_eq!(w.render(), format!("{CURSOR_MARKER}{DEFAULT_PLACEHOLDER}"));
    }

    #[test]
    fn custom_placeholder_is_used() {
        let mut d = FieldDescriptor::single_line("Name");
        d.placeholder = Some("e.g. Ada".into());
        let w = FieldWidget::from_descriptor(&d);
        assert!(w.render().ends_with("e.g. Ada"));
    }

    #[test]
    fn render_places_cursor_marker() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Ada");
        w.handle_input(&key(KeyCode::Left));
        assert_eq!(w.render(), format!("Ad{CURSOR_MARKER}a"));
    }

    #[test]
    fn render_is_identical_focused_or_not() {
        let mut w = focused(FieldDescriptor::single_line("Name"));
        type_str(&mut w, "Ada");
        let focused_view = w.render();
        w.blur();
        assert_eq!(w.render(), focused_view);
    }

    #[test]
    fn multi_line_reserves_minimum_rows() {
        let mut w = focused(FieldDescriptor::multi_line("Bio"));
        assert_eq!(w.min_rows(), MULTI_LINE_MIN_ROWS);
        type_str(&mut w, "1\n2\n3\n4\n5\n6\n7");
        assert_eq!(w.min_rows(), 7);

        let single = FieldWidget::from_descriptor(&FieldDescriptor::single_line("Name"));
        assert_eq!(single.min_rows(), 1);
    }
}
