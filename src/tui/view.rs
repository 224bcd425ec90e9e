//! Pure rendering: map Wizard state to a view.
//!
//! Three views, chosen in this order:
//! - Done: one `prompt: answer` line per question
//! - No viewport yet: a loading placeholder
//! - Editing: the prompt above a bordered, padded input box, centred
//!
//! `view()` returns the frame as text by drawing into an off-screen
//! buffer; `render()` draws the same widgets into a live ratatui frame
//! and adds a help footer. Neither mutates the wizard.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::report::format_answers;
use crate::types::{FieldKind, OutputFormat};

use super::state::{Question, Viewport, Wizard};
use super::theme::{self, Styles};

/// Shown until the host reports the terminal size.
pub const LOADING: &str = "loading...";

// ============================================================================
// TEXT VIEW
// ============================================================================

/// The current view as a string.
pub fn view(wizard: &Wizard, styles: &Styles) -> String {
    if wizard.is_done() {
        return summary(wizard);
    }
    let Some(viewport) = wizard.viewport() else {
        return LOADING.to_string();
    };

    let area = viewport_rect(viewport);
    let mut buffer = Buffer::empty(area);
    if let Some(question) = wizard.current() {
        draw_question(question, styles, area, &mut buffer);
    }
    buffer_to_string(&buffer)
}

/// Completed answers in field order. Empty for an empty questionnaire.
fn summary(wizard: &Wizard) -> String {
    wizard
        .answers()
        .map(|answers| format_answers(&answers, OutputFormat::Human))
        .unwrap_or_default()
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut rows = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

// ============================================================================
// TERMINAL VIEW
// ============================================================================

/// Draw the current view into a terminal frame.
pub fn render(wizard: &Wizard, styles: &Styles, frame: &mut Frame) {
    let frame_area = frame.area();

    if wizard.is_done() {
        let area = content_area(frame_area);
        frame.render_widget(render_summary(wizard), area);
        frame.render_widget(render_help(None), help_area(frame_area));
        return;
    }

    let Some(viewport) = wizard.viewport() else {
        frame.render_widget(
            Paragraph::new(Span::styled(LOADING, theme::STYLE_DIM)),
            frame_area,
        );
        return;
    };

    let area = content_area(viewport_rect(viewport).intersection(frame_area));
    if let Some(question) = wizard.current() {
        draw_question(question, styles, area, frame.buffer_mut());
        frame.render_widget(
            render_help(Some(question.widget().kind())),
            help_area(frame_area),
        );
    }
}

fn render_summary(wizard: &Wizard) -> Paragraph<'static> {
    let mut lines = Vec::new();
    for question in wizard.questions() {
        let mut answer_lines = question.answer().split('\n');
        let first = answer_lines.next().unwrap_or_default().to_string();
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", question.prompt()), theme::STYLE_LABEL),
            Span::raw(first),
        ]));
        lines.extend(answer_lines.map(|l| Line::from(l.to_string())));
    }
    Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false })
}

/// Key hints for the current field kind. None = summary screen.
fn render_help(kind: Option<FieldKind>) -> Paragraph<'static> {
    let help_text = match kind {
        Some(FieldKind::SingleLine) => "[Enter] confirm  [Esc] quit",
        Some(FieldKind::MultiLine) => "[Enter] confirm  [Alt+Enter]/[Ctrl+J] new line  [Esc] quit",
        None => "[Esc] quit",
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Everything above the help footer.
fn content_area(area: Rect) -> Rect {
    Rect {
        height: area.height.saturating_sub(1),
        ..area
    }
}

fn help_area(area: Rect) -> Rect {
    Rect {
        y: area.bottom().saturating_sub(1),
        height: area.height.min(1),
        ..area
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn viewport_rect(viewport: Viewport) -> Rect {
    Rect::new(0, 0, viewport.width, viewport.height)
}

/// Prompt line(s) stacked over the bordered input box, centred in `area`.
fn draw_question(question: &Question, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let box_width = styles.width.min(area.width);
    // Keeps both sides of the padding within u16 for the block's own maths.
    let padding = styles.padding.min(area.width.max(area.height) / 2);
    let chrome = frame_chrome(padding);
    let inner_width = box_width.saturating_sub(chrome).max(1);

    let field = Paragraph::new(Text::raw(question.widget().render())).wrap(Wrap { trim: false });
    let prompt = Paragraph::new(Span::styled(question.prompt().to_string(), theme::STYLE_PROMPT))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let text_rows = field
        .line_count(inner_width)
        .max(question.widget().min_rows());
    let box_height = clamp_u16(text_rows).saturating_add(chrome);
    let prompt_height = clamp_u16(prompt.line_count(area.width.max(1)));

    let total_height = prompt_height.saturating_add(box_height).min(area.height);
    let top = area.y + (area.height - total_height) / 2;
    let prompt_height = prompt_height.min(total_height);

    let prompt_rect = Rect::new(area.x, top, area.width, prompt_height);
    prompt.render(prompt_rect, buf);

    let box_rect = Rect::new(
        area.x + (area.width - box_width) / 2,
        top + prompt_height,
        box_width,
        total_height - prompt_height,
    );
    let block = Block::bordered()
        .border_style(styles.border())
        .padding(Padding::uniform(padding));
    field.block(block).render(box_rect, buf);
}

/// Border plus padding on both sides, in cells.
fn frame_chrome(padding: u16) -> u16 {
    padding.saturating_mul(2).saturating_add(2)
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ============================================================================
// TESTS
// ============================================================================
