//! TUI styling: the configurable frame style plus fixed text styles.
//!
//! `Styles` is the one immutable value the renderer is built with. The
//! constants below are the parts users cannot configure.
//!
//! Color semantics:
//! - Border: user-chosen accent (ANSI 36 by default)
//! - Bold: the prompt being asked
//! - Dim: placeholder, help footer, loading text

use ratatui::style::{Color, Modifier, Style};

/// Default border accent: ANSI 256-colour index 36 (teal).
pub const DEFAULT_BORDER_COLOR: Color = Color::Indexed(36);

/// Default inner padding of the input frame, in cells.
pub const DEFAULT_PADDING: u16 = 1;

/// Default total width of the input frame, in cells.
pub const DEFAULT_WIDTH: u16 = 80;

// ============================================================================
// CONFIGURABLE STYLE
// ============================================================================

/// Visual parameters of the input frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    /// Border foreground colour.
    pub border_color: Color,
    /// Padding inside the border on every side.
    pub padding: u16,
    /// Total frame width including border and padding.
    pub width: u16,
}

impl Default for Styles {
    fn default() -> Self {
        Styles {
            border_color: DEFAULT_BORDER_COLOR,
            padding: DEFAULT_PADDING,
            width: DEFAULT_WIDTH,
        }
    }
}

impl Styles {
    pub fn border(&self) -> Style {
        Style::new().fg(self.border_color)
    }
}

// ============================================================================
// TEXT STYLES
// ============================================================================

/// The question being asked.
pub const STYLE_PROMPT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Loading placeholder before the first resize.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Summary prompt label.
pub const STYLE_LABEL: Style = Style::new().fg(Color::Cyan);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_match_classic_look() {
        let styles = Styles::default();
        assert_eq!(styles.border_color, Color::Indexed(36));
        assert_eq!(styles.padding, 1);
        assert_eq!(styles.width, 80);
    }

    #[test]
    fn border_style_uses_configured_colour() {
        let styles = Styles {
            border_color: Color::Magenta,
            ..Styles::default()
        };
        assert_eq!(styles.border().fg, Some(Color::Magenta));
    }

    #[test]
    fn prompt_style_is_bold() {
        assert!(STYLE_PROMPT.add_modifier.contains(Modifier::BOLD));
    }
}
