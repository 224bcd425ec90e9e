//! questionnaire: ask a fixed list of questions in the terminal, one at a time.

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod tui;
pub mod types;
