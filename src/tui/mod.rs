//! TUI module for the interactive questionnaire.
//!
//! Organized along FP/Unix boundaries:
//! - `field`: text input widgets (pure)
//! - `state`: pure data types (Wizard, Question, AppEvent, Transition)
//! - `update`: pure event dispatch
//! - `view`: pure rendering
//! - `theme`: styling
//! - `run`: effects (terminal, event loop)

pub mod field;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
