//! Terminal front end for the fluent-scroll engines
//!
//! A long document driven by the smooth scroll area and a wrap-around time
//! picker, rendered with ratatui and fed by crossterm input.

pub mod app;
pub mod event;
pub mod input;
pub mod keymap;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
