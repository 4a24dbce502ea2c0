//! Tracery Application
//!
//! The application shell: window, menus, canvas painting, pointer input
//! and dialogs around the core controller.

mod app;
mod event_handler;
mod file_ops;
mod render;
mod shortcuts;
mod ui;

pub use app::{AppConfig, TraceryApp, run};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{UiAction, UiState};
