//! hugopane - GTK4 terminal panes with drag-and-drop splitting
//!
//! This crate ties the workspace together:
//! - [`pane_core`]: toolkit-agnostic pane logic
//! - [`pane_gtk4`]: the VTE-backed GTK4 pane
//! - a session host that lays panes out in split containers

pub mod cli;
pub mod logging;
pub mod session;
pub mod style;

pub use pane_core;
pub use pane_gtk4;

// Re-export main types for convenience
pub use cli::Cli;
pub use pane_core::{
    AppSettings, CommandLineOverrides, PaneError, PaneOptions, PaneRegistry, Profile, SettingsStore, TerminalPane,
};
pub use pane_gtk4::{build_pane, GtkPane, VteBackend};
pub use session::Session;
