//! Pane GTK4 - VTE-backed terminal panes for GTK4
//!
//! Implements the pane-core [`Emulator`](pane_core::Emulator) and
//! [`PaneChrome`](pane_core::PaneChrome) traits over a `vte4::Terminal` and
//! the title bar, find bar, hold bar and drag overlay around it.
//!
//! ```ignore
//! let settings = Rc::new(SettingsStore::load(&path)?);
//! let pane = pane_gtk4::build_pane(settings, PaneOptions::new().with_id(1));
//! window.set_child(Some(pane.backend().root()));
//! pane.spawn();
//! ```

mod backend;
mod dialogs;
mod dnd;
mod titlebar;
mod widget;

pub use backend::VteBackend;
pub use titlebar::ACTION_GROUP;
pub use widget::build_pane;

// Re-export pane-core types for convenience
pub use pane_core::*;

/// A terminal pane backed by VTE
pub type GtkPane = TerminalPane<VteBackend>;
