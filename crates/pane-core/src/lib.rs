//! Pane Core - GTK-agnostic terminal pane logic
//!
//! This crate holds everything a terminal pane does that does not need a
//! display: drop quadrant geometry, the preference dispatch table, title
//! templates, the paste guard, child exit handling and the notification
//! lists consumed by the owning session. Toolkit backends implement the
//! [`Emulator`] and [`PaneChrome`] traits.

pub mod color;
pub mod config;
pub mod constants;
pub mod delegate;
pub mod drag;
pub mod dummy_backend;
pub mod encoding;
pub mod error;
pub mod exit;
pub mod pane;
pub mod paste;
pub mod preferences;
pub mod quadrant;
pub mod registry;
pub mod search;
pub mod settings;
pub mod signals;
pub mod title;
pub mod traits;

// Re-export main types
pub use color::Rgba;
pub use config::{
    AppSettings, CommandLineOverrides, CursorBlinkMode, CursorShape, EraseBinding, ExitAction, Profile,
};
pub use delegate::{Delegate, SubscriptionId};
pub use drag::{DragState, DropPayload};
pub use error::{PaneError, PaneResult};
pub use exit::ExitStatus;
pub use pane::{PaneOptions, PasteOutcome, TerminalPane};
pub use preferences::PreferenceKey;
pub use quadrant::{resolve_quadrant, Orientation, Quadrant, Rect};
pub use registry::PaneRegistry;
pub use search::SearchOptions;
pub use settings::{SettingsChange, SettingsStore};
pub use signals::{DetachRequest, MoveRequest, PaneSignals, SplitRequest, SyncInput, TitleChanged};
pub use title::{format_title, TitleInputs};

// Re-export traits and types
pub use traits::*;
