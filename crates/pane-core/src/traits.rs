use std::path::PathBuf;

use crate::color::Rgba;
use crate::config::{CursorBlinkMode, CursorShape, EraseBinding};
use crate::error::PaneResult;

/// Everything a child process is launched with
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    /// Raw command line; `None` launches the user's shell
    pub command: Option<String>,
    /// Shell used when `command` is `None`
    pub shell: String,
    /// Prefix argv[0] with '-' so the shell acts as a login shell
    pub login_shell: bool,
    pub working_directory: Option<PathBuf>,
    /// Extra `KEY=value` entries on top of the inherited environment
    pub env: Vec<(String, String)>,
}

/// Complete color set derived from a profile
#[derive(Clone, Debug, PartialEq)]
pub struct ColorSet {
    pub foreground: Rgba,
    pub background: Rgba,
    pub palette: Vec<Rgba>,
    pub cursor: Option<(Rgba, Rgba)>,
    pub highlight: Option<(Rgba, Rgba)>,
    pub bold: Option<Rgba>,
}

/// The wrapped terminal-emulation widget.
///
/// Methods take `&self`: toolkit widgets are reference-counted handles with
/// interior mutability and are only touched from the UI thread.
pub trait Emulator {
    // Process
    fn spawn(&self, request: &SpawnRequest) -> PaneResult<()>;
    /// Text shown in the terminal display, not sent to the child
    fn feed(&self, text: &str);
    /// Text sent to the child as if typed
    fn feed_child(&self, text: &str);
    /// Text sent to the child as a paste (bracketed if the child asked for it)
    fn paste_text(&self, text: &str);
    fn has_foreground_process(&self) -> bool;

    // Appearance
    fn set_colors(&self, colors: &ColorSet);
    fn set_font(&self, font: Option<&str>) -> PaneResult<()>;
    fn set_scrollback_lines(&self, lines: i64);
    fn set_cursor_shape(&self, shape: CursorShape);
    fn set_cursor_blink_mode(&self, mode: CursorBlinkMode);
    fn set_audible_bell(&self, enabled: bool);
    fn set_allow_bold(&self, enabled: bool);
    fn set_bold_is_bright(&self, enabled: bool);
    fn set_rewrap_on_resize(&self, enabled: bool);
    fn set_cell_scale(&self, width: f64, height: f64);
    fn set_word_char_exceptions(&self, chars: &str);

    // Keyboard
    fn set_backspace_binding(&self, binding: EraseBinding);
    fn set_delete_binding(&self, binding: EraseBinding);
    fn set_encoding(&self, encoding: &str) -> PaneResult<()>;
    fn set_input_enabled(&self, enabled: bool);

    // State reported by the emulator
    fn window_title(&self) -> Option<String>;
    fn icon_title(&self) -> Option<String>;
    fn current_directory_uri(&self) -> Option<String>;
    fn column_count(&self) -> u32;
    fn row_count(&self) -> u32;

    // Search
    fn search_set_pattern(&self, pattern: Option<&str>, case_insensitive: bool) -> PaneResult<()>;
    fn search_set_wrap_around(&self, wrap: bool);
    fn search_find_next(&self) -> bool;
    fn search_find_previous(&self) -> bool;
}

/// Widgets around the emulator: title bar, status bar and drop overlay
pub trait PaneChrome {
    fn set_title(&self, title: &str);
    /// Show the exit status bar with a relaunch action
    fn show_exit_status(&self, message: &str);
    fn hide_exit_status(&self);
    fn set_read_only_indicator(&self, read_only: bool);
    fn set_sync_indicator(&self, synchronized: bool);
    /// Drag state changed; overlay needs repainting
    fn queue_overlay_redraw(&self);
}

/// Full backend a pane runs on
pub trait PaneBackend: Emulator + PaneChrome {}

impl<T: Emulator + PaneChrome> PaneBackend for T {}
