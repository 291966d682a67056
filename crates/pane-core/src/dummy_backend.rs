//! Recording backend for testing panes without GTK

use std::cell::{Cell, RefCell};

use crate::config::{CursorBlinkMode, CursorShape, EraseBinding};
use crate::error::{PaneError, PaneResult};
use crate::traits::{ColorSet, Emulator, PaneChrome, SpawnRequest};

/// One recorded backend call
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Spawn(SpawnRequest),
    Feed(String),
    FeedChild(String),
    Paste(String),
    Colors(ColorSet),
    Font(Option<String>),
    Scrollback(i64),
    CursorShape(CursorShape),
    CursorBlink(CursorBlinkMode),
    AudibleBell(bool),
    AllowBold(bool),
    BoldIsBright(bool),
    Rewrap(bool),
    CellScale(f64, f64),
    WordChars(String),
    Backspace(EraseBinding),
    Delete(EraseBinding),
    Encoding(String),
    InputEnabled(bool),
    SearchPattern(Option<String>, bool),
    SearchWrap(bool),
    FindNext,
    FindPrevious,
    Title(String),
    ShowExitStatus(String),
    HideExitStatus,
    ReadOnlyIndicator(bool),
    SyncIndicator(bool),
    OverlayRedraw,
}

/// Backend that records every call and reports configurable emulator state
#[derive(Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    window_title: RefCell<Option<String>>,
    icon_title: RefCell<Option<String>>,
    directory_uri: RefCell<Option<String>>,
    foreground_process: Cell<bool>,
    fail_spawn: Cell<bool>,
    search_active: Cell<bool>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn has_call(&self, call: &Call) -> bool {
        self.calls.borrow().contains(call)
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn spawns(&self) -> Vec<SpawnRequest> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Spawn(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Title(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn fed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Feed(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn fed_to_child(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::FeedChild(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn pasted(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Paste(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_colors(&self) -> Option<ColorSet> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            Call::Colors(set) => Some(set.clone()),
            _ => None,
        })
    }

    pub fn set_window_title(&self, title: &str) {
        *self.window_title.borrow_mut() = Some(title.to_string());
    }

    pub fn set_icon_title(&self, title: &str) {
        *self.icon_title.borrow_mut() = Some(title.to_string());
    }

    pub fn set_directory_uri(&self, uri: &str) {
        *self.directory_uri.borrow_mut() = Some(uri.to_string());
    }

    pub fn set_foreground_process(&self, running: bool) {
        self.foreground_process.set(running);
    }

    pub fn fail_spawn(&self, fail: bool) {
        self.fail_spawn.set(fail);
    }
}

impl Emulator for RecordingBackend {
    fn spawn(&self, request: &SpawnRequest) -> PaneResult<()> {
        if self.fail_spawn.get() {
            let program = request.command.clone().unwrap_or_else(|| request.shell.clone());
            return Err(PaneError::Spawn { program, message: "No such file or directory".to_string() });
        }
        self.record(Call::Spawn(request.clone()));
        Ok(())
    }

    fn feed(&self, text: &str) {
        self.record(Call::Feed(text.to_string()));
    }

    fn feed_child(&self, text: &str) {
        self.record(Call::FeedChild(text.to_string()));
    }

    fn paste_text(&self, text: &str) {
        self.record(Call::Paste(text.to_string()));
    }

    fn has_foreground_process(&self) -> bool {
        self.foreground_process.get()
    }

    fn set_colors(&self, colors: &ColorSet) {
        self.record(Call::Colors(colors.clone()));
    }

    fn set_font(&self, font: Option<&str>) -> PaneResult<()> {
        if let Some(f) = font {
            if f.trim().is_empty() {
                return Err(PaneError::InvalidFont { value: f.to_string() });
            }
        }
        self.record(Call::Font(font.map(str::to_string)));
        Ok(())
    }

    fn set_scrollback_lines(&self, lines: i64) {
        self.record(Call::Scrollback(lines));
    }

    fn set_cursor_shape(&self, shape: CursorShape) {
        self.record(Call::CursorShape(shape));
    }

    fn set_cursor_blink_mode(&self, mode: CursorBlinkMode) {
        self.record(Call::CursorBlink(mode));
    }

    fn set_audible_bell(&self, enabled: bool) {
        self.record(Call::AudibleBell(enabled));
    }

    fn set_allow_bold(&self, enabled: bool) {
        self.record(Call::AllowBold(enabled));
    }

    fn set_bold_is_bright(&self, enabled: bool) {
        self.record(Call::BoldIsBright(enabled));
    }

    fn set_rewrap_on_resize(&self, enabled: bool) {
        self.record(Call::Rewrap(enabled));
    }

    fn set_cell_scale(&self, width: f64, height: f64) {
        self.record(Call::CellScale(width, height));
    }

    fn set_word_char_exceptions(&self, chars: &str) {
        self.record(Call::WordChars(chars.to_string()));
    }

    fn set_backspace_binding(&self, binding: EraseBinding) {
        self.record(Call::Backspace(binding));
    }

    fn set_delete_binding(&self, binding: EraseBinding) {
        self.record(Call::Delete(binding));
    }

    fn set_encoding(&self, encoding: &str) -> PaneResult<()> {
        if !crate::encoding::is_known_encoding(encoding) {
            return Err(PaneError::Encoding {
                encoding: encoding.to_string(),
                message: "conversion not supported".to_string(),
            });
        }
        self.record(Call::Encoding(encoding.to_string()));
        Ok(())
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.record(Call::InputEnabled(enabled));
    }

    fn window_title(&self) -> Option<String> {
        self.window_title.borrow().clone()
    }

    fn icon_title(&self) -> Option<String> {
        self.icon_title.borrow().clone()
    }

    fn current_directory_uri(&self) -> Option<String> {
        self.directory_uri.borrow().clone()
    }

    fn column_count(&self) -> u32 {
        80
    }

    fn row_count(&self) -> u32 {
        24
    }

    fn search_set_pattern(&self, pattern: Option<&str>, case_insensitive: bool) -> PaneResult<()> {
        self.search_active.set(pattern.is_some());
        self.record(Call::SearchPattern(pattern.map(str::to_string), case_insensitive));
        Ok(())
    }

    fn search_set_wrap_around(&self, wrap: bool) {
        self.record(Call::SearchWrap(wrap));
    }

    fn search_find_next(&self) -> bool {
        self.record(Call::FindNext);
        self.search_active.get()
    }

    fn search_find_previous(&self) -> bool {
        self.record(Call::FindPrevious);
        self.search_active.get()
    }
}

impl PaneChrome for RecordingBackend {
    fn set_title(&self, title: &str) {
        self.record(Call::Title(title.to_string()));
    }

    fn show_exit_status(&self, message: &str) {
        self.record(Call::ShowExitStatus(message.to_string()));
    }

    fn hide_exit_status(&self) {
        self.record(Call::HideExitStatus);
    }

    fn set_read_only_indicator(&self, read_only: bool) {
        self.record(Call::ReadOnlyIndicator(read_only));
    }

    fn set_sync_indicator(&self, synchronized: bool) {
        self.record(Call::SyncIndicator(synchronized));
    }

    fn queue_overlay_redraw(&self) {
        self.record(Call::OverlayRedraw);
    }
}
