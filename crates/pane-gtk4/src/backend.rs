//! VTE backend implementing the pane-core traits

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{gdk, gio};
use tracing::{debug, warn};
use vte4::prelude::*;

use pane_core::constants::DEFAULT_ENCODING;
use pane_core::{
    ColorSet, CursorBlinkMode, CursorShape, Emulator, EraseBinding, PaneChrome, PaneError, PaneResult,
    Rgba, SpawnRequest,
};

use crate::titlebar::{StatusBar, TitleBar};

// PCRE2 compile flags accepted by vte4::Regex::for_search
const PCRE2_CASELESS: u32 = 0x0000_0008;
const PCRE2_MULTILINE: u32 = 0x0000_0400;

type SpawnFailureHook = Rc<RefCell<Option<Box<dyn Fn(PaneError)>>>>;

/// A VTE terminal plus the chrome widgets around it
pub struct VteBackend {
    root: gtk4::Box,
    terminal: vte4::Terminal,
    title_bar: TitleBar,
    status_bar: StatusBar,
    drag_area: gtk4::DrawingArea,
    child_pid: Rc<Cell<Option<i32>>>,
    on_spawn_failure: SpawnFailureHook,
}

impl VteBackend {
    pub(crate) fn new(
        root: gtk4::Box,
        terminal: vte4::Terminal,
        title_bar: TitleBar,
        status_bar: StatusBar,
        drag_area: gtk4::DrawingArea,
    ) -> Self {
        Self {
            root,
            terminal,
            title_bar,
            status_bar,
            drag_area,
            child_pid: Rc::new(Cell::new(None)),
            on_spawn_failure: Rc::new(RefCell::new(None)),
        }
    }

    /// Outermost widget of the pane, used by the layout
    pub fn root(&self) -> &gtk4::Box {
        &self.root
    }

    pub fn terminal(&self) -> &vte4::Terminal {
        &self.terminal
    }

    pub(crate) fn title_bar(&self) -> &TitleBar {
        &self.title_bar
    }

    pub(crate) fn status_bar(&self) -> &StatusBar {
        &self.status_bar
    }

    pub(crate) fn drag_area(&self) -> &gtk4::DrawingArea {
        &self.drag_area
    }

    /// Spawning is asynchronous in VTE; late failures are routed here.
    pub(crate) fn set_spawn_failure_hook<F: Fn(PaneError) + 'static>(&self, hook: F) {
        *self.on_spawn_failure.borrow_mut() = Some(Box::new(hook));
    }

    pub(crate) fn forget_child(&self) {
        self.child_pid.set(None);
    }

    fn string_property(&self, name: &str) -> Option<String> {
        self.terminal.find_property(name)?;
        self.terminal
            .property::<Option<String>>(name)
            .filter(|s| !s.is_empty())
    }

    fn set_bool_property(&self, name: &str, value: bool) {
        if self.terminal.find_property(name).is_some() {
            self.terminal.set_property(name, value);
        } else {
            debug!("Terminal has no '{}' property, ignoring", name);
        }
    }
}

/// Convert a spawn request to an argv and the spawn flags it needs.
///
/// Login shells are launched with `FILE_AND_ARGV_ZERO` so argv[0] can carry
/// the leading '-' while the program path stays intact.
pub(crate) fn build_argv(request: &SpawnRequest) -> PaneResult<(Vec<String>, glib::SpawnFlags)> {
    if let Some(command) = &request.command {
        let argv: Vec<String> = glib::shell_parse_argv(command)
            .map_err(|e| PaneError::CommandParse { command: command.clone(), message: e.to_string() })?
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        return Ok((argv, glib::SpawnFlags::SEARCH_PATH));
    }

    if request.login_shell {
        let name = Path::new(&request.shell)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| request.shell.clone());
        Ok((
            vec![request.shell.clone(), format!("-{}", name)],
            glib::SpawnFlags::SEARCH_PATH | glib::SpawnFlags::FILE_AND_ARGV_ZERO,
        ))
    } else {
        Ok((vec![request.shell.clone()], glib::SpawnFlags::SEARCH_PATH))
    }
}

/// Foreground process group of the terminal `pid` is attached to, read
/// from field 8 of `/proc/<pid>/stat`.
pub(crate) fn foreground_group(stat: &str) -> Option<i32> {
    // The command name may contain spaces and parentheses; fields resume after the last ')'
    let rest = &stat[stat.rfind(')')? + 1..];
    rest.split_whitespace().nth(5)?.parse().ok()
}

pub(crate) fn to_gdk(color: Rgba) -> gdk::RGBA {
    gdk::RGBA::new(color.r as f32, color.g as f32, color.b as f32, color.a as f32)
}

fn cursor_shape(shape: CursorShape) -> vte4::CursorShape {
    match shape {
        CursorShape::Block => vte4::CursorShape::Block,
        CursorShape::Ibeam => vte4::CursorShape::Ibeam,
        CursorShape::Underline => vte4::CursorShape::Underline,
    }
}

fn blink_mode(mode: CursorBlinkMode) -> vte4::CursorBlinkMode {
    match mode {
        CursorBlinkMode::System => vte4::CursorBlinkMode::System,
        CursorBlinkMode::On => vte4::CursorBlinkMode::On,
        CursorBlinkMode::Off => vte4::CursorBlinkMode::Off,
    }
}

fn erase_binding(binding: EraseBinding) -> vte4::EraseBinding {
    match binding {
        EraseBinding::Auto => vte4::EraseBinding::Auto,
        EraseBinding::AsciiBackspace => vte4::EraseBinding::AsciiBackspace,
        EraseBinding::AsciiDelete => vte4::EraseBinding::AsciiDelete,
        EraseBinding::DeleteSequence => vte4::EraseBinding::DeleteSequence,
        EraseBinding::Tty => vte4::EraseBinding::Tty,
    }
}

impl Emulator for VteBackend {
    fn spawn(&self, request: &SpawnRequest) -> PaneResult<()> {
        let (argv, flags) = build_argv(request)?;
        let argv_refs: Vec<&str> = argv.iter().map(String::as_str).collect();
        let env: Vec<String> = request.env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let env_refs: Vec<&str> = env.iter().map(String::as_str).collect();
        let directory = request.working_directory.as_deref().and_then(Path::to_str);
        let program = argv.first().cloned().unwrap_or_default();

        let child_pid = Rc::clone(&self.child_pid);
        let on_failure = Rc::clone(&self.on_spawn_failure);
        self.terminal.spawn_async(
            vte4::PtyFlags::DEFAULT,
            directory,
            &argv_refs,
            &env_refs,
            flags,
            || {},
            -1,
            None::<&gio::Cancellable>,
            move |result| match result {
                Ok(pid) => {
                    debug!("Spawned {} as pid {}", program, pid.0);
                    child_pid.set(Some(pid.0));
                }
                Err(e) => {
                    child_pid.set(None);
                    let err = PaneError::Spawn { program, message: e.to_string() };
                    if let Some(hook) = on_failure.borrow().as_ref() {
                        hook(err);
                    } else {
                        warn!("{}", err);
                    }
                }
            },
        );
        Ok(())
    }

    fn feed(&self, text: &str) {
        self.terminal.feed(text.as_bytes());
    }

    fn feed_child(&self, text: &str) {
        self.terminal.feed_child(text.as_bytes());
    }

    fn paste_text(&self, text: &str) {
        self.terminal.paste_text(text);
    }

    fn has_foreground_process(&self) -> bool {
        let Some(pid) = self.child_pid.get() else {
            return false;
        };
        match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => foreground_group(&stat).is_some_and(|group| group > 0 && group != pid),
            Err(e) => {
                debug!("Cannot inspect pid {}: {}", pid, e);
                false
            }
        }
    }

    fn set_colors(&self, colors: &ColorSet) {
        let palette: Vec<gdk::RGBA> = colors.palette.iter().copied().map(to_gdk).collect();
        let palette_refs: Vec<&gdk::RGBA> = palette.iter().collect();
        self.terminal.set_colors(
            Some(&to_gdk(colors.foreground)),
            Some(&to_gdk(colors.background)),
            &palette_refs,
        );

        let (cursor_bg, cursor_fg) = colors.cursor.map(|(b, f)| (to_gdk(b), to_gdk(f))).unzip();
        self.terminal.set_color_cursor(cursor_bg.as_ref());
        self.terminal.set_color_cursor_foreground(cursor_fg.as_ref());

        let (highlight_bg, highlight_fg) = colors.highlight.map(|(b, f)| (to_gdk(b), to_gdk(f))).unzip();
        self.terminal.set_color_highlight(highlight_bg.as_ref());
        self.terminal.set_color_highlight_foreground(highlight_fg.as_ref());

        self.terminal.set_color_bold(colors.bold.map(to_gdk).as_ref());
    }

    fn set_font(&self, font: Option<&str>) -> PaneResult<()> {
        let Some(font) = font else {
            self.terminal.set_font(None);
            return Ok(());
        };
        let desc = pango::FontDescription::from_string(font);
        if desc.family().is_none() {
            return Err(PaneError::InvalidFont { value: font.to_string() });
        }
        self.terminal.set_font(Some(&desc));
        Ok(())
    }

    fn set_scrollback_lines(&self, lines: i64) {
        self.terminal.set_scrollback_lines(lines);
    }

    fn set_cursor_shape(&self, shape: CursorShape) {
        self.terminal.set_cursor_shape(cursor_shape(shape));
    }

    fn set_cursor_blink_mode(&self, mode: CursorBlinkMode) {
        self.terminal.set_cursor_blink_mode(blink_mode(mode));
    }

    fn set_audible_bell(&self, enabled: bool) {
        self.terminal.set_audible_bell(enabled);
    }

    fn set_allow_bold(&self, enabled: bool) {
        // Always on in VTE builds for GTK4
        self.set_bool_property("allow-bold", enabled);
    }

    fn set_bold_is_bright(&self, enabled: bool) {
        self.terminal.set_bold_is_bright(enabled);
    }

    fn set_rewrap_on_resize(&self, enabled: bool) {
        self.set_bool_property("rewrap-on-resize", enabled);
    }

    fn set_cell_scale(&self, width: f64, height: f64) {
        self.terminal.set_cell_width_scale(width);
        self.terminal.set_cell_height_scale(height);
    }

    fn set_word_char_exceptions(&self, chars: &str) {
        self.terminal.set_word_char_exceptions(chars);
    }

    fn set_backspace_binding(&self, binding: EraseBinding) {
        self.terminal.set_backspace_binding(erase_binding(binding));
    }

    fn set_delete_binding(&self, binding: EraseBinding) {
        self.terminal.set_delete_binding(erase_binding(binding));
    }

    fn set_encoding(&self, encoding: &str) -> PaneResult<()> {
        if self.terminal.find_property("encoding").is_some() {
            self.terminal.set_property("encoding", encoding);
            return Ok(());
        }
        if encoding.eq_ignore_ascii_case(DEFAULT_ENCODING) {
            return Ok(());
        }
        Err(PaneError::Encoding {
            encoding: encoding.to_string(),
            message: "this VTE build only supports UTF-8".to_string(),
        })
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.terminal.set_input_enabled(enabled);
    }

    fn window_title(&self) -> Option<String> {
        self.string_property("window-title")
    }

    fn icon_title(&self) -> Option<String> {
        self.string_property("icon-title")
    }

    fn current_directory_uri(&self) -> Option<String> {
        self.string_property("current-directory-uri")
    }

    fn column_count(&self) -> u32 {
        u32::try_from(self.terminal.column_count()).unwrap_or(0)
    }

    fn row_count(&self) -> u32 {
        u32::try_from(self.terminal.row_count()).unwrap_or(0)
    }

    fn search_set_pattern(&self, pattern: Option<&str>, case_insensitive: bool) -> PaneResult<()> {
        let Some(pattern) = pattern else {
            self.terminal.search_set_regex(None, 0);
            return Ok(());
        };
        let mut flags = PCRE2_MULTILINE;
        if case_insensitive {
            flags |= PCRE2_CASELESS;
        }
        let regex = vte4::Regex::for_search(pattern, flags)
            .map_err(|e| PaneError::Search { pattern: pattern.to_string(), message: e.to_string() })?;
        self.terminal.search_set_regex(Some(&regex), 0);
        Ok(())
    }

    fn search_set_wrap_around(&self, wrap: bool) {
        self.terminal.search_set_wrap_around(wrap);
    }

    fn search_find_next(&self) -> bool {
        self.terminal.search_find_next()
    }

    fn search_find_previous(&self) -> bool {
        self.terminal.search_find_previous()
    }
}

impl PaneChrome for VteBackend {
    fn set_title(&self, title: &str) {
        self.title_bar.label.set_text(title);
        self.title_bar.label.set_tooltip_text(Some(title));
    }

    fn show_exit_status(&self, message: &str) {
        self.status_bar.label.set_text(message);
        self.status_bar.revealer.set_reveal_child(true);
    }

    fn hide_exit_status(&self) {
        self.status_bar.revealer.set_reveal_child(false);
    }

    fn set_read_only_indicator(&self, read_only: bool) {
        self.title_bar.read_only_icon.set_visible(read_only);
    }

    fn set_sync_indicator(&self, synchronized: bool) {
        self.title_bar.sync_icon.set_visible(synchronized);
    }

    fn queue_overlay_redraw(&self) {
        self.drag_area.queue_draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(command: Option<&str>, login: bool) -> SpawnRequest {
        SpawnRequest {
            command: command.map(str::to_string),
            shell: "/bin/bash".to_string(),
            login_shell: login,
            working_directory: None,
            env: Vec::new(),
        }
    }

    #[test]
    fn shell_argv() {
        let (argv, flags) = build_argv(&request(None, false)).unwrap();
        assert_eq!(argv, vec!["/bin/bash"]);
        assert!(!flags.contains(glib::SpawnFlags::FILE_AND_ARGV_ZERO));
    }

    #[test]
    fn login_shell_argv_zero() {
        let (argv, flags) = build_argv(&request(None, true)).unwrap();
        assert_eq!(argv, vec!["/bin/bash", "-bash"]);
        assert!(flags.contains(glib::SpawnFlags::FILE_AND_ARGV_ZERO));
    }

    #[test]
    fn custom_command_is_shell_parsed() {
        let (argv, _) = build_argv(&request(Some("htop -d '10 20'"), true)).unwrap();
        assert_eq!(argv, vec!["htop", "-d", "10 20"]);
    }

    #[test]
    fn unbalanced_quotes_fail() {
        let err = build_argv(&request(Some("echo 'oops"), false)).unwrap_err();
        assert!(matches!(err, PaneError::CommandParse { .. }));
    }

    #[test]
    fn stat_foreground_group() {
        let stat = "4242 (bash) S 4200 4242 4242 34817 5001 4194304 0 0";
        assert_eq!(foreground_group(stat), Some(5001));

        let tricky = "77 (my (odd) prog) R 1 77 77 34818 77 0";
        assert_eq!(foreground_group(tricky), Some(77));

        assert_eq!(foreground_group("garbage"), None);
    }

    #[test]
    fn color_conversion() {
        let c = to_gdk(Rgba::rgba(1.0, 0.5, 0.0, 0.25));
        assert_eq!(c.red(), 1.0);
        assert_eq!(c.green(), 0.5);
        assert_eq!(c.alpha(), 0.25);
    }
}
