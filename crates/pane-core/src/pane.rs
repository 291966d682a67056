//! Toolkit-agnostic terminal pane
//!
//! A [`TerminalPane`] owns its backend (emulator + chrome widgets) and turns
//! toolkit events into widget mutations and notifications for the owning
//! session. It lives on the UI thread behind an `Rc`; all state uses interior
//! mutability.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{CommandLineOverrides, ExitAction, Profile};
use crate::constants::{FALLBACK_SHELL, MSG_SPAWN_FAILED, TERMINAL_ID_ENV};
use crate::delegate::SubscriptionId;
use crate::drag::{DragState, DropPayload};
use crate::error::PaneError;
use crate::exit::ExitStatus;
use crate::paste::{self, PasteDecision};
use crate::preferences::default_color_set;
use crate::quadrant::{resolve_quadrant, Orientation};
use crate::search::SearchOptions;
use crate::settings::{SettingsChange, SettingsStore};
use crate::signals::{DetachRequest, MoveRequest, PaneSignals, SplitRequest, SyncInput, TitleChanged};
use crate::title::{directory_from_uri, format_title, TitleInputs};
use crate::traits::{ColorSet, PaneBackend, SpawnRequest};

/// Construction options for a pane
#[derive(Clone, Debug, Default)]
pub struct PaneOptions {
    pub id: u32,
    pub profile: Option<Uuid>,
    pub working_directory: Option<PathBuf>,
    pub overrides: CommandLineOverrides,
}

impl PaneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn with_profile(mut self, profile: Uuid) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_overrides(mut self, overrides: CommandLineOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Result of a paste request
#[derive(Clone, Debug, PartialEq)]
pub enum PasteOutcome {
    Pasted,
    /// The UI must ask before calling [`TerminalPane::confirm_unsafe_paste`]
    NeedsConfirmation(String),
    /// Read-only or closed pane
    Blocked,
}

type DetachPolicy = Box<dyn Fn(&Uuid) -> bool>;

pub struct TerminalPane<B: PaneBackend> {
    uuid: Uuid,
    id: Cell<u32>,
    backend: B,
    settings: Rc<SettingsStore>,
    signals: PaneSignals,

    profile_id: Cell<Uuid>,
    settings_subscription: Cell<Option<SubscriptionId>>,
    title_override: RefCell<Option<String>>,
    encoding_override: RefCell<Option<String>>,
    last_title: RefCell<String>,
    pub(crate) applied_colors: RefCell<ColorSet>,

    synchronized: Cell<bool>,
    relaying_sync: Cell<bool>,
    read_only: Cell<bool>,
    unsafe_paste_ignored: Cell<bool>,
    drag: Cell<DragState>,
    detach_policy: RefCell<Option<DetachPolicy>>,

    initial_working_directory: RefCell<Option<PathBuf>>,
    overrides: RefCell<Option<CommandLineOverrides>>,
    closed: Cell<bool>,
}

impl<B: PaneBackend + 'static> TerminalPane<B> {
    /// Create a pane and subscribe it to settings changes.
    ///
    /// Preferences are not applied and nothing is spawned yet; call
    /// [`TerminalPane::apply_preferences_all`] and [`TerminalPane::spawn`]
    /// once the widgets are realized.
    pub fn new(backend: B, settings: Rc<SettingsStore>, options: PaneOptions) -> Rc<Self> {
        let profile = options
            .overrides
            .profile_name
            .as_deref()
            .and_then(|name| {
                let found = settings.profile_by_name(name);
                if found.is_none() {
                    warn!("Profile '{}' given on the command line does not exist", name);
                }
                found
            })
            .map(|p| p.id)
            .or(options.profile)
            .unwrap_or_else(|| settings.default_profile().id);

        let overrides = (!options.overrides.is_empty()).then_some(options.overrides);

        let pane = Rc::new(Self {
            uuid: Uuid::new_v4(),
            id: Cell::new(options.id),
            backend,
            settings,
            signals: PaneSignals::new(),
            profile_id: Cell::new(profile),
            settings_subscription: Cell::new(None),
            title_override: RefCell::new(None),
            encoding_override: RefCell::new(None),
            last_title: RefCell::new(String::new()),
            applied_colors: RefCell::new(default_color_set()),
            synchronized: Cell::new(false),
            relaying_sync: Cell::new(false),
            read_only: Cell::new(false),
            unsafe_paste_ignored: Cell::new(false),
            drag: Cell::new(DragState::default()),
            detach_policy: RefCell::new(None),
            initial_working_directory: RefCell::new(options.working_directory),
            overrides: RefCell::new(overrides),
            closed: Cell::new(false),
        });
        pane.subscribe_settings();
        debug!("Created pane {} with profile {}", pane.uuid, profile);
        pane
    }

    fn subscribe_settings(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let id = self.settings.subscribe(move |change: &SettingsChange| {
            if let Some(pane) = weak.upgrade() {
                pane.on_settings_changed(change);
            }
        });
        self.settings_subscription.set(Some(id));
    }

    /// Switch to another profile and re-apply every preference
    pub fn set_profile(&self, profile: Uuid) {
        if self.settings.profile(&profile).is_none() {
            warn!("Ignoring switch to unknown profile {}", profile);
            return;
        }
        self.profile_id.set(profile);
        info!("Pane {} switched to profile {}", self.uuid, profile);
        self.apply_preferences_all();
    }
}

impl<B: PaneBackend> TerminalPane<B> {
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn id(&self) -> u32 {
        self.id.get()
    }

    /// Reassign the session-scoped id; the title is refreshed every time.
    pub fn set_id(&self, id: u32) {
        self.id.set(id);
        self.update_title();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn signals(&self) -> &PaneSignals {
        &self.signals
    }

    pub fn settings(&self) -> &Rc<SettingsStore> {
        &self.settings
    }

    pub fn profile_id(&self) -> Uuid {
        self.profile_id.get()
    }

    /// Current profile; falls back to the store's default if it was removed
    pub fn profile(&self) -> Profile {
        self.settings
            .profile(&self.profile_id.get())
            .unwrap_or_else(|| self.settings.default_profile())
    }

    pub(crate) fn on_settings_changed(&self, change: &SettingsChange) {
        match change.profile {
            Some(profile) if profile == self.profile_id.get() => self.apply_preference(change.key),
            Some(_) => {}
            // Application-wide keys are read when used
            None => debug!("Application setting {} changed", change.key),
        }
    }

    // Title

    pub fn title_override(&self) -> Option<String> {
        self.title_override.borrow().clone()
    }

    /// Replace the profile's title template for this pane; `None` restores it
    pub fn set_title_override(&self, template: Option<String>) {
        *self.title_override.borrow_mut() = template.filter(|t| !t.is_empty());
        self.update_title();
    }

    pub fn current_directory(&self) -> String {
        directory_from_uri(self.backend.current_directory_uri().as_deref())
    }

    pub fn title_inputs(&self) -> TitleInputs {
        TitleInputs {
            title: self.backend.window_title().unwrap_or_default(),
            icon_title: self.backend.icon_title().unwrap_or_default(),
            id: self.id.get(),
            directory: self.current_directory(),
            columns: self.backend.column_count(),
            rows: self.backend.row_count(),
        }
    }

    /// Template in effect: the pane's override, then the profile's, then the
    /// application default when the profile leaves it blank.
    pub fn title_template(&self) -> String {
        if let Some(template) = self.title_override.borrow().clone() {
            return template;
        }
        let template = self.profile().terminal_title;
        if template.trim().is_empty() {
            self.settings.app().default_title_template
        } else {
            template
        }
    }

    /// Recompute the title and push it to the title bar.
    ///
    /// `title_changed` fires only when the text differs from the last one.
    pub fn update_title(&self) -> String {
        let template = self.title_template();
        let title = format_title(&template, &self.title_inputs());
        self.backend.set_title(&title);
        let changed = *self.last_title.borrow() != title;
        if changed {
            *self.last_title.borrow_mut() = title.clone();
            self.signals.title_changed.emit(&TitleChanged { pane: self.uuid, title: title.clone() });
        }
        title
    }

    pub fn title(&self) -> String {
        self.last_title.borrow().clone()
    }

    // Encoding

    pub fn encoding(&self) -> String {
        self.encoding_override
            .borrow()
            .clone()
            .unwrap_or_else(|| self.profile().encoding)
    }

    /// Encoding chosen from the pane menu; `None` goes back to the profile's
    pub fn set_encoding(&self, encoding: Option<&str>) {
        *self.encoding_override.borrow_mut() = encoding.map(str::to_string);
        self.apply_encoding();
    }

    // Modes

    pub fn is_read_only(&self) -> bool {
        self.read_only.get()
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
        self.backend.set_input_enabled(!read_only);
        self.backend.set_read_only_indicator(read_only);
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized.get()
    }

    pub fn set_synchronized(&self, synchronized: bool) {
        self.synchronized.set(synchronized);
        self.backend.set_sync_indicator(synchronized);
    }

    // Process lifecycle

    pub fn initial_working_directory(&self) -> Option<PathBuf> {
        self.initial_working_directory.borrow().clone()
    }

    fn user_shell() -> String {
        std::env::var("SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_SHELL.to_string())
    }

    /// Build the spawn request; command-line overrides are consumed here.
    pub(crate) fn spawn_request(&self) -> SpawnRequest {
        let profile = self.profile();
        let overrides = self.overrides.borrow_mut().take().unwrap_or_default();

        if let Some(dir) = overrides.working_directory {
            *self.initial_working_directory.borrow_mut() = Some(dir);
        }
        let command = overrides.command.or_else(|| {
            (profile.use_custom_command && !profile.custom_command.trim().is_empty())
                .then(|| profile.custom_command.clone())
        });

        SpawnRequest {
            command,
            shell: Self::user_shell(),
            login_shell: profile.login_shell,
            working_directory: self.initial_working_directory(),
            env: vec![(TERMINAL_ID_ENV.to_string(), self.uuid.to_string())],
        }
    }

    /// Launch the child process in the initial working directory.
    ///
    /// Failures are written into the terminal and logged; there is no retry.
    pub fn spawn(&self) -> bool {
        let request = self.spawn_request();
        info!(
            "Pane {} spawning {} in {:?}",
            self.uuid,
            request.command.as_deref().unwrap_or(&request.shell),
            request.working_directory
        );
        match self.backend.spawn(&request) {
            Ok(()) => true,
            Err(e) => {
                self.report_spawn_failure(&e);
                false
            }
        }
    }

    /// Surface a spawn failure, including ones the emulator reports later
    pub fn report_spawn_failure(&self, err: &PaneError) {
        error!("Pane {}: {}", self.uuid, err);
        self.backend.feed(&format!("{}: {}\r\n", MSG_SPAWN_FAILED, err));
    }

    /// Handle the child exiting with raw wait status `raw`
    pub fn on_child_exited(&self, raw: i32) {
        if self.closed.get() {
            debug!("Pane {} already closed, ignoring child exit", self.uuid);
            return;
        }
        let status = ExitStatus::from_wait_status(raw);
        let action = self.profile().exit_action;
        info!("Pane {}: {} (exit action {:?})", self.uuid, status, action);
        match action {
            ExitAction::Restart => {
                self.spawn();
            }
            ExitAction::Close => self.close(),
            ExitAction::Hold => self.backend.show_exit_status(&status.message()),
            ExitAction::None => {}
        }
    }

    /// "Relaunch" from the exit status bar
    pub fn relaunch(&self) -> bool {
        self.backend.hide_exit_status();
        self.spawn()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Whether closing should be confirmed with the user first
    pub fn close_requires_confirmation(&self) -> bool {
        !self.closed.get()
            && self.settings.app().confirm_close_with_running_process
            && self.backend.has_foreground_process()
    }

    /// Ask the owner to close this pane; fires at most once
    pub fn close(&self) {
        if self.closed.replace(true) {
            return;
        }
        self.signals.close_request.emit(&self.uuid);
    }

    // Focus and layout requests

    pub fn on_focus_in(&self) {
        self.signals.focus_in.emit(&self.uuid);
    }

    pub fn request_split(&self, orientation: Orientation) {
        self.signals.split_request.emit(&SplitRequest { pane: self.uuid, orientation });
    }

    // Clipboard

    pub fn unsafe_paste_ignored(&self) -> bool {
        self.unsafe_paste_ignored.get()
    }

    /// Paste clipboard text, holding back unsafe pastes for confirmation
    pub fn paste_clipboard(&self, text: &str) -> PasteOutcome {
        if self.read_only.get() || self.closed.get() {
            return PasteOutcome::Blocked;
        }
        match paste::decide(text, self.unsafe_paste_ignored.get(), &self.settings.app()) {
            PasteDecision::Paste(text) => {
                self.backend.paste_text(&text);
                PasteOutcome::Pasted
            }
            PasteDecision::Confirm(text) => {
                debug!("Pane {} holding back unsafe paste", self.uuid);
                PasteOutcome::NeedsConfirmation(text)
            }
        }
    }

    /// The user accepted an unsafe paste; stop warning for this pane
    pub fn confirm_unsafe_paste(&self, text: &str) {
        self.unsafe_paste_ignored.set(true);
        if !self.read_only.get() {
            self.backend.paste_text(text);
        }
    }

    // Synchronized input

    /// Text the user typed, as committed by the emulator
    pub fn on_commit(&self, text: &str) {
        if self.synchronized.get() && !self.relaying_sync.get() && !text.is_empty() {
            self.signals.sync_input.emit(&SyncInput { source: self.uuid, text: text.to_string() });
        }
    }

    /// Input typed in a sibling pane
    pub fn receive_sync_input(&self, input: &SyncInput) {
        if input.source == self.uuid || !self.synchronized.get() || self.read_only.get() {
            return;
        }
        self.relaying_sync.set(true);
        self.backend.feed_child(&input.text);
        self.relaying_sync.set(false);
    }

    // Drag and drop

    pub fn drag_state(&self) -> DragState {
        self.drag.get()
    }

    pub fn on_drag_motion(&self, x: f64, y: f64, width: f64, height: f64) {
        let mut state = self.drag.get();
        if state.hover(resolve_quadrant(x, y, width, height)) {
            self.drag.set(state);
            self.backend.queue_overlay_redraw();
        }
    }

    pub fn on_drag_leave(&self) {
        let mut state = self.drag.get();
        if state.reset() {
            self.drag.set(state);
            self.backend.queue_overlay_redraw();
        }
    }

    /// Handle a drop at (x, y); returns whether the drop was accepted.
    pub fn on_drop(&self, payload: Option<DropPayload>, x: f64, y: f64, width: f64, height: f64) -> bool {
        self.on_drag_leave();
        let Some(payload) = payload else {
            debug!("Pane {} ignoring unrecognized drop", self.uuid);
            return false;
        };
        match payload {
            DropPayload::Terminal(source) if source == self.uuid => {
                debug!("Pane {} dropped onto itself", self.uuid);
                false
            }
            DropPayload::Terminal(source) => {
                let quadrant = resolve_quadrant(x, y, width, height);
                debug!("Pane {} dropped onto {} at {}", source, self.uuid, quadrant);
                self.signals.move_request.emit(&MoveRequest { source, target: self.uuid, quadrant });
                true
            }
            other => {
                if self.read_only.get() {
                    return false;
                }
                match other.feed_text() {
                    Some(text) => {
                        self.backend.feed_child(&text);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Decide whether this pane may be detached into its own window
    pub fn set_detach_policy<F>(&self, policy: F)
    where
        F: Fn(&Uuid) -> bool + 'static,
    {
        *self.detach_policy.borrow_mut() = Some(Box::new(policy));
    }

    /// The drag started from this pane ended without a target
    pub fn on_drag_failed(&self, x: f64, y: f64) {
        let allowed = self
            .detach_policy
            .borrow()
            .as_ref()
            .map_or(true, |policy| policy(&self.uuid));
        if !allowed {
            debug!("Detach of pane {} vetoed", self.uuid);
            return;
        }
        self.signals.detach_request.emit(&DetachRequest { pane: self.uuid, x, y });
    }

    // Find

    /// Set the search pattern and jump to the first match above the cursor
    pub fn find(&self, options: &SearchOptions) -> bool {
        let pattern = options.to_pattern();
        if let Err(e) = self.backend.search_set_pattern(pattern.as_deref(), options.case_insensitive()) {
            warn!("{}", e);
            return false;
        }
        self.backend.search_set_wrap_around(options.wrap_around);
        pattern.is_some() && self.backend.search_find_previous()
    }

    pub fn find_next(&self) -> bool {
        self.backend.search_find_next()
    }

    pub fn find_previous(&self) -> bool {
        self.backend.search_find_previous()
    }

    pub fn clear_search(&self) {
        if let Err(e) = self.backend.search_set_pattern(None, false) {
            warn!("{}", e);
        }
    }
}

impl<B: PaneBackend> Drop for TerminalPane<B> {
    fn drop(&mut self) {
        if let Some(id) = self.settings_subscription.take() {
            self.settings.unsubscribe(id);
        }
        self.signals.clear();
        debug!("Pane {} dropped", self.uuid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppSettings;
    use crate::dummy_backend::{Call, RecordingBackend};
    use crate::preferences::PreferenceKey;

    fn pane_with(profile: Profile) -> Rc<TerminalPane<RecordingBackend>> {
        let id = profile.id;
        let settings = Rc::new(SettingsStore::new(Default::default(), vec![profile]));
        TerminalPane::new(RecordingBackend::new(), settings, PaneOptions::new().with_profile(id).with_id(1))
    }

    #[test]
    fn test_uuid_is_stable_and_id_reassignment_refreshes_title() {
        let pane = pane_with(Profile::default().with_title("${id}"));
        let uuid = pane.uuid();
        pane.set_id(4);
        pane.set_id(9);
        assert_eq!(pane.uuid(), uuid);
        assert_eq!(pane.backend().titles(), vec!["4".to_string(), "9".to_string()]);
    }

    #[test]
    fn test_title_override_wins_over_profile() {
        let pane = pane_with(Profile::default().with_title("${title}"));
        pane.backend().set_window_title("bash");
        assert_eq!(pane.update_title(), "bash");
        pane.set_title_override(Some("build #${id}".to_string()));
        assert_eq!(pane.title(), "build #1");
        pane.set_title_override(None);
        assert_eq!(pane.title(), "bash");
    }

    #[test]
    fn test_blank_profile_title_uses_app_default_template() {
        let profile = Profile::default().with_title("  ");
        let id = profile.id;
        let app = AppSettings { default_title_template: "[${id}] ${title}".to_string(), ..Default::default() };
        let settings = Rc::new(SettingsStore::new(app, vec![profile]));
        let pane = TerminalPane::new(RecordingBackend::new(), settings, PaneOptions::new().with_profile(id).with_id(3));
        pane.backend().set_window_title("vim");

        assert_eq!(pane.title_template(), "[${id}] ${title}");
        assert_eq!(pane.update_title(), "[3] vim");

        // A profile template of its own still wins
        pane.settings().update_profile(&id, PreferenceKey::TerminalTitle, |p| p.terminal_title = "${title}".into()).unwrap();
        assert_eq!(pane.update_title(), "vim");
    }

    #[test]
    fn test_title_changed_fires_only_on_change() {
        let pane = pane_with(Profile::default().with_title("fixed"));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        pane.signals().title_changed.subscribe(move |_| h.set(h.get() + 1));
        pane.update_title();
        pane.update_title();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_spawn_request_exports_terminal_id() {
        let pane = pane_with(Profile::default());
        let request = pane.spawn_request();
        assert_eq!(request.env, vec![(TERMINAL_ID_ENV.to_string(), pane.uuid().to_string())]);
        assert!(request.command.is_none());
    }

    #[test]
    fn test_custom_command() {
        let pane = pane_with(Profile::default().with_custom_command("htop -d 10"));
        assert_eq!(pane.spawn_request().command.as_deref(), Some("htop -d 10"));
    }

    #[test]
    fn test_overrides_apply_to_first_spawn_only() {
        let profile = Profile::default().with_custom_command("top");
        let id = profile.id;
        let settings = Rc::new(SettingsStore::new(Default::default(), vec![profile]));
        let overrides = CommandLineOverrides {
            working_directory: Some(PathBuf::from("/srv")),
            command: Some("make watch".to_string()),
            profile_name: None,
        };
        let pane = TerminalPane::new(
            RecordingBackend::new(),
            settings,
            PaneOptions::new().with_profile(id).with_working_directory("/home").with_overrides(overrides),
        );
        let first = pane.spawn_request();
        assert_eq!(first.command.as_deref(), Some("make watch"));
        assert_eq!(first.working_directory, Some(PathBuf::from("/srv")));

        let second = pane.spawn_request();
        assert_eq!(second.command.as_deref(), Some("top"));
        assert_eq!(second.working_directory, Some(PathBuf::from("/srv")));
    }

    #[test]
    fn test_profile_name_override_selects_profile() {
        let work = Profile::new("Work");
        let work_id = work.id;
        let settings = Rc::new(SettingsStore::new(Default::default(), vec![Profile::new("Default"), work]));
        let overrides = CommandLineOverrides { profile_name: Some("Work".to_string()), ..Default::default() };
        let pane = TerminalPane::new(RecordingBackend::new(), settings, PaneOptions::new().with_overrides(overrides));
        assert_eq!(pane.profile_id(), work_id);
    }

    #[test]
    fn test_spawn_failure_is_written_to_terminal() {
        let pane = pane_with(Profile::default());
        pane.backend().fail_spawn(true);
        assert!(!pane.spawn());
        let fed = pane.backend().fed();
        assert_eq!(fed.len(), 1);
        assert!(fed[0].starts_with(MSG_SPAWN_FAILED));
    }

    #[test]
    fn test_hold_shows_status_and_relaunch_hides_it() {
        let pane = pane_with(Profile::default().with_exit_action(ExitAction::Hold));
        pane.on_child_exited(7 << 8);
        assert!(pane.backend().has_call(&Call::ShowExitStatus(
            "The child process exited normally with status 7".to_string()
        )));
        assert!(pane.relaunch());
        assert!(pane.backend().has_call(&Call::HideExitStatus));
        assert_eq!(pane.backend().spawns().len(), 1);
    }

    #[test]
    fn test_close_action_emits_once() {
        let pane = pane_with(Profile::default().with_exit_action(ExitAction::Close));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        pane.signals().close_request.subscribe(move |_| h.set(h.get() + 1));
        pane.on_child_exited(0);
        pane.on_child_exited(0);
        pane.close();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_exit_action_none_does_nothing() {
        let pane = pane_with(Profile::default().with_exit_action(ExitAction::None));
        pane.backend().clear();
        pane.on_child_exited(0);
        assert!(pane.backend().calls().is_empty());
        assert!(!pane.is_closed());
    }

    #[test]
    fn test_close_confirmation() {
        let pane = pane_with(Profile::default());
        assert!(!pane.close_requires_confirmation());
        pane.backend().set_foreground_process(true);
        assert!(pane.close_requires_confirmation());
        pane.settings().update_app(PreferenceKey::ConfirmClose, |a| a.confirm_close_with_running_process = false);
        assert!(!pane.close_requires_confirmation());
    }

    #[test]
    fn test_read_only_blocks_input() {
        let pane = pane_with(Profile::default());
        pane.set_read_only(true);
        assert!(pane.backend().has_call(&Call::InputEnabled(false)));
        assert_eq!(pane.paste_clipboard("ls"), PasteOutcome::Blocked);
        assert!(!pane.on_drop(Some(DropPayload::Text("ls".into())), 0.0, 0.0, 10.0, 10.0));
        assert!(pane.backend().pasted().is_empty());
    }

    #[test]
    fn test_settings_change_for_other_profile_is_ignored() {
        let mine = Profile::new("Mine");
        let other = Profile::new("Other");
        let (mine_id, other_id) = (mine.id, other.id);
        let settings = Rc::new(SettingsStore::new(Default::default(), vec![mine, other]));
        let pane = TerminalPane::new(RecordingBackend::new(), Rc::clone(&settings), PaneOptions::new().with_profile(mine_id));

        settings.update_profile(&other_id, PreferenceKey::ScrollbackLines, |p| p.scrollback_lines = 5).unwrap();
        assert!(pane.backend().calls().is_empty());

        settings.update_profile(&mine_id, PreferenceKey::ScrollbackLines, |p| p.scrollback_lines = 5).unwrap();
        assert_eq!(pane.backend().calls(), vec![Call::Scrollback(5)]);
    }

    #[test]
    fn test_dropping_pane_unsubscribes_from_settings() {
        let settings = Rc::new(SettingsStore::default());
        let pane = TerminalPane::new(RecordingBackend::new(), Rc::clone(&settings), PaneOptions::new());
        assert_eq!(settings.subscriber_count(), 1);
        drop(pane);
        assert_eq!(settings.subscriber_count(), 0);
    }

    #[test]
    fn test_set_profile_applies_everything() {
        let first = Profile::new("First");
        let second = Profile::new("Second").with_font("Hack 10");
        let (first_id, second_id) = (first.id, second.id);
        let settings = Rc::new(SettingsStore::new(Default::default(), vec![first, second]));
        let pane = TerminalPane::new(RecordingBackend::new(), settings, PaneOptions::new().with_profile(first_id));
        pane.set_profile(second_id);
        assert_eq!(pane.profile_id(), second_id);
        assert!(pane.backend().has_call(&Call::Font(Some("Hack 10".to_string()))));

        pane.backend().clear();
        pane.set_profile(Uuid::new_v4());
        assert_eq!(pane.profile_id(), second_id);
        assert!(pane.backend().calls().is_empty());
    }

    #[test]
    fn test_encoding_override() {
        let pane = pane_with(Profile::default());
        pane.set_encoding(Some("KOI8-R"));
        assert_eq!(pane.encoding(), "KOI8-R");
        pane.set_encoding(None);
        assert_eq!(pane.encoding(), "UTF-8");
        assert_eq!(
            pane.backend().calls(),
            vec![Call::Encoding("KOI8-R".to_string()), Call::Encoding("UTF-8".to_string())]
        );
    }

    #[test]
    fn test_find_builds_pattern() {
        let pane = pane_with(Profile::default());
        let mut options = SearchOptions::new("a.b");
        options.match_case = true;
        assert!(pane.find(&options));
        assert!(pane.backend().has_call(&Call::SearchPattern(Some(r"a\.b".to_string()), false)));
        assert!(!pane.find(&SearchOptions::new("")));
    }
}
