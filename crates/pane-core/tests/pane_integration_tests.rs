// tests/pane_integration_tests.rs
//! Integration tests for pane behavior against a recording backend

use std::cell::RefCell;
use std::rc::Rc;

use pane_core::constants::TERMINAL_MIME;
use pane_core::dummy_backend::{Call, RecordingBackend};
use pane_core::{
    AppSettings, DropPayload, ExitAction, MoveRequest, PaneOptions, PaneRegistry, PasteOutcome,
    PreferenceKey, Profile, Quadrant, Rgba, SettingsStore, SyncInput, TerminalPane,
};

type Pane = TerminalPane<RecordingBackend>;

fn store_with(profile: Profile, app: AppSettings) -> Rc<SettingsStore> {
    Rc::new(SettingsStore::new(app, vec![profile]))
}

fn new_pane(settings: &Rc<SettingsStore>) -> Rc<Pane> {
    TerminalPane::new(RecordingBackend::new(), Rc::clone(settings), PaneOptions::new().with_id(1))
}

#[test]
fn restart_respawns_once_in_initial_directory() {
    let settings = store_with(Profile::default().with_exit_action(ExitAction::Restart), AppSettings::default());
    let pane = TerminalPane::new(
        RecordingBackend::new(),
        Rc::clone(&settings),
        PaneOptions::new().with_working_directory("/var/tmp"),
    );
    let closes = Rc::new(RefCell::new(0));
    let c = Rc::clone(&closes);
    pane.signals().close_request.subscribe(move |_| *c.borrow_mut() += 1);

    assert!(pane.spawn());
    pane.backend().clear();

    pane.on_child_exited(0);

    let spawns = pane.backend().spawns();
    assert_eq!(spawns.len(), 1);
    assert_eq!(spawns[0].working_directory.as_deref(), Some(std::path::Path::new("/var/tmp")));
    assert_eq!(*closes.borrow(), 0);
    assert!(!pane
        .backend()
        .calls()
        .iter()
        .any(|c| matches!(c, Call::ShowExitStatus(_))));
}

#[test]
fn palette_key_rederives_full_color_set() {
    let mut profile = Profile::default().with_colors("#101010", "#202020").with_transparency(50);
    profile.palette[0] = "#010203".to_string();
    let settings = store_with(profile, AppSettings::default());
    let pane = new_pane(&settings);

    pane.apply_preference(PreferenceKey::Palette);

    let calls = pane.backend().calls();
    assert_eq!(calls.len(), 1);
    let colors = pane.backend().last_colors().unwrap();
    assert_eq!(colors.palette.len(), 16);
    assert_eq!(colors.palette[0], Rgba::parse("#010203").unwrap());
    assert_eq!(colors.foreground, Rgba::parse("#101010").unwrap());
    assert_eq!(colors.background, Rgba::parse("#202020").unwrap().with_alpha(0.5));
}

#[test]
fn unknown_and_inert_keys_are_noops() {
    let settings = Rc::new(SettingsStore::default());
    let pane = new_pane(&settings);

    pane.apply_preference_named("definitely-not-a-key");
    pane.apply_preference(PreferenceKey::ExitAction);
    pane.apply_preference(PreferenceKey::UnsafePasteAlert);

    assert!(pane.backend().calls().is_empty());
}

#[test]
fn bad_color_keeps_previous_value_and_rest_still_applies() {
    let settings = Rc::new(SettingsStore::default());
    let profile_id = settings.default_profile().id;
    let pane = new_pane(&settings);
    pane.apply_preferences_all();
    let before = pane.backend().last_colors().unwrap();

    settings
        .update_profile(&profile_id, PreferenceKey::ForegroundColor, |p| {
            p.foreground_color = "chartreuse-ish".to_string();
            p.background_color = "#336699".to_string();
        })
        .unwrap();

    let after = pane.backend().last_colors().unwrap();
    assert_eq!(after.foreground, before.foreground);
    assert_eq!(after.background, Rgba::parse("#336699").unwrap());
}

#[test]
fn apply_all_touches_every_family_once() {
    let settings = Rc::new(SettingsStore::default());
    let pane = new_pane(&settings);
    pane.apply_preferences_all();

    let calls = pane.backend().calls();
    let colors = calls.iter().filter(|c| matches!(c, Call::Colors(_))).count();
    let fonts = calls.iter().filter(|c| matches!(c, Call::Font(_))).count();
    assert_eq!(colors, 1);
    assert_eq!(fonts, 1);
    assert!(calls.contains(&Call::Scrollback(8192)));
    assert!(calls.contains(&Call::Encoding("UTF-8".to_string())));
    assert_eq!(pane.backend().titles().len(), 1);
}

#[test]
fn paste_guard_through_pane() {
    let unsafe_text = "sudo systemctl stop nginx\nrm -rf /var/www\n";

    // Alert enabled: prompt, then never again for this pane
    let settings = Rc::new(SettingsStore::default());
    let pane = new_pane(&settings);
    assert_eq!(
        pane.paste_clipboard(unsafe_text),
        PasteOutcome::NeedsConfirmation(unsafe_text.to_string())
    );
    assert!(pane.backend().pasted().is_empty());
    pane.confirm_unsafe_paste(unsafe_text);
    assert!(pane.unsafe_paste_ignored());
    assert_eq!(pane.paste_clipboard(unsafe_text), PasteOutcome::Pasted);
    assert_eq!(pane.backend().pasted().len(), 2);

    // The flag is per pane
    let sibling = new_pane(&settings);
    assert!(matches!(sibling.paste_clipboard(unsafe_text), PasteOutcome::NeedsConfirmation(_)));

    // Alert disabled
    let quiet = Rc::new(SettingsStore::new(
        AppSettings { unsafe_paste_alert: false, ..AppSettings::default() },
        vec![Profile::default()],
    ));
    let pane = new_pane(&quiet);
    assert_eq!(pane.paste_clipboard(unsafe_text), PasteOutcome::Pasted);
}

#[test]
fn paste_strips_leading_prompt_char() {
    let settings = store_with(
        Profile::default(),
        AppSettings { strip_first_comment_char_on_paste: true, ..AppSettings::default() },
    );
    let pane = new_pane(&settings);
    pane.paste_clipboard("$ cargo fmt");
    assert_eq!(pane.backend().pasted(), vec![" cargo fmt".to_string()]);
}

#[test]
fn synchronized_input_reaches_siblings_once() {
    let settings = Rc::new(SettingsStore::default());
    let registry: Rc<PaneRegistry<Pane>> = Rc::new(PaneRegistry::new());
    let panes: Vec<Rc<Pane>> = (0..3).map(|_| new_pane(&settings)).collect();
    for pane in &panes {
        registry.register(pane.uuid(), pane);
        pane.set_synchronized(true);
        let reg = Rc::clone(&registry);
        pane.signals().sync_input.subscribe(move |input: &SyncInput| {
            for sibling in reg.panes() {
                sibling.receive_sync_input(input);
            }
        });
    }
    panes[2].set_read_only(true);

    panes[0].on_commit("ls\r");

    assert!(panes[0].backend().fed_to_child().is_empty());
    assert_eq!(panes[1].backend().fed_to_child(), vec!["ls\r".to_string()]);
    assert!(panes[2].backend().fed_to_child().is_empty());
}

#[test]
fn terminal_drop_resolves_quadrant_and_requests_move() {
    let settings = Rc::new(SettingsStore::default());
    let source = new_pane(&settings);
    let target = new_pane(&settings);
    let moves = Rc::new(RefCell::new(Vec::new()));
    let m = Rc::clone(&moves);
    target.signals().move_request.subscribe(move |req: &MoveRequest| m.borrow_mut().push(req.clone()));

    target.on_drag_motion(395.0, 150.0, 400.0, 300.0);
    assert_eq!(target.drag_state().quadrant, Some(Quadrant::Right));

    let payload = DropPayload::decode(TERMINAL_MIME, source.uuid().to_string().as_bytes());
    assert!(target.on_drop(payload, 395.0, 150.0, 400.0, 300.0));

    assert!(!target.drag_state().active);
    assert_eq!(
        *moves.borrow(),
        vec![MoveRequest { source: source.uuid(), target: target.uuid(), quadrant: Quadrant::Right }]
    );

    // Dropping a pane onto itself does nothing
    let own = DropPayload::decode(TERMINAL_MIME, target.uuid().to_string().as_bytes());
    assert!(!target.on_drop(own, 10.0, 150.0, 400.0, 300.0));
    assert_eq!(moves.borrow().len(), 1);

    // Unrecognized drag is a no-op
    assert!(!target.on_drop(DropPayload::decode("application/octet-stream", b"x"), 0.0, 0.0, 1.0, 1.0));
}

#[test]
fn detach_can_be_vetoed() {
    let settings = Rc::new(SettingsStore::default());
    let pane = new_pane(&settings);
    let detaches = Rc::new(RefCell::new(0));
    let d = Rc::clone(&detaches);
    pane.signals().detach_request.subscribe(move |_| *d.borrow_mut() += 1);

    pane.on_drag_failed(10.0, 10.0);
    assert_eq!(*detaches.borrow(), 1);

    pane.set_detach_policy(|_| false);
    pane.on_drag_failed(10.0, 10.0);
    assert_eq!(*detaches.borrow(), 1);
}

#[test]
fn title_uses_emulator_state() {
    let settings = store_with(
        Profile::default().with_title("${id} ${title} [${iconTitle}] ${directory} ${columns}x${rows}"),
        AppSettings::default(),
    );
    let pane = new_pane(&settings);
    // Not yet initialized: directory is empty
    assert_eq!(pane.update_title(), "1  []  80x24");

    pane.backend().set_window_title("make");
    pane.backend().set_icon_title("build");
    pane.backend().set_directory_uri("file:///home/hugo/src");
    let first = pane.update_title();
    assert_eq!(first, "1 make [build] /home/hugo/src 80x24");
    assert_eq!(pane.update_title(), first);
}
