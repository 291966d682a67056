//! Pane construction: builds the widget tree and wires GTK and VTE
//! signals to the toolkit-agnostic pane.

use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::{gdk, gio, glib::VariantTy, Orientation as GtkOrientation};
use tracing::{debug, warn};
use uuid::Uuid;
use vte4::prelude::*;

use pane_core::{Orientation, PaneOptions, PasteOutcome, SearchOptions, SettingsStore, TerminalPane};

use crate::backend::VteBackend;
use crate::dialogs;
use crate::dnd;
use crate::titlebar::{pane_menu, FindBar, StatusBar, TitleBar, ACTION_GROUP};
use crate::GtkPane;

const BELL_CLASS: &str = "pane-bell";
const BELL_FLASH: Duration = Duration::from_millis(250);

// Shortcut triggers for the per-pane actions
const SHORTCUTS: &[(&str, &str)] = &[
    ("<Control><Shift>c", "copy"),
    ("<Control><Shift>v", "paste"),
    ("<Control><Shift>f", "find"),
    ("<Control><Shift>r", "split-right"),
    ("<Control><Shift>d", "split-down"),
    ("<Control><Shift>w", "close"),
];

/// Build a pane with its widgets and apply its profile.
///
/// The child process is not started; call [`TerminalPane::spawn`] once the
/// pane has been placed in a window.
pub fn build_pane(settings: Rc<SettingsStore>, options: PaneOptions) -> Rc<GtkPane> {
    let terminal = vte4::Terminal::new();
    terminal.set_hexpand(true);
    terminal.set_vexpand(true);

    let scrollbar = gtk4::Scrollbar::new(GtkOrientation::Vertical, terminal.vadjustment().as_ref());
    let body = gtk4::Box::new(GtkOrientation::Horizontal, 0);
    body.append(&terminal);
    body.append(&scrollbar);

    let drag_area = gtk4::DrawingArea::new();
    drag_area.set_can_target(false);
    drag_area.set_hexpand(true);
    drag_area.set_vexpand(true);

    let overlay = gtk4::Overlay::new();
    overlay.set_child(Some(&body));
    overlay.add_overlay(&drag_area);

    let title_bar = TitleBar::new(&settings.profiles());
    let find_bar = FindBar::new();
    let status_bar = StatusBar::new();

    let root = gtk4::Box::new(GtkOrientation::Vertical, 0);
    root.add_css_class("terminal-pane");
    root.append(&title_bar.container);
    root.append(&find_bar.revealer);
    root.append(&overlay);
    root.append(&status_bar.revealer);

    let backend = VteBackend::new(root, terminal, title_bar, status_bar, drag_area);
    let pane = TerminalPane::new(backend, settings, options);

    let weak = Rc::downgrade(&pane);
    pane.backend().set_spawn_failure_hook(move |err| {
        if let Some(pane) = weak.upgrade() {
            pane.report_spawn_failure(&err);
        }
    });

    connect_terminal(&pane);
    install_actions(&pane, &find_bar);
    connect_find_bar(&pane, &find_bar);
    install_context_menu(&pane);
    dnd::install_drag_source(&pane);
    dnd::install_drop_target(&pane, &overlay);
    dnd::install_overlay(&pane);

    pane.apply_preferences_all();
    debug!("Built pane {} with profile {}", pane.uuid(), pane.profile_id());
    pane
}

fn connect_terminal(pane: &Rc<GtkPane>) {
    let backend = pane.backend();
    let terminal = backend.terminal();

    let weak = Rc::downgrade(pane);
    terminal.connect_child_exited(move |_, status| {
        if let Some(pane) = weak.upgrade() {
            pane.backend().forget_child();
            pane.on_child_exited(status);
        }
    });

    let weak = Rc::downgrade(pane);
    terminal.connect_commit(move |_, text, _| {
        if let Some(pane) = weak.upgrade() {
            pane.on_commit(text);
        }
    });

    for property in ["window-title", "icon-title", "current-directory-uri"] {
        if terminal.find_property(property).is_none() {
            debug!("Terminal has no '{}' property, title will not track it", property);
            continue;
        }
        let weak = Rc::downgrade(pane);
        terminal.connect_notify_local(Some(property), move |_, _| {
            if let Some(pane) = weak.upgrade() {
                pane.update_title();
            }
        });
    }

    // The overlay always covers the terminal, so its size tracks the grid
    let weak = Rc::downgrade(pane);
    backend.drag_area().connect_resize(move |_, _, _| {
        if let Some(pane) = weak.upgrade() {
            pane.update_title();
        }
    });

    let title_bar = backend.title_bar().container.clone();
    terminal.connect_bell(move |_| {
        title_bar.add_css_class(BELL_CLASS);
        let title_bar = title_bar.clone();
        glib::timeout_add_local_once(BELL_FLASH, move || title_bar.remove_css_class(BELL_CLASS));
    });

    let focus = gtk4::EventControllerFocus::new();
    let weak = Rc::downgrade(pane);
    focus.connect_enter(move |_| {
        if let Some(pane) = weak.upgrade() {
            pane.on_focus_in();
        }
    });
    terminal.add_controller(focus);
}

fn with_pane<F>(weak: &Weak<GtkPane>, f: F)
where
    F: FnOnce(Rc<GtkPane>),
{
    if let Some(pane) = weak.upgrade() {
        f(pane);
    }
}

fn simple_action<F>(group: &gio::SimpleActionGroup, pane: &Rc<GtkPane>, name: &str, f: F)
where
    F: Fn(Rc<GtkPane>) + 'static,
{
    let action = gio::SimpleAction::new(name, None);
    let weak = Rc::downgrade(pane);
    action.connect_activate(move |_, _| with_pane(&weak, &f));
    group.add_action(&action);
}

fn toggle_action<F>(group: &gio::SimpleActionGroup, pane: &Rc<GtkPane>, name: &str, initial: bool, f: F)
where
    F: Fn(&GtkPane, bool) + 'static,
{
    let action = gio::SimpleAction::new_stateful(name, None, &initial.to_variant());
    let weak = Rc::downgrade(pane);
    action.connect_change_state(move |action, value| {
        let Some(enabled) = value.and_then(|v| v.get::<bool>()) else {
            return;
        };
        with_pane(&weak, |pane| f(&pane, enabled));
        action.set_state(&enabled.to_variant());
    });
    group.add_action(&action);
}

fn radio_action<F>(group: &gio::SimpleActionGroup, pane: &Rc<GtkPane>, name: &str, initial: String, f: F)
where
    F: Fn(&GtkPane, &str) -> bool + 'static,
{
    let action = gio::SimpleAction::new_stateful(name, Some(VariantTy::STRING), &initial.to_variant());
    let weak = Rc::downgrade(pane);
    action.connect_change_state(move |action, value| {
        let Some(choice) = value.and_then(|v| v.get::<String>()) else {
            return;
        };
        let Some(pane) = weak.upgrade() else {
            return;
        };
        if f(&pane, &choice) {
            action.set_state(&choice.to_variant());
        }
    });
    group.add_action(&action);
}

fn install_actions(pane: &Rc<GtkPane>, find_bar: &FindBar) {
    let group = gio::SimpleActionGroup::new();

    simple_action(&group, pane, "copy", |pane| {
        pane.backend().terminal().copy_clipboard_format(vte4::Format::Text);
    });
    simple_action(&group, pane, "paste", paste_from_clipboard);
    simple_action(&group, pane, "split-right", |pane| pane.request_split(Orientation::Horizontal));
    simple_action(&group, pane, "split-down", |pane| pane.request_split(Orientation::Vertical));
    simple_action(&group, pane, "edit-title", |pane| dialogs::edit_title(&pane));
    simple_action(&group, pane, "close", |pane| dialogs::close_with_confirmation(&pane));
    simple_action(&group, pane, "relaunch", |pane| {
        pane.relaunch();
    });

    let revealer = find_bar.revealer.clone();
    let entry = find_bar.entry.clone();
    simple_action(&group, pane, "find", move |_| {
        revealer.set_reveal_child(true);
        entry.grab_focus();
    });

    toggle_action(&group, pane, "read-only", pane.is_read_only(), |pane, on| pane.set_read_only(on));
    toggle_action(&group, pane, "sync-input", pane.is_synchronized(), |pane, on| {
        pane.set_synchronized(on)
    });

    radio_action(&group, pane, "profile", pane.profile_id().to_string(), |pane, choice| {
        match Uuid::parse_str(choice) {
            Ok(id) => {
                pane.set_profile(id);
                pane.profile_id() == id
            }
            Err(e) => {
                warn!("Bad profile id {}: {}", choice, e);
                false
            }
        }
    });
    radio_action(&group, pane, "encoding", pane.encoding(), |pane, choice| {
        pane.set_encoding(Some(choice));
        true
    });

    let backend = pane.backend();
    backend.root().insert_action_group(ACTION_GROUP, Some(&group));
    backend
        .status_bar()
        .relaunch
        .set_action_name(Some(&format!("{}.relaunch", ACTION_GROUP)));

    let shortcuts = gtk4::ShortcutController::new();
    shortcuts.set_scope(gtk4::ShortcutScope::Local);
    for (trigger, name) in SHORTCUTS {
        let Some(trigger) = gtk4::ShortcutTrigger::parse_string(trigger) else {
            warn!("Invalid shortcut trigger {}", trigger);
            continue;
        };
        let action = gtk4::NamedAction::new(&format!("{}.{}", ACTION_GROUP, name));
        shortcuts.add_shortcut(gtk4::Shortcut::new(Some(trigger), Some(action)));
    }
    backend.root().add_controller(shortcuts);
}

fn paste_from_clipboard(pane: Rc<GtkPane>) {
    let clipboard = pane.backend().terminal().clipboard();
    let weak = Rc::downgrade(&pane);
    glib::spawn_future_local(async move {
        let text = match clipboard.read_text_future().await {
            Ok(Some(text)) => text.to_string(),
            Ok(None) => return,
            Err(e) => {
                warn!("Clipboard read failed: {}", e);
                return;
            }
        };
        let Some(pane) = weak.upgrade() else {
            return;
        };
        match pane.paste_clipboard(&text) {
            PasteOutcome::NeedsConfirmation(text) => dialogs::confirm_unsafe_paste(&pane, text),
            PasteOutcome::Blocked => debug!("Paste into pane {} blocked", pane.uuid()),
            PasteOutcome::Pasted => {}
        }
    });
}

fn search_options(find_bar: &FindBar) -> SearchOptions {
    SearchOptions {
        match_case: find_bar.match_case.is_active(),
        entire_word: find_bar.entire_word.is_active(),
        regex: find_bar.regex.is_active(),
        wrap_around: find_bar.wrap_around.is_active(),
        ..SearchOptions::new(&find_bar.entry.text())
    }
}

fn connect_find_bar(pane: &Rc<GtkPane>, find_bar: &FindBar) {
    let bar = Rc::new(find_bar.clone());

    let run_search = {
        let weak = Rc::downgrade(pane);
        let bar = Rc::clone(&bar);
        Rc::new(move || {
            with_pane(&weak, |pane| {
                let found = pane.find(&search_options(&bar));
                if found || bar.entry.text().is_empty() {
                    bar.entry.remove_css_class("error");
                } else {
                    bar.entry.add_css_class("error");
                }
            })
        })
    };

    let search = Rc::clone(&run_search);
    find_bar.entry.connect_search_changed(move |_| search());
    for check in [&find_bar.match_case, &find_bar.entire_word, &find_bar.regex, &find_bar.wrap_around] {
        let search = Rc::clone(&run_search);
        check.connect_toggled(move |_| search());
    }

    let weak = Rc::downgrade(pane);
    find_bar.entry.connect_activate(move |_| with_pane(&weak, |pane| {
        pane.find_next();
    }));
    let weak = Rc::downgrade(pane);
    find_bar.next.connect_clicked(move |_| with_pane(&weak, |pane| {
        pane.find_next();
    }));
    let weak = Rc::downgrade(pane);
    find_bar.previous.connect_clicked(move |_| with_pane(&weak, |pane| {
        pane.find_previous();
    }));

    let weak = Rc::downgrade(pane);
    find_bar.entry.connect_stop_search(move |_| {
        bar.revealer.set_reveal_child(false);
        with_pane(&weak, |pane| {
            pane.clear_search();
            pane.backend().terminal().grab_focus();
        });
    });
}

fn install_context_menu(pane: &Rc<GtkPane>) {
    let weak = Rc::downgrade(pane);
    let click = gtk4::GestureClick::new();
    click.set_button(gdk::BUTTON_SECONDARY);
    click.connect_pressed(move |gesture, _, x, y| {
        let (Some(pane), Some(terminal)) = (weak.upgrade(), gesture.widget().and_downcast::<vte4::Terminal>())
        else {
            return;
        };
        let model = pane_menu(&pane.settings().profiles());
        context_popover(&terminal, &model, x, y).popup();
        gesture.set_state(gtk4::EventSequenceState::Claimed);
    });
    pane.backend().terminal().add_controller(click);
}

/// A one-shot menu parented to `terminal` that unparents itself once closed,
/// so the terminal holds no stray children when it is finalized.
fn context_popover(terminal: &vte4::Terminal, model: &gio::Menu, x: f64, y: f64) -> gtk4::PopoverMenu {
    let popover = gtk4::PopoverMenu::from_model(Some(model));
    popover.set_parent(terminal);
    popover.set_has_arrow(false);
    popover.set_pointing_to(Some(&gdk::Rectangle::new(x as i32, y as i32, 1, 1)));

    // Deferred: the chosen item is activated after `closed` fires
    popover.connect_closed(|popover| {
        let popover = popover.clone();
        glib::idle_add_local_once(move || {
            if popover.parent().is_some() {
                popover.unparent();
            }
        });
    });
    popover
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_main_context() {
        let context = glib::MainContext::default();
        while context.iteration(false) {}
    }

    #[test]
    fn closed_context_menu_leaves_terminal_childless() {
        // Needs a display; headless runs have nothing to check
        if gtk4::init().is_err() {
            return;
        }
        let terminal = vte4::Terminal::new();
        let own_child = terminal.first_child();
        let model = gio::Menu::new();
        model.append(Some("Copy"), Some("pane.copy"));

        for _ in 0..3 {
            let popover = context_popover(&terminal, &model, 10.0, 20.0);
            assert_eq!(popover.parent().as_ref(), Some(terminal.upcast_ref::<gtk4::Widget>()));

            popover.emit_by_name::<()>("closed", &[]);
            drain_main_context();
            assert!(popover.parent().is_none());
        }
        assert_eq!(terminal.first_child(), own_child);
    }
}
