//! Title bar, find bar and exit-status bar widgets

use gtk4::prelude::*;
use gtk4::{gio, Align, Orientation};

use pane_core::encoding::{encoding_label, ENCODINGS};
use pane_core::Profile;

/// Action group prefix for per-pane actions
pub const ACTION_GROUP: &str = "pane";

/// Title bar shown above each terminal
pub(crate) struct TitleBar {
    pub container: gtk4::Box,
    pub label: gtk4::Label,
    pub read_only_icon: gtk4::Image,
    pub sync_icon: gtk4::Image,
}

impl TitleBar {
    pub fn new(profiles: &[Profile]) -> Self {
        let container = gtk4::Box::new(Orientation::Horizontal, 4);
        container.add_css_class("pane-titlebar");
        container.set_margin_start(4);
        container.set_margin_end(2);

        let read_only_icon = gtk4::Image::from_icon_name("changes-prevent-symbolic");
        read_only_icon.set_tooltip_text(Some("Read-only"));
        read_only_icon.set_visible(false);

        let sync_icon = gtk4::Image::from_icon_name("input-keyboard-symbolic");
        sync_icon.set_tooltip_text(Some("Input synchronized"));
        sync_icon.set_visible(false);

        let label = gtk4::Label::new(None);
        label.set_hexpand(true);
        label.set_halign(Align::Start);
        label.set_ellipsize(pango::EllipsizeMode::Middle);

        let menu_button = gtk4::MenuButton::new();
        menu_button.set_icon_name("open-menu-symbolic");
        menu_button.set_has_frame(false);
        menu_button.set_menu_model(Some(&pane_menu(profiles)));

        container.append(&read_only_icon);
        container.append(&sync_icon);
        container.append(&label);
        container.append(&menu_button);

        Self { container, label, read_only_icon, sync_icon }
    }
}

/// Hold bar revealed when the child exits with the hold action
pub(crate) struct StatusBar {
    pub revealer: gtk4::Revealer,
    pub label: gtk4::Label,
    pub relaunch: gtk4::Button,
}

impl StatusBar {
    pub fn new() -> Self {
        let row = gtk4::Box::new(Orientation::Horizontal, 6);
        row.add_css_class("pane-statusbar");
        row.set_margin_start(6);
        row.set_margin_end(6);
        row.set_margin_top(3);
        row.set_margin_bottom(3);

        let label = gtk4::Label::new(None);
        label.set_hexpand(true);
        label.set_halign(Align::Start);

        let relaunch = gtk4::Button::with_label("Relaunch");
        row.append(&label);
        row.append(&relaunch);

        let revealer = gtk4::Revealer::new();
        revealer.set_transition_type(gtk4::RevealerTransitionType::SlideUp);
        revealer.set_child(Some(&row));
        revealer.set_reveal_child(false);

        Self { revealer, label, relaunch }
    }
}

/// Search entry with its navigation buttons
#[derive(Clone)]
pub(crate) struct FindBar {
    pub revealer: gtk4::Revealer,
    pub entry: gtk4::SearchEntry,
    pub match_case: gtk4::CheckButton,
    pub entire_word: gtk4::CheckButton,
    pub regex: gtk4::CheckButton,
    pub wrap_around: gtk4::CheckButton,
    pub previous: gtk4::Button,
    pub next: gtk4::Button,
}

impl FindBar {
    pub fn new() -> Self {
        let row = gtk4::Box::new(Orientation::Horizontal, 4);
        row.add_css_class("pane-findbar");
        row.set_margin_start(4);
        row.set_margin_end(4);

        let entry = gtk4::SearchEntry::new();
        entry.set_hexpand(true);

        let previous = gtk4::Button::from_icon_name("go-up-symbolic");
        previous.set_tooltip_text(Some("Find previous"));
        let next = gtk4::Button::from_icon_name("go-down-symbolic");
        next.set_tooltip_text(Some("Find next"));

        let match_case = gtk4::CheckButton::with_label("Match case");
        let entire_word = gtk4::CheckButton::with_label("Whole word");
        let regex = gtk4::CheckButton::with_label("Regex");
        let wrap_around = gtk4::CheckButton::with_label("Wrap");
        wrap_around.set_active(true);

        row.append(&entry);
        row.append(&previous);
        row.append(&next);
        for check in [&match_case, &entire_word, &regex, &wrap_around] {
            row.append(check);
        }

        let revealer = gtk4::Revealer::new();
        revealer.set_child(Some(&row));
        revealer.set_reveal_child(false);

        Self { revealer, entry, match_case, entire_word, regex, wrap_around, previous, next }
    }
}

fn action(name: &str) -> String {
    format!("{}.{}", ACTION_GROUP, name)
}

/// Menu model shared by the title bar button and the context menu
pub(crate) fn pane_menu(profiles: &[Profile]) -> gio::Menu {
    let menu = gio::Menu::new();

    let edit = gio::Menu::new();
    edit.append(Some("Copy"), Some(&action("copy")));
    edit.append(Some("Paste"), Some(&action("paste")));
    edit.append(Some("Find…"), Some(&action("find")));
    menu.append_section(None, &edit);

    let layout = gio::Menu::new();
    layout.append(Some("Split Right"), Some(&action("split-right")));
    layout.append(Some("Split Down"), Some(&action("split-down")));
    menu.append_section(None, &layout);

    let options = gio::Menu::new();
    options.append(Some("Edit Title…"), Some(&action("edit-title")));
    options.append(Some("Read-Only"), Some(&action("read-only")));
    options.append(Some("Synchronize Input"), Some(&action("sync-input")));

    let profile_menu = gio::Menu::new();
    for profile in profiles {
        let item = gio::MenuItem::new(Some(&profile.visible_name), None);
        item.set_action_and_target_value(
            Some(&action("profile")),
            Some(&profile.id.to_string().to_variant()),
        );
        profile_menu.append_item(&item);
    }
    options.append_submenu(Some("Profile"), &profile_menu);

    let encoding_menu = gio::Menu::new();
    let mut group = "";
    let mut section = gio::Menu::new();
    for &(charset, _, encoding_group) in ENCODINGS {
        if encoding_group != group && section.n_items() > 0 {
            encoding_menu.append_section(Some(group), &section);
            section = gio::Menu::new();
        }
        group = encoding_group;
        let label = encoding_label(charset).unwrap_or_else(|| charset.to_string());
        let item = gio::MenuItem::new(Some(&label), None);
        item.set_action_and_target_value(Some(&action("encoding")), Some(&charset.to_variant()));
        section.append_item(&item);
    }
    if section.n_items() > 0 {
        encoding_menu.append_section(Some(group), &section);
    }
    options.append_submenu(Some("Encoding"), &encoding_menu);
    menu.append_section(None, &options);

    let close = gio::Menu::new();
    close.append(Some("Close"), Some(&action("close")));
    menu.append_section(None, &close);

    menu
}
