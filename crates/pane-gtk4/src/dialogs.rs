//! Modal prompts: unsafe paste, close confirmation and title editing

use std::rc::Rc;

use gtk4::prelude::*;
use tracing::debug;

use crate::GtkPane;

const PASTE_ANYWAY: i32 = 1;
const CLOSE_ANYWAY: i32 = 1;

fn parent_window(pane: &GtkPane) -> Option<gtk4::Window> {
    pane.backend().root().root().and_downcast::<gtk4::Window>()
}

/// Ask before pasting text that looks like a privileged multi-line command.
///
/// Accepting pastes the text and stops this pane from asking again.
pub(crate) fn confirm_unsafe_paste(pane: &Rc<GtkPane>, text: String) {
    let dialog = gtk4::AlertDialog::builder()
        .modal(true)
        .message("This looks like a dangerous paste")
        .detail(
            "The clipboard contains a sudo command spanning several lines. \
             Pasting it may run commands without a chance to review them.",
        )
        .buttons(["Cancel", "Paste Anyway"])
        .cancel_button(0)
        .default_button(0)
        .build();

    let parent = parent_window(pane);
    let weak = Rc::downgrade(pane);
    glib::spawn_future_local(async move {
        match dialog.choose_future(parent.as_ref()).await {
            Ok(PASTE_ANYWAY) => {
                if let Some(pane) = weak.upgrade() {
                    pane.confirm_unsafe_paste(&text);
                }
            }
            Ok(_) => debug!("Unsafe paste cancelled"),
            Err(e) => debug!("Paste dialog dismissed: {}", e),
        }
    });
}

/// Close the pane, asking first when a foreground process is still running
pub(crate) fn close_with_confirmation(pane: &Rc<GtkPane>) {
    if !pane.close_requires_confirmation() {
        pane.close();
        return;
    }

    let dialog = gtk4::AlertDialog::builder()
        .modal(true)
        .message("Close this terminal?")
        .detail("A process is still running in this terminal. Closing it will kill the process.")
        .buttons(["Cancel", "Close Terminal"])
        .cancel_button(0)
        .default_button(0)
        .build();

    let parent = parent_window(pane);
    let weak = Rc::downgrade(pane);
    glib::spawn_future_local(async move {
        if let Ok(CLOSE_ANYWAY) = dialog.choose_future(parent.as_ref()).await {
            if let Some(pane) = weak.upgrade() {
                pane.close();
            }
        }
    });
}

/// Edit the pane's title template; an empty entry restores the profile's
pub(crate) fn edit_title(pane: &Rc<GtkPane>) {
    let window = gtk4::Window::builder()
        .title("Edit Title")
        .modal(true)
        .resizable(false)
        .default_width(360)
        .build();
    if let Some(parent) = parent_window(pane) {
        window.set_transient_for(Some(&parent));
    }

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 8);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let entry = gtk4::Entry::new();
    let current = pane.title_template();
    entry.set_text(&current);
    entry.set_tooltip_text(Some("${title} ${iconTitle} ${id} ${directory} ${columns} ${rows}"));
    entry.set_activates_default(true);

    let buttons = gtk4::Box::new(gtk4::Orientation::Horizontal, 6);
    buttons.set_halign(gtk4::Align::End);
    let cancel = gtk4::Button::with_label("Cancel");
    let apply = gtk4::Button::with_label("Apply");
    apply.add_css_class("suggested-action");
    buttons.append(&cancel);
    buttons.append(&apply);

    content.append(&entry);
    content.append(&buttons);
    window.set_child(Some(&content));
    window.set_default_widget(Some(&apply));

    let win = window.clone();
    cancel.connect_clicked(move |_| win.close());

    let weak = Rc::downgrade(pane);
    let win = window.clone();
    apply.connect_clicked(move |_| {
        if let Some(pane) = weak.upgrade() {
            let text = entry.text().trim().to_string();
            pane.set_title_override((!text.is_empty()).then_some(text));
        }
        win.close();
    });

    window.present();
}
