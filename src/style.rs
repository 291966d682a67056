//! Application stylesheet

use gtk4::{gdk, CssProvider};

const CSS: &str = "
.pane-titlebar { padding: 2px 0; border-bottom: 1px solid alpha(currentColor, 0.15); }
.pane-titlebar label { font-weight: bold; }
.terminal-pane:focus-within .pane-titlebar { background-color: alpha(@accent_bg_color, 0.25); }
.pane-titlebar.pane-bell { background-color: alpha(@warning_color, 0.4); }
.pane-statusbar { background-color: alpha(currentColor, 0.08); }
.pane-findbar entry.error { color: @error_color; }
";

/// Load the pane stylesheet for the default display
pub fn install_css() {
    let css = CssProvider::new();
    css.load_from_data(CSS);

    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(&display, &css, gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION);
    }
}
