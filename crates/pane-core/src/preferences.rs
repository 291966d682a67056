//! Preference keys and the table mapping each key to a widget mutation

use tracing::{debug, warn};

use crate::color::Rgba;
use crate::config::Profile;
use crate::constants::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_PALETTE, PALETTE_SIZE};
use crate::pane::TerminalPane;
use crate::traits::{ColorSet, PaneBackend};

/// Every setting a pane reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    // Color family: any member re-derives the whole color set
    ForegroundColor,
    BackgroundColor,
    Palette,
    BackgroundTransparency,
    CursorColors,
    HighlightColors,
    BoldColor,
    // Font family
    Font,
    UseSystemFont,

    ScrollbackLines,
    CursorShape,
    CursorBlinkMode,
    AudibleBell,
    AllowBold,
    BoldIsBright,
    RewrapOnResize,
    BackspaceBinding,
    DeleteBinding,
    Encoding,
    CellScale,
    WordWiseSelectChars,
    TerminalTitle,

    // Read when needed, nothing to apply
    VisibleName,
    ExitAction,
    CustomCommand,
    LoginShell,

    // Application wide
    UnsafePasteAlert,
    StripFirstCommentChar,
    StripTrailingWhitespace,
    ConfirmClose,
    DefaultProfile,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 31] = [
        PreferenceKey::ForegroundColor,
        PreferenceKey::BackgroundColor,
        PreferenceKey::Palette,
        PreferenceKey::BackgroundTransparency,
        PreferenceKey::CursorColors,
        PreferenceKey::HighlightColors,
        PreferenceKey::BoldColor,
        PreferenceKey::Font,
        PreferenceKey::UseSystemFont,
        PreferenceKey::ScrollbackLines,
        PreferenceKey::CursorShape,
        PreferenceKey::CursorBlinkMode,
        PreferenceKey::AudibleBell,
        PreferenceKey::AllowBold,
        PreferenceKey::BoldIsBright,
        PreferenceKey::RewrapOnResize,
        PreferenceKey::BackspaceBinding,
        PreferenceKey::DeleteBinding,
        PreferenceKey::Encoding,
        PreferenceKey::CellScale,
        PreferenceKey::WordWiseSelectChars,
        PreferenceKey::TerminalTitle,
        PreferenceKey::VisibleName,
        PreferenceKey::ExitAction,
        PreferenceKey::CustomCommand,
        PreferenceKey::LoginShell,
        PreferenceKey::UnsafePasteAlert,
        PreferenceKey::StripFirstCommentChar,
        PreferenceKey::StripTrailingWhitespace,
        PreferenceKey::ConfirmClose,
        PreferenceKey::DefaultProfile,
    ];

    /// Settings-file name of the key
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::ForegroundColor => "foreground-color",
            PreferenceKey::BackgroundColor => "background-color",
            PreferenceKey::Palette => "palette",
            PreferenceKey::BackgroundTransparency => "background-transparency-percent",
            PreferenceKey::CursorColors => "cursor-colors",
            PreferenceKey::HighlightColors => "highlight-colors",
            PreferenceKey::BoldColor => "bold-color",
            PreferenceKey::Font => "font",
            PreferenceKey::UseSystemFont => "use-system-font",
            PreferenceKey::ScrollbackLines => "scrollback-lines",
            PreferenceKey::CursorShape => "cursor-shape",
            PreferenceKey::CursorBlinkMode => "cursor-blink-mode",
            PreferenceKey::AudibleBell => "audible-bell",
            PreferenceKey::AllowBold => "allow-bold",
            PreferenceKey::BoldIsBright => "bold-is-bright",
            PreferenceKey::RewrapOnResize => "rewrap-on-resize",
            PreferenceKey::BackspaceBinding => "backspace-binding",
            PreferenceKey::DeleteBinding => "delete-binding",
            PreferenceKey::Encoding => "encoding",
            PreferenceKey::CellScale => "cell-scale",
            PreferenceKey::WordWiseSelectChars => "word-wise-select-chars",
            PreferenceKey::TerminalTitle => "terminal-title",
            PreferenceKey::VisibleName => "visible-name",
            PreferenceKey::ExitAction => "exit-action",
            PreferenceKey::CustomCommand => "custom-command",
            PreferenceKey::LoginShell => "login-shell",
            PreferenceKey::UnsafePasteAlert => "unsafe-paste-alert",
            PreferenceKey::StripFirstCommentChar => "strip-first-comment-char-on-paste",
            PreferenceKey::StripTrailingWhitespace => "strip-trailing-whitespace-on-paste",
            PreferenceKey::ConfirmClose => "confirm-close-with-running-process",
            PreferenceKey::DefaultProfile => "default-profile",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys applied by [`TerminalPane::apply_preferences_all`], one per family
pub const APPLY_ALL_ORDER: [PreferenceKey; 15] = [
    PreferenceKey::Palette,
    PreferenceKey::Font,
    PreferenceKey::ScrollbackLines,
    PreferenceKey::CursorShape,
    PreferenceKey::CursorBlinkMode,
    PreferenceKey::AudibleBell,
    PreferenceKey::AllowBold,
    PreferenceKey::BoldIsBright,
    PreferenceKey::RewrapOnResize,
    PreferenceKey::BackspaceBinding,
    PreferenceKey::DeleteBinding,
    PreferenceKey::Encoding,
    PreferenceKey::CellScale,
    PreferenceKey::WordWiseSelectChars,
    PreferenceKey::TerminalTitle,
];

type Handler<B> = fn(&TerminalPane<B>);

fn dispatch_table<B: PaneBackend>() -> [(PreferenceKey, Handler<B>); 22] {
    [
        (PreferenceKey::ForegroundColor, TerminalPane::<B>::apply_colors),
        (PreferenceKey::BackgroundColor, TerminalPane::<B>::apply_colors),
        (PreferenceKey::Palette, TerminalPane::<B>::apply_colors),
        (PreferenceKey::BackgroundTransparency, TerminalPane::<B>::apply_colors),
        (PreferenceKey::CursorColors, TerminalPane::<B>::apply_colors),
        (PreferenceKey::HighlightColors, TerminalPane::<B>::apply_colors),
        (PreferenceKey::BoldColor, TerminalPane::<B>::apply_colors),
        (PreferenceKey::Font, TerminalPane::<B>::apply_font),
        (PreferenceKey::UseSystemFont, TerminalPane::<B>::apply_font),
        (PreferenceKey::ScrollbackLines, |p| p.backend().set_scrollback_lines(p.profile().effective_scrollback())),
        (PreferenceKey::CursorShape, |p| p.backend().set_cursor_shape(p.profile().cursor_shape)),
        (PreferenceKey::CursorBlinkMode, |p| p.backend().set_cursor_blink_mode(p.profile().cursor_blink_mode)),
        (PreferenceKey::AudibleBell, |p| p.backend().set_audible_bell(p.profile().audible_bell)),
        (PreferenceKey::AllowBold, |p| p.backend().set_allow_bold(p.profile().allow_bold)),
        (PreferenceKey::BoldIsBright, |p| p.backend().set_bold_is_bright(p.profile().bold_is_bright)),
        (PreferenceKey::RewrapOnResize, |p| p.backend().set_rewrap_on_resize(p.profile().rewrap_on_resize)),
        (PreferenceKey::BackspaceBinding, |p| p.backend().set_backspace_binding(p.profile().backspace_binding)),
        (PreferenceKey::DeleteBinding, |p| p.backend().set_delete_binding(p.profile().delete_binding)),
        (PreferenceKey::Encoding, TerminalPane::<B>::apply_encoding),
        (PreferenceKey::CellScale, |p| {
            let profile = p.profile();
            p.backend().set_cell_scale(profile.cell_width_scale, profile.cell_height_scale)
        }),
        (PreferenceKey::WordWiseSelectChars, |p| {
            p.backend().set_word_char_exceptions(&p.profile().word_wise_select_chars)
        }),
        (PreferenceKey::TerminalTitle, |p| {
            p.update_title();
        }),
    ]
}

/// Handler for `key`, `None` for keys without a widget effect
pub(crate) fn handler_for<B: PaneBackend>(key: PreferenceKey) -> Option<Handler<B>> {
    dispatch_table::<B>()
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, h)| h)
}

fn parse_or(field: &str, value: &str, fallback: Rgba) -> Rgba {
    Rgba::parse_field(field, value).unwrap_or_else(|e| {
        warn!("{}, keeping previous value", e);
        fallback
    })
}

fn parse_pair_or(field: &str, bg: &str, fg: &str, fallback: Option<(Rgba, Rgba)>) -> Option<(Rgba, Rgba)> {
    match (Rgba::parse_field(field, bg), Rgba::parse_field(field, fg)) {
        (Ok(bg), Ok(fg)) => Some((bg, fg)),
        (Err(e), _) | (_, Err(e)) => {
            warn!("{}, keeping previous value", e);
            fallback
        }
    }
}

/// Colors used before any profile was applied
pub fn default_color_set() -> ColorSet {
    ColorSet {
        foreground: Rgba::parse(DEFAULT_FOREGROUND).unwrap_or_default(),
        background: Rgba::parse(DEFAULT_BACKGROUND).unwrap_or_else(|| Rgba::rgb(0.0, 0.0, 0.0)),
        palette: DEFAULT_PALETTE.iter().map(|c| Rgba::parse(c).unwrap_or_default()).collect(),
        cursor: None,
        highlight: None,
        bold: None,
    }
}

/// Derive the full color set from `profile`.
///
/// A value that fails to parse keeps its entry from `previous`.
pub fn derive_colors(profile: &Profile, previous: &ColorSet) -> ColorSet {
    let foreground = parse_or("foreground-color", &profile.foreground_color, previous.foreground);
    let alpha = 1.0 - f64::from(profile.background_transparency_percent.min(100)) / 100.0;
    let background = parse_or("background-color", &profile.background_color, previous.background).with_alpha(alpha);

    let palette = (0..PALETTE_SIZE)
        .map(|i| {
            let fallback = previous.palette.get(i).copied().unwrap_or_default();
            match profile.palette.get(i) {
                Some(value) => parse_or(&format!("palette[{}]", i), value, fallback),
                None => {
                    debug!("Palette entry {} missing, keeping previous value", i);
                    fallback
                }
            }
        })
        .collect();

    let cursor = profile
        .use_cursor_color
        .then(|| {
            parse_pair_or("cursor-colors", &profile.cursor_background_color, &profile.cursor_foreground_color, previous.cursor)
        })
        .flatten();
    let highlight = profile
        .use_highlight_color
        .then(|| {
            parse_pair_or(
                "highlight-colors",
                &profile.highlight_background_color,
                &profile.highlight_foreground_color,
                previous.highlight,
            )
        })
        .flatten();
    let bold = profile
        .use_bold_color
        .then(|| match Rgba::parse_field("bold-color", &profile.bold_color) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("{}, keeping previous value", e);
                previous.bold
            }
        })
        .flatten();

    ColorSet { foreground, background, palette, cursor, highlight, bold }
}

impl<B: PaneBackend> TerminalPane<B> {
    /// Apply one changed setting; keys without a widget effect are no-ops.
    pub fn apply_preference(&self, key: PreferenceKey) {
        match handler_for::<B>(key) {
            Some(handler) => {
                debug!("Applying preference {}", key);
                handler(self);
            }
            None => debug!("Preference {} has nothing to apply", key),
        }
    }

    /// Apply a setting by its settings-file name; unknown names are no-ops.
    pub fn apply_preference_named(&self, name: &str) {
        match PreferenceKey::from_name(name) {
            Some(key) => self.apply_preference(key),
            None => debug!("Ignoring unknown preference '{}'", name),
        }
    }

    pub fn apply_preferences_all(&self) {
        for key in APPLY_ALL_ORDER {
            self.apply_preference(key);
        }
    }

    pub(crate) fn apply_colors(&self) {
        let previous = self.applied_colors.borrow().clone();
        let colors = derive_colors(&self.profile(), &previous);
        self.backend().set_colors(&colors);
        *self.applied_colors.borrow_mut() = colors;
    }

    pub(crate) fn apply_font(&self) {
        let profile = self.profile();
        let font = (!profile.use_system_font).then_some(profile.font.as_str());
        if let Err(e) = self.backend().set_font(font) {
            warn!("{}, keeping previous font", e);
        }
    }

    pub(crate) fn apply_encoding(&self) {
        let encoding = self.encoding();
        if let Err(e) = self.backend().set_encoding(&encoding) {
            warn!("{}, keeping previous encoding", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for key in PreferenceKey::ALL {
            assert_eq!(PreferenceKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(PreferenceKey::from_name("no-such-key"), None);
    }

    #[test]
    fn test_every_apply_all_key_has_a_handler() {
        use crate::dummy_backend::RecordingBackend;
        for key in APPLY_ALL_ORDER {
            assert!(handler_for::<RecordingBackend>(key).is_some(), "{key}");
        }
        assert!(handler_for::<RecordingBackend>(PreferenceKey::ExitAction).is_none());
    }

    #[test]
    fn test_derive_colors_applies_transparency() {
        let profile = Profile::default().with_colors("#ff0000", "#00ff00").with_transparency(25);
        let colors = derive_colors(&profile, &default_color_set());
        assert_eq!(colors.foreground, Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(colors.background, Rgba::rgba(0.0, 1.0, 0.0, 0.75));
        assert_eq!(colors.palette.len(), PALETTE_SIZE);
        assert_eq!(colors.cursor, None);
    }

    #[test]
    fn test_derive_colors_keeps_previous_on_bad_value() {
        let mut previous = default_color_set();
        previous.palette[3] = Rgba::rgb(0.5, 0.5, 0.5);
        let mut profile = Profile::default().with_colors("bogus", "#000000");
        profile.palette[3] = "nope".to_string();
        profile.palette.truncate(10);

        let colors = derive_colors(&profile, &previous);
        assert_eq!(colors.foreground, previous.foreground);
        assert_eq!(colors.palette[3], Rgba::rgb(0.5, 0.5, 0.5));
        assert_eq!(colors.palette[12], previous.palette[12]);
        assert_eq!(colors.palette.len(), PALETTE_SIZE);
    }

    #[test]
    fn test_optional_colors() {
        let mut profile = Profile::default();
        profile.use_cursor_color = true;
        profile.cursor_background_color = "#111111".to_string();
        profile.cursor_foreground_color = "#eeeeee".to_string();
        profile.use_bold_color = true;
        profile.bold_color = "#ffff00".to_string();
        let colors = derive_colors(&profile, &default_color_set());
        assert!(colors.cursor.is_some());
        assert_eq!(colors.bold, Some(Rgba::rgb(1.0, 1.0, 0.0)));
        assert_eq!(colors.highlight, None);
    }
}
