// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_ENCODING, DEFAULT_FONT, DEFAULT_FOREGROUND, DEFAULT_PALETTE,
    DEFAULT_PROFILE_NAME, DEFAULT_TITLE_TEMPLATE, SCROLLBACK_LIMIT,
};

/// Available cursor shapes for terminals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorShape {
    /// Solid block cursor
    #[default]
    Block,
    /// Vertical bar cursor
    Ibeam,
    /// Underscore cursor
    Underline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorBlinkMode {
    /// Follow the desktop setting
    #[default]
    System,
    On,
    Off,
}

/// What the backspace or delete key sends to the child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EraseBinding {
    #[default]
    Auto,
    AsciiBackspace,
    AsciiDelete,
    DeleteSequence,
    Tty,
}

/// What happens to the pane once its child process exits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitAction {
    #[default]
    Close,
    Restart,
    Hold,
    None,
}

/// Named bundle of appearance and behavior settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Profile {
    pub id: Uuid,
    pub visible_name: String,

    // Colors
    pub foreground_color: String,
    pub background_color: String,
    pub palette: Vec<String>,
    /// 0 is opaque, 100 fully transparent
    pub background_transparency_percent: u8,
    pub use_cursor_color: bool,
    pub cursor_background_color: String,
    pub cursor_foreground_color: String,
    pub use_highlight_color: bool,
    pub highlight_background_color: String,
    pub highlight_foreground_color: String,
    pub use_bold_color: bool,
    pub bold_color: String,

    // Text
    pub use_system_font: bool,
    pub font: String,
    pub allow_bold: bool,
    pub bold_is_bright: bool,
    pub cell_height_scale: f64,
    pub cell_width_scale: f64,
    pub word_wise_select_chars: String,

    // Behavior
    pub scrollback_unlimited: bool,
    pub scrollback_lines: i64,
    pub cursor_shape: CursorShape,
    pub cursor_blink_mode: CursorBlinkMode,
    pub audible_bell: bool,
    pub rewrap_on_resize: bool,
    pub backspace_binding: EraseBinding,
    pub delete_binding: EraseBinding,
    pub encoding: String,
    pub terminal_title: String,

    // Command
    pub exit_action: ExitAction,
    pub login_shell: bool,
    pub use_custom_command: bool,
    pub custom_command: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            visible_name: DEFAULT_PROFILE_NAME.to_string(),
            foreground_color: DEFAULT_FOREGROUND.to_string(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            background_transparency_percent: 0,
            use_cursor_color: false,
            cursor_background_color: DEFAULT_FOREGROUND.to_string(),
            cursor_foreground_color: DEFAULT_BACKGROUND.to_string(),
            use_highlight_color: false,
            highlight_background_color: DEFAULT_FOREGROUND.to_string(),
            highlight_foreground_color: DEFAULT_BACKGROUND.to_string(),
            use_bold_color: false,
            bold_color: DEFAULT_FOREGROUND.to_string(),
            use_system_font: true,
            font: DEFAULT_FONT.to_string(),
            allow_bold: true,
            bold_is_bright: false,
            cell_height_scale: 1.0,
            cell_width_scale: 1.0,
            word_wise_select_chars: "-,./?%&#:_".to_string(),
            scrollback_unlimited: false,
            scrollback_lines: SCROLLBACK_LIMIT,
            cursor_shape: CursorShape::Block,
            cursor_blink_mode: CursorBlinkMode::System,
            audible_bell: false,
            rewrap_on_resize: true,
            backspace_binding: EraseBinding::AsciiDelete,
            delete_binding: EraseBinding::DeleteSequence,
            encoding: DEFAULT_ENCODING.to_string(),
            terminal_title: DEFAULT_TITLE_TEMPLATE.to_string(),
            exit_action: ExitAction::Close,
            login_shell: false,
            use_custom_command: false,
            custom_command: String::new(),
        }
    }
}

impl Profile {
    pub fn new(name: &str) -> Self {
        Self {
            visible_name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, fg: &str, bg: &str) -> Self {
        self.foreground_color = fg.to_string();
        self.background_color = bg.to_string();
        self
    }

    pub fn with_font(mut self, font: &str) -> Self {
        self.use_system_font = false;
        self.font = font.to_string();
        self
    }

    pub fn with_exit_action(mut self, action: ExitAction) -> Self {
        self.exit_action = action;
        self
    }

    pub fn with_custom_command(mut self, command: &str) -> Self {
        self.use_custom_command = true;
        self.custom_command = command.to_string();
        self
    }

    pub fn with_title(mut self, template: &str) -> Self {
        self.terminal_title = template.to_string();
        self
    }

    pub fn with_transparency(mut self, percent: u8) -> Self {
        self.background_transparency_percent = percent.min(100);
        self
    }

    /// Scrollback length in the form VTE expects, -1 meaning unlimited
    pub fn effective_scrollback(&self) -> i64 {
        if self.scrollback_unlimited {
            -1
        } else {
            self.scrollback_lines.max(0)
        }
    }
}

/// Application-wide settings shared by every pane
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppSettings {
    pub unsafe_paste_alert: bool,
    pub strip_first_comment_char_on_paste: bool,
    pub strip_trailing_whitespace_on_paste: bool,
    pub confirm_close_with_running_process: bool,
    pub default_profile: Option<Uuid>,
    /// Title template for profiles that leave theirs empty
    pub default_title_template: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            unsafe_paste_alert: true,
            strip_first_comment_char_on_paste: false,
            strip_trailing_whitespace_on_paste: false,
            confirm_close_with_running_process: true,
            default_profile: None,
            default_title_template: DEFAULT_TITLE_TEMPLATE.to_string(),
        }
    }
}

/// On-disk settings document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SettingsFile {
    pub app: AppSettings,
    pub profiles: Vec<Profile>,
}

/// Overrides given on the command line, honored by the first spawn only
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandLineOverrides {
    pub working_directory: Option<PathBuf>,
    pub command: Option<String>,
    pub profile_name: Option<String>,
}

impl CommandLineOverrides {
    pub fn is_empty(&self) -> bool {
        self.working_directory.is_none() && self.command.is_none() && self.profile_name.is_none()
    }
}
