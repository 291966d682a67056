// src/constants.rs

// Drag and drop targets
pub const URI_LIST_MIME: &str = "text/uri-list";
pub const PLAIN_TEXT_MIME: &str = "text/plain;charset=utf-8";
pub const PLAIN_TEXT_MIME_BARE: &str = "text/plain";
pub const TERMINAL_MIME: &str = "application/x-hugopane-terminal";

// Environment exported to every spawned child
pub const TERMINAL_ID_ENV: &str = "TERMINAL_ID";

// Title template tokens
pub const TOKEN_TITLE: &str = "title";
pub const TOKEN_ICON_TITLE: &str = "iconTitle";
pub const TOKEN_ID: &str = "id";
pub const TOKEN_DIRECTORY: &str = "directory";
pub const TOKEN_COLUMNS: &str = "columns";
pub const TOKEN_ROWS: &str = "rows";

pub const DEFAULT_TITLE_TEMPLATE: &str = "${id}: ${title}";
pub const DEFAULT_PROFILE_NAME: &str = "Default";

// Appearance defaults
pub const DEFAULT_FONT: &str = "Monospace 12";
pub const DEFAULT_FOREGROUND: &str = "#ffffff";
pub const DEFAULT_BACKGROUND: &str = "#000000";
pub const SCROLLBACK_LIMIT: i64 = 8192;
pub const DEFAULT_ENCODING: &str = "UTF-8";

// Tango palette
pub const DEFAULT_PALETTE: [&str; 16] = [
    "#000000", "#cc0000", "#4e9a06", "#c4a000",
    "#3465a4", "#75507b", "#06989a", "#d3d7cf",
    "#555753", "#ef2929", "#8ae234", "#fce94f",
    "#729fcf", "#ad7fa8", "#34e2e2", "#eeeeec",
];

pub const PALETTE_SIZE: usize = 16;

// Shell fallback when neither $SHELL nor a custom command is available
pub const FALLBACK_SHELL: &str = "/bin/sh";

// Exit status messages
pub const MSG_EXITED_NORMALLY: &str = "The child process exited normally with status";
pub const MSG_ABORTED_BY_SIGNAL: &str = "The child process was aborted by signal";
pub const MSG_ABORTED: &str = "The child process was aborted.";
pub const MSG_SPAWN_FAILED: &str = "Unable to launch the child process";

// Settings file
pub const SETTINGS_DIR: &str = "hugopane";
pub const SETTINGS_FILE: &str = "settings.toml";
