//! Paste safety checks
//!
//! Multi-line pastes containing `sudo` can run privileged commands before the
//! user has a chance to read them; they are held back for confirmation.

use memchr::{memchr, memmem};

use crate::config::AppSettings;

/// What the pane should do with clipboard text
#[derive(Clone, Debug, PartialEq)]
pub enum PasteDecision {
    /// Forward the text to the child right away
    Paste(String),
    /// Ask the user before forwarding the text
    Confirm(String),
}

/// A paste is unsafe if it mentions sudo and is not a single line.
pub fn is_unsafe_paste(text: &str) -> bool {
    let bytes = text.as_bytes();
    if memmem::find(bytes, b"sudo").is_none() {
        return false;
    }
    // A single trailing newline still executes, so it counts as multi-line
    memchr(b'\n', bytes).is_some() || memchr(b'\r', bytes).is_some()
}

/// Apply the paste transforms enabled in `settings`
pub fn prepare_paste(text: &str, settings: &AppSettings) -> String {
    let mut text = text;
    if settings.strip_first_comment_char_on_paste {
        if let Some(stripped) = text.strip_prefix('#').or_else(|| text.strip_prefix('$')) {
            text = stripped;
        }
    }
    if settings.strip_trailing_whitespace_on_paste {
        text = text.trim_end();
    }
    text.to_string()
}

/// Decide how to paste `text`.
///
/// `ignored` is the pane's "do not warn again" flag; once the user accepted
/// an unsafe paste in a pane it stays set for that pane's lifetime.
pub fn decide(text: &str, ignored: bool, settings: &AppSettings) -> PasteDecision {
    let text = prepare_paste(text, settings);
    if is_unsafe_paste(&text) && !ignored && settings.unsafe_paste_alert {
        PasteDecision::Confirm(text)
    } else {
        PasteDecision::Paste(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(alert: bool) -> AppSettings {
        AppSettings {
            unsafe_paste_alert: alert,
            ..AppSettings::default()
        }
    }

    #[test]
    fn test_decision_table() {
        let safe = "ls -la\ncd /tmp\n";
        let unsafe_text = "sudo rm -rf /tmp/x\necho done\n";

        // no sudo: paste whatever the flags say
        assert_eq!(decide(safe, false, &settings(true)), PasteDecision::Paste(safe.to_string()));
        // sudo, already ignored
        assert_eq!(decide(unsafe_text, true, &settings(true)), PasteDecision::Paste(unsafe_text.to_string()));
        // sudo, not ignored, alert enabled
        assert_eq!(decide(unsafe_text, false, &settings(true)), PasteDecision::Confirm(unsafe_text.to_string()));
        // sudo, not ignored, alert disabled
        assert_eq!(decide(unsafe_text, false, &settings(false)), PasteDecision::Paste(unsafe_text.to_string()));
    }

    #[test]
    fn test_single_line_sudo_is_safe() {
        assert!(!is_unsafe_paste("sudo apt update"));
        assert!(is_unsafe_paste("sudo apt update\n"));
        assert!(!is_unsafe_paste("echo one\necho two"));
    }

    #[test]
    fn test_strip_first_comment_char() {
        let s = AppSettings {
            strip_first_comment_char_on_paste: true,
            ..AppSettings::default()
        };
        assert_eq!(prepare_paste("$ make install", &s), " make install");
        assert_eq!(prepare_paste("# apt install vim", &s), " apt install vim");
        assert_eq!(prepare_paste("##twice", &s), "#twice");
        assert_eq!(prepare_paste("plain", &s), "plain");
        // disabled by default
        assert_eq!(prepare_paste("$ make", &AppSettings::default()), "$ make");
    }

    #[test]
    fn test_strip_trailing_whitespace_turns_unsafe_into_single_line() {
        let s = AppSettings {
            strip_trailing_whitespace_on_paste: true,
            ..AppSettings::default()
        };
        assert_eq!(decide("sudo reboot\n", false, &s), PasteDecision::Paste("sudo reboot".to_string()));
    }
}
