//! Drag and drop state and payload decoding

use uuid::Uuid;

use crate::constants::{PLAIN_TEXT_MIME, PLAIN_TEXT_MIME_BARE, TERMINAL_MIME, URI_LIST_MIME};
use crate::quadrant::Quadrant;
use crate::title::uri_to_path;

/// Formats a pane accepts, in order of preference
pub const DROP_TARGETS: [&str; 4] = [TERMINAL_MIME, URI_LIST_MIME, PLAIN_TEXT_MIME, PLAIN_TEXT_MIME_BARE];

/// Hover state of a drop target; only meaningful between motion and
/// leave/drop/end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    pub active: bool,
    pub quadrant: Option<Quadrant>,
}

impl DragState {
    pub fn hover(&mut self, quadrant: Quadrant) -> bool {
        let changed = !self.active || self.quadrant != Some(quadrant);
        self.active = true;
        self.quadrant = Some(quadrant);
        changed
    }

    pub fn reset(&mut self) -> bool {
        let changed = self.active;
        *self = DragState::default();
        changed
    }
}

/// Decoded content of a drop
#[derive(Clone, Debug, PartialEq)]
pub enum DropPayload {
    /// Another pane, identified by its UUID
    Terminal(Uuid),
    Uris(Vec<String>),
    Text(String),
}

impl DropPayload {
    /// Decode dropped data; unrecognized formats or malformed data yield `None`.
    pub fn decode(mime: &str, data: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(data).ok()?;
        match mime {
            TERMINAL_MIME => Uuid::parse_str(text.trim()).ok().map(DropPayload::Terminal),
            URI_LIST_MIME => {
                let uris = parse_uri_list(text);
                (!uris.is_empty()).then_some(DropPayload::Uris(uris))
            }
            PLAIN_TEXT_MIME | PLAIN_TEXT_MIME_BARE => Some(DropPayload::Text(text.to_string())),
            _ => None,
        }
    }

    /// Text fed to the child for non-terminal drops
    pub fn feed_text(&self) -> Option<String> {
        match self {
            DropPayload::Terminal(_) => None,
            DropPayload::Text(text) => Some(text.clone()),
            DropPayload::Uris(uris) => {
                let args: Vec<String> = uris
                    .iter()
                    .map(|uri| match uri_to_path(uri) {
                        Some(path) => shell_quote(&path.to_string_lossy()),
                        None => shell_quote(uri),
                    })
                    .collect();
                Some(format!("{} ", args.join(" ")))
            }
        }
    }
}

/// Parse a text/uri-list body (RFC 2483): one URI per line, '#' comments
pub fn parse_uri_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim_end_matches('\r').trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Quote `s` for a POSIX shell
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_terminal() {
        let id = Uuid::new_v4();
        let payload = DropPayload::decode(TERMINAL_MIME, id.to_string().as_bytes());
        assert_eq!(payload, Some(DropPayload::Terminal(id)));
        assert_eq!(DropPayload::decode(TERMINAL_MIME, b"not-a-uuid"), None);
    }

    #[test]
    fn test_unknown_mime_is_ignored() {
        assert_eq!(DropPayload::decode("image/png", b"\x89PNG"), None);
        assert_eq!(DropPayload::decode(PLAIN_TEXT_MIME, &[0xff, 0xfe]), None);
    }

    #[test]
    #[cfg(unix)]
    fn test_uri_list_feeds_quoted_paths() {
        let payload = DropPayload::decode(
            URI_LIST_MIME,
            b"# comment\r\nfile:///tmp/a%20b\r\nfile:///it's\r\nhttps://example.com/x\r\n",
        )
        .unwrap();
        assert_eq!(
            payload.feed_text().unwrap(),
            r"'/tmp/a b' '/it'\''s' 'https://example.com/x' "
        );
        assert_eq!(DropPayload::decode(URI_LIST_MIME, b"# only comments\n"), None);
    }

    #[test]
    fn test_drag_state_transitions() {
        let mut state = DragState::default();
        assert!(state.hover(Quadrant::Top));
        assert!(!state.hover(Quadrant::Top));
        assert!(state.hover(Quadrant::Left));
        assert!(state.reset());
        assert!(!state.reset());
        assert_eq!(state, DragState::default());
    }
}
