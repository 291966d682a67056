//! Title template expansion

use std::path::PathBuf;

use crate::constants::{
    TOKEN_COLUMNS, TOKEN_DIRECTORY, TOKEN_ICON_TITLE, TOKEN_ID, TOKEN_ROWS, TOKEN_TITLE,
};

/// Values substituted into a title template
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TitleInputs {
    pub title: String,
    pub icon_title: String,
    pub id: u32,
    pub directory: String,
    pub columns: u32,
    pub rows: u32,
}

impl TitleInputs {
    fn lookup(&self, token: &str) -> Option<String> {
        match token {
            TOKEN_TITLE => Some(self.title.clone()),
            TOKEN_ICON_TITLE => Some(self.icon_title.clone()),
            TOKEN_ID => Some(self.id.to_string()),
            TOKEN_DIRECTORY => Some(self.directory.clone()),
            TOKEN_COLUMNS => Some(self.columns.to_string()),
            TOKEN_ROWS => Some(self.rows.to_string()),
            _ => None,
        }
    }
}

/// Expand `${token}` placeholders in `template`.
///
/// Single pass: substituted text is never scanned again, so a window title
/// containing `${id}` is shown literally. Unknown tokens are kept as written.
pub fn format_title(template: &str, inputs: &TitleInputs) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let token = &after[..end];
                match inputs.lookup(token) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode a `file://` URI reported by the emulator into a local path.
///
/// Returns an empty string when there is no URI yet or it does not decode.
pub fn directory_from_uri(uri: Option<&str>) -> String {
    uri.and_then(uri_to_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = url::Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
