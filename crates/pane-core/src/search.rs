//! Find-in-terminal pattern building

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchOptions {
    pub pattern: String,
    pub match_case: bool,
    pub entire_word: bool,
    /// Treat `pattern` as a regular expression instead of literal text
    pub regex: bool,
    pub wrap_around: bool,
}

impl SearchOptions {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            wrap_around: true,
            ..Self::default()
        }
    }

    /// Pattern handed to the emulator's regex engine, `None` clears the search
    pub fn to_pattern(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return None;
        }
        let mut pattern = if self.regex {
            self.pattern.clone()
        } else {
            regex::escape(&self.pattern)
        };
        if self.entire_word {
            pattern = format!(r"\b{}\b", pattern);
        }
        Some(pattern)
    }

    pub fn case_insensitive(&self) -> bool {
        !self.match_case
    }
}
