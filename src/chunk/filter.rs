//! Quality filter for standalone paragraph chunks.

use regex::Regex;

use crate::model::Paragraph;

/// Paragraphs under this many words are dropped.
const MIN_WORDS: usize = 15;

/// List items and heading-like lines under this many words are dropped.
const MIN_STRUCTURED_WORDS: usize = 25;

/// Rejects paragraphs too short or too structural to rank on their own.
#[derive(Debug, Clone)]
pub struct ParagraphFilter {
    list_marker: Regex,
}

impl Default for ParagraphFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphFilter {
    /// Create a new filter.
    pub fn new() -> Self {
        Self {
            // 1.  2)  a.  (b)  iv.  •  -  followed by text
            list_marker: Regex::new(
                r"^\s*(?:\d{1,3}[.)]|[A-Za-z][.)]|\([A-Za-z0-9]{1,4}\)|[ivxlcdmIVXLCDM]{1,6}[.)]|[•‣◦▪■\-–*])\s+\S",
            )
            .expect("list marker pattern is valid"),
        }
    }

    /// Whether the paragraph should become a chunk.
    pub fn accepts(&self, paragraph: &Paragraph) -> bool {
        self.rejection(&paragraph.text).is_none()
    }

    /// Reason a text is rejected, if any.
    pub fn rejection(&self, text: &str) -> Option<&'static str> {
        let text = text.trim();
        let words = text.split_whitespace().count();

        if !text.chars().any(char::is_alphabetic) {
            return Some("no alphabetic characters");
        }
        if is_digits_or_single_letter(text) {
            return Some("digits or single letter");
        }
        if words < MIN_WORDS {
            return Some("too short");
        }
        if words < MIN_STRUCTURED_WORDS {
            if self.list_marker.is_match(text) {
                return Some("list item");
            }
            if is_all_caps(text) || is_title_case(text) {
                return Some("heading-like");
            }
        }
        None
    }

    /// Keep the paragraphs that pass, in order.
    pub fn filter<'a>(&'a self, paragraphs: &'a [Paragraph]) -> impl Iterator<Item = &'a Paragraph> + 'a {
        paragraphs.iter().filter(move |p| self.accepts(p))
    }
}

fn is_digits_or_single_letter(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => true,
        _ => text.chars().all(|c| c.is_ascii_digit()),
    }
}

fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Every word that starts with a letter starts upper-case.
fn is_title_case(text: &str) -> bool {
    let mut saw_word = false;
    for word in text.split_whitespace() {
        let Some(first) = word.chars().find(|c| c.is_alphabetic()) else {
            continue;
        };
        if first.is_lowercase() {
            return false;
        }
        saw_word = true;
    }
    saw_word
}
