//! Text-element extraction from parsed pages.

use crate::model::TextElement;
use crate::parser::ParsedDocument;

/// Pull one [`TextElement`] per text line, in reading order.
///
/// Lines that are empty after trimming, or that are at most two characters
/// with nothing alphanumeric (bullets, dashes, stray punctuation), are skipped.
pub fn extract_elements(doc: &ParsedDocument) -> Vec<TextElement> {
    let mut elements = Vec::new();

    for page in &doc.pages {
        for block in page.text_blocks() {
            for line in &block.lines {
                let text = line.text();
                let text = text.trim();
                if text.is_empty() || is_symbol_noise(text) {
                    continue;
                }
                elements.push(TextElement::new(text, line.font_size, page.number));
            }
        }
    }

    log::debug!(
        "extracted {} text elements from {} pages",
        elements.len(),
        doc.pages.len()
    );
    elements
}

/// Text of at most two characters with no letter or digit.
pub(crate) fn is_symbol_noise(text: &str) -> bool {
    text.chars().count() <= 2 && !text.chars().any(char::is_alphanumeric)
}
