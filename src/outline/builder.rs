//! Title and outline extraction from classified elements.

use crate::model::{ClassifiedElement, DocumentOutline, HeadingLevel, OutlineEntry};

use super::extract::is_symbol_noise;

/// Build a document outline in one pass over classified elements.
///
/// The title is the first `TITLE` element's text. `H1`–`H3` elements become
/// outline entries with 0-indexed pages, except symbol-only noise.
pub fn build_outline(elements: &[ClassifiedElement]) -> DocumentOutline {
    let mut title: Option<String> = None;
    let mut outline = Vec::new();

    for element in elements {
        let Some(level) = element.level else {
            continue;
        };
        let text = element.text().trim();

        match level {
            HeadingLevel::Title => {
                if title.is_none() {
                    title = Some(text.to_string());
                }
            }
            level if level.is_outline_level() => {
                if text.is_empty() || is_symbol_noise(text) {
                    continue;
                }
                outline.push(OutlineEntry {
                    level,
                    text: text.to_string(),
                    page: element.page().saturating_sub(1),
                });
            }
            _ => {}
        }
    }

    DocumentOutline {
        title: title.unwrap_or_default(),
        outline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextElement;

    fn classified(text: &str, page: u32, level: Option<HeadingLevel>) -> ClassifiedElement {
        ClassifiedElement::new(TextElement::new(text, 12.0, page), level)
    }

    #[test]
    fn test_first_title_wins() {
        let elements = vec![
            classified("  Annual Report ", 1, Some(HeadingLevel::Title)),
            classified("Overview", 1, Some(HeadingLevel::Heading(1))),
            classified("Appendix Title", 4, Some(HeadingLevel::Title)),
        ];
        let outline = build_outline(&elements);
        assert_eq!(outline.title, "Annual Report");
        assert_eq!(outline.outline.len(), 1);
    }

    #[test]
    fn test_pages_are_zero_based() {
        let elements = vec![
            classified("Intro", 1, Some(HeadingLevel::Heading(1))),
            classified("Details", 3, Some(HeadingLevel::Heading(2))),
            classified("Edge", 0, Some(HeadingLevel::Heading(3))),
        ];
        let pages: Vec<u32> = build_outline(&elements)
            .outline
            .iter()
            .map(|e| e.page)
            .collect();
        assert_eq!(pages, vec![0, 2, 0]);
    }

    #[test]
    fn test_skips_body_deep_levels_and_noise() {
        let elements = vec![
            classified("body text", 1, None),
            classified("Deep", 1, Some(HeadingLevel::Heading(4))),
            classified("--", 1, Some(HeadingLevel::Heading(1))),
            classified("1", 2, Some(HeadingLevel::Heading(2))),
        ];
        let outline = build_outline(&elements);
        assert!(outline.title.is_empty());
        assert_eq!(outline.outline.len(), 1);
        assert_eq!(outline.outline[0].text, "1");
    }

    #[test]
    fn test_idempotent() {
        let elements = vec![
            classified("Title", 1, Some(HeadingLevel::Title)),
            classified("A", 1, Some(HeadingLevel::Heading(1))),
            classified("B", 2, Some(HeadingLevel::Heading(2))),
        ];
        assert_eq!(build_outline(&elements), build_outline(&elements));
    }
}
