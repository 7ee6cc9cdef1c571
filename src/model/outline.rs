//! Document outline types.

use serde::{Deserialize, Serialize};

use super::HeadingLevel;

/// One heading of a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level (H1 through H3)
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (0-indexed)
    pub page: u32,
}

/// Title plus ordered headings of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title (empty when no title-level text was found)
    pub title: String,
    /// Headings in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Number of headings at each outline level, H1 first.
    pub fn level_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for entry in &self.outline {
            if let HeadingLevel::Heading(n @ 1..=3) = entry.level {
                counts[n as usize - 1] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_json_shape() {
        let outline = DocumentOutline {
            title: "Annual Report".into(),
            outline: vec![OutlineEntry {
                level: HeadingLevel::Heading(1),
                text: "Overview".into(),
                page: 0,
            }],
        };
        let value = serde_json::to_value(&outline).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Annual Report",
                "outline": [{"level": "H1", "text": "Overview", "page": 0}]
            })
        );
    }

    #[test]
    fn test_level_counts() {
        let entry = |n, text: &str| OutlineEntry {
            level: HeadingLevel::Heading(n),
            text: text.into(),
            page: 0,
        };
        let outline = DocumentOutline {
            title: String::new(),
            outline: vec![entry(1, "a"), entry(2, "b"), entry(2, "c")],
        };
        assert_eq!(outline.level_counts(), [1, 2, 0]);
        assert!(!outline.is_empty());
        assert!(DocumentOutline::default().is_empty());
    }
}
