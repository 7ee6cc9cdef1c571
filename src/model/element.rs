//! Text elements and heading levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deepest heading level that appears in an outline.
pub const MAX_OUTLINE_DEPTH: u8 = 3;

/// A line of text with its font size, as pulled from a parsed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Trimmed line text
    pub text: String,
    /// Mean font size of the line in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page: u32,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
        }
    }
}

/// Structural level inferred for a text element.
///
/// Levels order from `Title` (outermost) to deeper `Heading(n)`; `Heading(0)`
/// is never constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HeadingLevel {
    /// Document title
    Title,
    /// Heading `H{n}`, n ≥ 1
    Heading(u8),
}

impl HeadingLevel {
    /// Level for the cluster of the given rank (0 = largest font size).
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::Title,
            n => HeadingLevel::Heading(n.min(u8::MAX as usize) as u8),
        }
    }

    /// 0 for the title, `n` for `H{n}`.
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::Heading(n) => n,
        }
    }

    /// Whether this level is emitted in an outline (H1 through H3).
    pub fn is_outline_level(self) -> bool {
        matches!(self, HeadingLevel::Heading(n) if (1..=MAX_OUTLINE_DEPTH).contains(&n))
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::Title => write!(f, "TITLE"),
            HeadingLevel::Heading(n) => write!(f, "H{}", n),
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("title") {
            return Ok(HeadingLevel::Title);
        }
        s.strip_prefix(['H', 'h'])
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| *n >= 1)
            .map(HeadingLevel::Heading)
            .ok_or_else(|| format!("invalid heading level: {}", s))
    }
}

impl From<HeadingLevel> for String {
    fn from(level: HeadingLevel) -> Self {
        level.to_string()
    }
}

impl TryFrom<String> for HeadingLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A text element annotated with its inferred level (`None` = body text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedElement {
    /// The underlying element
    #[serde(flatten)]
    pub element: TextElement,
    /// Inferred level
    pub level: Option<HeadingLevel>,
}

impl ClassifiedElement {
    /// Annotate an element with a level.
    pub fn new(element: TextElement, level: Option<HeadingLevel>) -> Self {
        Self { element, level }
    }

    /// Element text.
    pub fn text(&self) -> &str {
        &self.element.text
    }

    /// Page number (1-indexed).
    pub fn page(&self) -> u32 {
        self.element.page
    }
}
