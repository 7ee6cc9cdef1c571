//! Layout grouping: spans into lines, lines into blocks.
//!
//! Pages are treated as a single column read top to bottom. Every line keeps
//! its spans so downstream stages can see per-span font sizes and style
//! flags, and every block keeps its lines so paragraph text can be rebuilt
//! with the original line breaks.

use std::cmp::Ordering;

use super::content::{is_spaceless_script_char, TextSpan};

/// Fraction of the font size two baselines may differ by and still share a line.
const BASELINE_TOLERANCE: f32 = 0.3;
/// Spacing multiple (relative to the page average) that opens a new block.
const BLOCK_GAP_FACTOR: f32 = 1.5;
/// Font size change, in points, that opens a new block.
const BLOCK_FONT_DELTA: f32 = 1.0;
/// Left-margin shift, in points, that opens a new block.
const BLOCK_INDENT_DELTA: f32 = 20.0;
/// Line spacing assumed when a page has fewer than two lines.
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// A text line composed of spans sharing a baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Text-length weighted mean font size of the spans
    pub font_size: f32,
}

impl TextLine {
    /// Build a line from spans; returns `None` for an empty span list.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Option<Self> {
        if spans.is_empty() {
            return None;
        }
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

        let total_chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
        let font_size = if total_chars > 0 {
            spans
                .iter()
                .map(|s| s.font_size * s.text.chars().count() as f32)
                .sum::<f32>()
                / total_chars as f32
        } else {
            spans[0].font_size
        };

        Some(Self {
            y: spans[0].y,
            x: spans[0].x,
            font_size,
            spans,
        })
    }

    /// Combined text of the spans, with a space wherever the horizontal gap
    /// between two spans suggests one (never between spaceless-script characters).
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                let prev = &self.spans[i - 1];
                let gap = span.x - (prev.x + prev.width);
                let chars = span.text.chars().count().max(1) as f32;
                let threshold = span.width / chars * 0.2;

                let prev_last = prev.text.chars().last();
                let curr_first = span.text.chars().next();
                let both_spaceless = matches!(
                    (prev_last, curr_first),
                    (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
                );
                let has_space = result.ends_with(char::is_whitespace)
                    || curr_first.map_or(false, char::is_whitespace);

                if gap > threshold && !both_spaceless && !has_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
        }

        result
    }

    /// Whether most of the line's characters are set in a bold face.
    pub fn is_bold(&self) -> bool {
        let (bold, total) = self.spans.iter().fold((0usize, 0usize), |(b, t), s| {
            let n = s.text.chars().count();
            (if s.is_bold { b + n } else { b }, t + n)
        });
        total > 0 && bold * 2 > total
    }
}

/// A block of consecutive lines (paragraph or heading).
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// The lines in this block, top to bottom
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Block text with one line per `\n`, the way paragraph extraction expects it.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the block carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text().trim().is_empty())
    }
}

/// A node of a parsed page, classified once at parse time.
#[derive(Debug, Clone)]
pub enum PageNode {
    /// A block of text lines
    Text(TextBlock),
    /// An external object drawn on the page (image or form), by resource name
    XObject(String),
}

impl PageNode {
    /// The text block, if this node carries text.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            PageNode::Text(block) => Some(block),
            PageNode::XObject(_) => None,
        }
    }
}

/// A parsed page: its 1-based number and nodes in reading order.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Nodes in reading order
    pub nodes: Vec<PageNode>,
}

impl ParsedPage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            nodes: Vec::new(),
        }
    }

    /// Iterate over the text blocks of the page.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.nodes.iter().filter_map(PageNode::as_text)
    }
}

/// A parsed PDF document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// PDF version from the file header
    pub version: String,
    /// Total pages in the file (parsed or not)
    pub page_count: u32,
    /// Parsed pages in order
    pub pages: Vec<ParsedPage>,
}

impl ParsedDocument {
    /// Whether any page produced text.
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| p.text_blocks().next().is_some())
    }
}

/// Group spans into lines by baseline, top to bottom then left to right.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF Y grows upwards: larger Y comes first.
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * BASELINE_TOLERANCE;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                lines.extend(TextLine::from_spans(std::mem::take(&mut current)));
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    lines.extend(TextLine::from_spans(current));

    lines
}

/// Group lines into blocks on spacing, font size and indentation changes.
pub fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(TextBlock {
                    lines: std::mem::take(&mut current),
                });
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(TextBlock { lines: current });
    }

    log::debug!("grouped lines into {} blocks", blocks.len());
    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        DEFAULT_LINE_SPACING
    } else {
        spacings.iter().sum::<f32>() / spacings.len() as f32
    }
}

fn should_break_block(prev: &TextLine, curr: &TextLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * BLOCK_GAP_FACTOR
        || (prev.font_size - curr.font_size).abs() > BLOCK_FONT_DELTA
        || (prev.x - curr.x).abs() > BLOCK_INDENT_DELTA
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x: f32, y: f32, size: f32) -> TextSpan {
        TextSpan::new(text.to_string(), x, y, size, "Helvetica".to_string())
    }

    #[test]
    fn test_line_font_size_is_weighted() {
        let line = TextLine::from_spans(vec![span("ab", 0.0, 0.0, 10.0), span("cdef", 50.0, 0.0, 16.0)])
            .unwrap();
        assert!((line.font_size - 14.0).abs() < 1e-4);
        assert!(TextLine::from_spans(vec![]).is_none());
    }

    #[test]
    fn test_line_text_inserts_gaps() {
        let line = TextLine::from_spans(vec![
            span("World", 100.0, 700.0, 10.0),
            span("Hello", 10.0, 700.0, 10.0),
        ])
        .unwrap();
        assert_eq!(line.text(), "Hello World");

        // Adjacent spans of one word stay glued.
        let glued = TextLine::from_spans(vec![span("Hel", 0.0, 0.0, 10.0), span("lo", 15.0, 0.0, 10.0)])
            .unwrap();
        assert_eq!(glued.text(), "Hello");
    }

    #[test]
    fn test_group_spans_into_lines_orders_top_down() {
        let spans = vec![
            span("second", 10.0, 680.0, 10.0),
            span("first", 10.0, 700.0, 10.0),
            span("same", 80.0, 701.0, 10.0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first same");
        assert_eq!(lines[1].text(), "second");
    }

    #[test]
    fn test_group_lines_into_blocks_breaks_on_gap_and_font() {
        let lines = group_spans_into_lines(vec![
            span("Heading", 10.0, 760.0, 18.0),
            span("body one", 10.0, 730.0, 10.0),
            span("body two", 10.0, 718.0, 10.0),
            span("body three", 10.0, 706.0, 10.0),
            span("far away", 10.0, 600.0, 10.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text(), "Heading");
        assert_eq!(blocks[1].text(), "body one\nbody two\nbody three");
        assert_eq!(blocks[2].text(), "far away");
    }

    #[test]
    fn test_is_bold_majority() {
        let mut bold = span("Bold words", 0.0, 0.0, 12.0);
        bold.is_bold = true;
        let line = TextLine::from_spans(vec![bold, span("x", 90.0, 0.0, 12.0)]).unwrap();
        assert!(line.is_bold());
    }

    #[test]
    fn test_page_nodes_filter_text() {
        let block = TextBlock {
            lines: vec![TextLine::from_spans(vec![span("text", 0.0, 0.0, 10.0)]).unwrap()],
        };
        let page = ParsedPage {
            number: 1,
            nodes: vec![PageNode::XObject("Im1".into()), PageNode::Text(block)],
        };
        assert_eq!(page.text_blocks().count(), 1);
        assert!(!page.text_blocks().next().unwrap().is_empty());
    }
}
