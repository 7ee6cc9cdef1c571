//! Paragraph extraction with sentence-boundary soft splitting.

use std::path::Path;

use crate::error::Result;
use crate::model::Paragraph;
use crate::parser::{ParseOptions, ParsedDocument, PdfParser};

/// Default paragraph size limit in characters.
pub const DEFAULT_PARA_LIMIT: usize = 400;

/// Splits parsed pages into size-bounded paragraphs.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    para_limit: usize,
    parse_options: ParseOptions,
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(DEFAULT_PARA_LIMIT)
    }
}

impl ParagraphChunker {
    /// Create a chunker with the given character limit (minimum 1).
    pub fn new(para_limit: usize) -> Self {
        Self {
            para_limit: para_limit.max(1),
            parse_options: ParseOptions::default(),
        }
    }

    /// Set the options used by [`chunk_file`](Self::chunk_file).
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Character limit per paragraph.
    pub fn para_limit(&self) -> usize {
        self.para_limit
    }

    /// Paragraphs of every text block, in page order.
    pub fn chunk_document(&self, doc: &ParsedDocument) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        for page in &doc.pages {
            for block in page.text_blocks() {
                let Some(text) = normalize(&block.text()) else {
                    continue;
                };
                paragraphs.extend(
                    self.soft_split(&text)
                        .into_iter()
                        .map(|chunk| Paragraph::new(chunk, page.number)),
                );
            }
        }
        paragraphs
    }

    /// Open, parse and chunk a PDF.
    ///
    /// A document that cannot be read yields no paragraphs.
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Vec<Paragraph> {
        let path = path.as_ref();
        match self.try_chunk_file(path) {
            Ok(paragraphs) => paragraphs,
            Err(e) => {
                log::warn!("could not extract paragraphs from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn try_chunk_file(&self, path: &Path) -> Result<Vec<Paragraph>> {
        let doc = PdfParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(self.chunk_document(&doc))
    }

    /// Split text at sentence boundaries into chunks of at most `para_limit`
    /// characters.
    ///
    /// Each chunk is a verbatim slice of `text`. A sentence longer than the
    /// limit is kept whole as its own chunk.
    pub fn soft_split(&self, text: &str) -> Vec<String> {
        if text.chars().count() <= self.para_limit {
            return vec![text.to_string()];
        }

        let sentences = sentence_spans(text);
        let mut chunks = Vec::new();
        let mut current: Option<(usize, usize)> = None;

        for (start, end) in sentences {
            current = match current {
                None => Some((start, end)),
                Some((chunk_start, _)) if text[chunk_start..end].chars().count() <= self.para_limit => {
                    Some((chunk_start, end))
                }
                Some((chunk_start, chunk_end)) => {
                    chunks.push(text[chunk_start..chunk_end].to_string());
                    Some((start, end))
                }
            };
        }
        if let Some((start, end)) = current {
            chunks.push(text[start..end].to_string());
        }
        chunks
    }
}

/// Trim each line, drop blank lines and rejoin with `\n`.
pub fn normalize(text: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Byte ranges of sentences, excluding the whitespace between them.
///
/// A boundary is `.`, `!` or `?` followed by whitespace and then another
/// non-whitespace character.
fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let mut next_start = None;
        let mut saw_space = false;
        while let Some(&(j, n)) = chars.peek() {
            if n.is_whitespace() {
                saw_space = true;
                chars.next();
            } else {
                next_start = Some(j);
                break;
            }
        }
        if let (true, Some(next)) = (saw_space, next_start) {
            spans.push((start, end));
            start = next;
        }
    }
    if start < text.len() {
        spans.push((start, text.trim_end().len().max(start)));
    }
    spans
}
