//! Paragraphs, chunks and ranking results.

use serde::{Deserialize, Serialize};

/// A paragraph of normalized text on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Normalized text (lines joined with `\n`)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Paragraph {
    /// Create a new paragraph.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Which pool a chunk is ranked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// A heading-anchored section
    Heading,
    /// A standalone paragraph
    Paragraph,
}

/// The unit of relevance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Pool the chunk belongs to
    pub kind: ChunkKind,
    /// Source document identifier
    pub source: String,
    /// Body text (may be empty for heading chunks)
    pub text: String,
    /// Page number (0-indexed)
    pub page: u32,
    /// Heading text, or a generic page label for paragraph chunks
    pub label: Option<String>,
}

impl Chunk {
    /// Text handed to the embedder: the heading for heading chunks, the body otherwise.
    pub fn embedding_text(&self) -> &str {
        match (self.kind, self.label.as_deref()) {
            (ChunkKind::Heading, Some(label)) if !label.trim().is_empty() => label,
            _ => &self.text,
        }
    }

    /// Title shown in results: the label, or the body when there is none.
    pub fn display_title(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.text)
    }
}

/// Heading and paragraph chunks, ranked independently.
#[derive(Debug, Clone, Default)]
pub struct ChunkPools {
    /// Heading-anchored chunks
    pub headings: Vec<Chunk>,
    /// Paragraph chunks
    pub paragraphs: Vec<Chunk>,
}

impl ChunkPools {
    /// Append chunks to the pool matching their kind.
    pub fn extend(&mut self, chunks: impl IntoIterator<Item = Chunk>) {
        for chunk in chunks {
            match chunk.kind {
                ChunkKind::Heading => self.headings.push(chunk),
                ChunkKind::Paragraph => self.paragraphs.push(chunk),
            }
        }
    }

    /// Total number of chunks.
    pub fn len(&self) -> usize {
        self.headings.len() + self.paragraphs.len()
    }

    /// Check if both pools are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One ranked chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Source document identifier
    pub document: String,
    /// Page number (0-indexed)
    pub page: u32,
    /// Chunk label, or its text when unlabeled
    pub section_title: String,
    /// Chunk body text
    pub refined_text: String,
    /// 1-based rank within the pool
    pub importance_rank: usize,
    /// Cosine similarity to the query
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(kind: ChunkKind, label: Option<&str>, text: &str) -> Chunk {
        Chunk {
            kind,
            source: "doc.pdf".into(),
            text: text.into(),
            page: 0,
            label: label.map(String::from),
        }
    }

    #[test]
    fn test_embedding_text_by_kind() {
        assert_eq!(
            chunk(ChunkKind::Heading, Some("Budget"), "body").embedding_text(),
            "Budget"
        );
        assert_eq!(
            chunk(ChunkKind::Heading, Some("  "), "body").embedding_text(),
            "body"
        );
        assert_eq!(
            chunk(ChunkKind::Paragraph, Some("Page 2"), "body").embedding_text(),
            "body"
        );
    }

    #[test]
    fn test_pools_split_by_kind() {
        let mut pools = ChunkPools::default();
        pools.extend(vec![
            chunk(ChunkKind::Heading, Some("A"), ""),
            chunk(ChunkKind::Paragraph, None, "p"),
            chunk(ChunkKind::Heading, Some("B"), ""),
        ]);
        assert_eq!(pools.headings.len(), 2);
        assert_eq!(pools.paragraphs.len(), 1);
        assert_eq!(pools.len(), 3);
        assert_eq!(pools.paragraphs[0].display_title(), "p");
    }

    #[test]
    fn test_paragraph_word_count() {
        assert_eq!(Paragraph::new("one two\nthree", 1).word_count(), 3);
    }
}
