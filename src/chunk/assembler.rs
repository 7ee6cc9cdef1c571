//! Chunk assembly from outlines and paragraphs.

use crate::model::{Chunk, ChunkKind, DocumentOutline, Paragraph};

use super::filter::ParagraphFilter;

/// How a document's chunks were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// One chunk per outline heading
    HeadingAnchored,
    /// One chunk per paragraph that passes the quality filter
    ParagraphOnly,
}

/// Builds ranking chunks for one document.
#[derive(Debug, Clone, Default)]
pub struct ChunkAssembler {
    filter: ParagraphFilter,
}

impl ChunkAssembler {
    /// Create a new assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build chunks, anchored on headings when the outline has any.
    pub fn assemble(
        &self,
        source: &str,
        outline: &DocumentOutline,
        paragraphs: &[Paragraph],
    ) -> (ChunkStrategy, Vec<Chunk>) {
        if outline.is_empty() {
            (ChunkStrategy::ParagraphOnly, self.paragraph_chunks(source, paragraphs))
        } else {
            (
                ChunkStrategy::HeadingAnchored,
                self.heading_chunks(source, outline, paragraphs),
            )
        }
    }

    /// One chunk per outline entry.
    ///
    /// Entry `i` on page `p` collects the paragraphs on pages `[p, next)`,
    /// where `next` is the following entry's page (or `p + 1` for the last
    /// entry). When that range is empty the paragraphs on page `p` are used.
    pub fn heading_chunks(
        &self,
        source: &str,
        outline: &DocumentOutline,
        paragraphs: &[Paragraph],
    ) -> Vec<Chunk> {
        // Outline pages are 0-indexed, paragraph pages 1-indexed.
        let indexed: Vec<(u32, &str)> = paragraphs
            .iter()
            .map(|p| (p.page.saturating_sub(1), p.text.as_str()))
            .collect();

        let entries = &outline.outline;
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let start = entry.page;
                let end = entries
                    .get(i + 1)
                    .map_or(start.saturating_add(1), |next| next.page);

                let mut text = join_pages(&indexed, |page| start <= page && page < end);
                if text.is_empty() {
                    text = join_pages(&indexed, |page| page == start);
                }

                Chunk {
                    kind: ChunkKind::Heading,
                    source: source.to_string(),
                    text,
                    page: start,
                    label: Some(entry.text.clone()),
                }
            })
            .collect()
    }

    /// One chunk per paragraph that passes the quality filter.
    pub fn paragraph_chunks(&self, source: &str, paragraphs: &[Paragraph]) -> Vec<Chunk> {
        self.filter
            .filter(paragraphs)
            .map(|p| Chunk {
                kind: ChunkKind::Paragraph,
                source: source.to_string(),
                text: p.text.clone(),
                page: p.page.saturating_sub(1),
                label: Some(format!("Page {}", p.page)),
            })
            .collect()
    }
}

fn join_pages(paragraphs: &[(u32, &str)], keep: impl Fn(u32) -> bool) -> String {
    paragraphs
        .iter()
        .filter(|(page, _)| keep(*page))
        .map(|(_, text)| *text)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    const PROSE: &str = "Travellers who plan ahead can visit the old town, the vineyards \
                         and the coast within a single relaxed week of sightseeing.";

    fn outline(entries: &[(&str, u32)]) -> DocumentOutline {
        DocumentOutline {
            title: "Guide".into(),
            outline: entries
                .iter()
                .map(|(text, page)| OutlineEntry {
                    level: HeadingLevel::Heading(1),
                    text: text.to_string(),
                    page: *page,
                })
                .collect(),
        }
    }

    #[test]
    fn test_heading_chunks_cover_page_ranges() {
        let paragraphs = vec![
            Paragraph::new("p1", 1),
            Paragraph::new("p2a", 2),
            Paragraph::new("p2b", 2),
            Paragraph::new("p3", 3),
            Paragraph::new("p4", 4),
        ];
        let outline = outline(&[("Intro", 0), ("Middle", 1), ("End", 3)]);
        let (strategy, chunks) = ChunkAssembler::new().assemble("g.pdf", &outline, &paragraphs);

        assert_eq!(strategy, ChunkStrategy::HeadingAnchored);
        let got: Vec<_> = chunks
            .iter()
            .map(|c| (c.label.as_deref().unwrap(), c.text.as_str(), c.page))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Intro", "p1", 0),
                ("Middle", "p2a p2b p3", 1),
                ("End", "p4", 3),
            ]
        );
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::Heading));
    }

    #[test]
    fn test_same_page_headings_fall_back_to_page() {
        let paragraphs = vec![Paragraph::new("only", 1), Paragraph::new("later", 2)];
        let outline = outline(&[("A", 0), ("B", 0), ("C", 5)]);
        let chunks = ChunkAssembler::new().heading_chunks("d.pdf", &outline, &paragraphs);

        assert_eq!(chunks[0].text, "only");
        assert_eq!(chunks[1].text, "only later");
        assert_eq!(chunks[2].text, "");
        assert_eq!(chunks[2].embedding_text(), "C");
    }

    #[test]
    fn test_paragraph_chunks_labels_and_filter() {
        let paragraphs = vec![
            Paragraph::new(PROSE, 1),
            Paragraph::new("Short", 2),
            Paragraph::new(PROSE, 3),
        ];
        let (strategy, chunks) =
            ChunkAssembler::new().assemble("d.pdf", &DocumentOutline::default(), &paragraphs);

        assert_eq!(strategy, ChunkStrategy::ParagraphOnly);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].label.as_deref(), Some("Page 1"));
        assert_eq!(chunks[0].page, 0);
        assert_eq!(chunks[1].label.as_deref(), Some("Page 3"));
        assert_eq!(chunks[1].page, 2);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::Paragraph));
    }
}
