//! # pdfsense
//!
//! PDF outline extraction and persona-driven relevance ranking.
//!
//! The library infers a document's title and H1–H3 headings from font-size
//! clustering, and ranks the sections and paragraphs of a document
//! collection against a persona and the job they need done.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsense::{extract_outline, render};
//!
//! fn main() -> pdfsense::Result<()> {
//!     let outline = extract_outline("document.pdf")?;
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! Ranking a collection:
//!
//! ```no_run
//! use pdfsense::{AnalysisOptions, CollectionAnalyzer, HashingEmbedder, JobDescriptor,
//!                RankOptions, RelevanceRanker};
//!
//! fn main() -> pdfsense::Result<()> {
//!     let job = JobDescriptor::from_path("input/job.json")?;
//!     let ranker = RelevanceRanker::new(HashingEmbedder::default(), RankOptions::default());
//!     let mut analyzer = CollectionAnalyzer::new(ranker, AnalysisOptions::default());
//!     let report = analyzer.analyze(&job, "input")?;
//!     println!("{} sections ranked", report.extracted_sections.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading inference**: deterministic 1-D k-means over font sizes
//! - **Chunking**: heading-anchored sections or filtered paragraphs
//! - **Ranking**: any [`Embedder`]; a hashing embedder ships in-crate and
//!   MiniLM sentence embeddings are available with the `fastembed` feature

pub mod chunk;
pub mod collection;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use chunk::{ChunkAssembler, ChunkStrategy, ParagraphChunker, ParagraphFilter};
pub use collection::{
    outline_for_file, AnalysisOptions, CollectionAnalyzer, CollectionReport, JobDescriptor,
};
pub use detect::{is_pdf, sniff_bytes, sniff_file, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    Chunk, ChunkKind, ChunkPools, ClassifiedElement, DocumentOutline, HeadingLevel, OutlineEntry,
    Paragraph, RankedResult, TextElement,
};
pub use outline::{build_outline, ClassifierOptions, FontLevelClassifier};
pub use parser::{ParseOptions, ParsedDocument, PdfParser};
#[cfg(feature = "fastembed")]
pub use rank::FastEmbedder;
pub use rank::{Embedder, HashingEmbedder, RankOptions, RelevanceRanker};
pub use render::JsonFormat;

use std::path::Path;

/// Parse a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfsense::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ParsedDocument> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Extract the title and H1–H3 outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfsense::extract_outline;
///
/// let outline = extract_outline("document.pdf").unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    outline_for_file(path, &ClassifierOptions::default())
}

/// Extract the outline of an in-memory PDF.
pub fn extract_outline_from_bytes(data: &[u8], options: &ClassifierOptions) -> Result<DocumentOutline> {
    let doc = parse_bytes(data)?;
    Ok(outline::outline_from_document(&doc, options))
}

/// Builder for single-document outline and paragraph extraction.
///
/// # Example
///
/// ```no_run
/// use pdfsense::Pdfsense;
///
/// let outline = Pdfsense::new()
///     .with_clusters(3)
///     .lenient()
///     .outline("document.pdf")?;
/// # Ok::<(), pdfsense::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pdfsense {
    parse_options: ParseOptions,
    classifier: ClassifierOptions,
    para_limit: Option<usize>,
}

impl Pdfsense {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Only parse the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.parse_options = self.parse_options.with_max_pages(pages);
        self
    }

    /// Set the requested font-size cluster count.
    pub fn with_clusters(mut self, n: usize) -> Self {
        self.classifier = self.classifier.with_clusters(n);
        self
    }

    /// Set classifier options.
    pub fn with_classifier(mut self, options: ClassifierOptions) -> Self {
        self.classifier = options;
        self
    }

    /// Set the paragraph size limit.
    pub fn with_para_limit(mut self, limit: usize) -> Self {
        self.para_limit = Some(limit);
        self
    }

    /// Parse a file and extract its outline.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let doc = PdfParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(outline::outline_from_document(&doc, &self.classifier))
    }

    /// Parse a file and split it into paragraphs.
    pub fn paragraphs<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Paragraph>> {
        let doc = PdfParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(self.chunker().chunk_document(&doc))
    }

    fn chunker(&self) -> ParagraphChunker {
        self.para_limit
            .map_or_else(ParagraphChunker::default, ParagraphChunker::new)
            .with_parse_options(self.parse_options.clone())
    }
}
