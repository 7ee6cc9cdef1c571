//! Per-document pipeline and collection ranking.

use std::path::Path;

use chrono::Utc;

use crate::chunk::{ChunkAssembler, ChunkStrategy, ParagraphChunker};
use crate::error::{Error, Result};
use crate::model::{Chunk, ChunkPools, DocumentOutline, RankedResult};
use crate::outline::{extract_elements, outline_from_elements, ClassifierOptions};
use crate::parser::{ParseOptions, PdfParser};
use crate::rank::{Embedder, RelevanceRanker};

use super::job::JobDescriptor;
use super::options::AnalysisOptions;
use super::report::{CollectionReport, ReportMetadata};

/// Outline of a single PDF file.
pub fn outline_for_file(path: impl AsRef<Path>, options: &ClassifierOptions) -> Result<DocumentOutline> {
    let doc = PdfParser::open_with_options(path, ParseOptions::default())?.parse()?;
    Ok(outline_from_elements(&extract_elements(&doc), options))
}

/// Chunks of one document plus how they were built.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Document identifier
    pub document: String,
    /// Inferred outline
    pub outline: DocumentOutline,
    /// Chunk strategy used
    pub strategy: ChunkStrategy,
    /// Chunks in document order
    pub chunks: Vec<Chunk>,
}

/// Runs the outline, chunking and ranking pipeline over a job's documents.
pub struct CollectionAnalyzer<E: Embedder> {
    ranker: RelevanceRanker<E>,
    options: AnalysisOptions,
    assembler: ChunkAssembler,
}

impl<E: Embedder> CollectionAnalyzer<E> {
    /// Create an analyzer. The ranker's options are replaced by
    /// `options.ranking`.
    pub fn new(ranker: RelevanceRanker<E>, options: AnalysisOptions) -> Self {
        let embedder = ranker.into_embedder();
        Self {
            ranker: RelevanceRanker::new(embedder, options.ranking.clone()),
            options,
            assembler: ChunkAssembler::new(),
        }
    }

    /// Analysis options.
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Give back the ranker.
    pub fn into_ranker(self) -> RelevanceRanker<E> {
        self.ranker
    }

    /// Analyze every document of `job` found in `input_dir`.
    pub fn analyze(&mut self, job: &JobDescriptor, input_dir: impl AsRef<Path>) -> Result<CollectionReport> {
        self.analyze_with_progress(job, input_dir, |_| {})
    }

    /// Like [`analyze`](Self::analyze), calling `on_document` with each file
    /// name before it is processed.
    ///
    /// The job is validated first. Documents that cannot be read are logged
    /// and listed under `skipped_documents`; the rest are still ranked. A
    /// ranking failure empties only the affected pool.
    pub fn analyze_with_progress(
        &mut self,
        job: &JobDescriptor,
        input_dir: impl AsRef<Path>,
        mut on_document: impl FnMut(&str),
    ) -> Result<CollectionReport> {
        job.validate()?;
        let input_dir = input_dir.as_ref();

        let mut pools = ChunkPools::default();
        let mut input_documents = Vec::new();
        let mut skipped_documents = Vec::new();

        for doc in &job.documents {
            on_document(&doc.filename);
            match self.analyze_document(&input_dir.join(&doc.filename), &doc.filename) {
                Ok(analysis) => {
                    log::info!(
                        "{}: {} chunks ({:?}, {} headings)",
                        doc.filename,
                        analysis.chunks.len(),
                        analysis.strategy,
                        analysis.outline.outline.len()
                    );
                    pools.extend(analysis.chunks);
                    input_documents.push(doc.filename.clone());
                }
                Err(e) => {
                    log::warn!("skipping {}", e);
                    skipped_documents.push(doc.filename.clone());
                }
            }
        }

        if pools.is_empty() {
            log::warn!("no chunks extracted from {} documents", job.documents.len());
        }

        let sections = self.rank_pool("section", &pools.headings, job);
        let paragraphs = self.rank_pool("paragraph", &pools.paragraphs, job);

        let metadata = ReportMetadata {
            input_documents,
            skipped_documents,
            persona: job.persona().to_string(),
            job_to_be_done: job.task().to_string(),
            processing_timestamp: Utc::now(),
        };
        Ok(CollectionReport::new(metadata, sections, paragraphs))
    }

    /// Rank one pool; a failing embedder leaves that pool empty.
    fn rank_pool(&mut self, pool_name: &str, pool: &[Chunk], job: &JobDescriptor) -> Vec<RankedResult> {
        self.ranker
            .rank(pool, job.persona(), job.task())
            .unwrap_or_else(|e| {
                log::warn!("{} ranking failed, pool left empty: {}", pool_name, e);
                Vec::new()
            })
    }

    /// Parse one PDF and build its chunks.
    ///
    /// Any parse failure, or a document without pages, is reported as
    /// [`Error::UnreadableDocument`].
    pub fn analyze_document(&self, path: &Path, document: &str) -> Result<DocumentAnalysis> {
        let parsed = PdfParser::open_with_options(path, self.options.parse.clone())
            .and_then(|parser| parser.parse())
            .map_err(|e| Error::unreadable(document, e))?;
        if parsed.page_count == 0 {
            return Err(Error::unreadable(document, "document has no pages"));
        }

        let elements = extract_elements(&parsed);
        let outline = outline_from_elements(&elements, &self.options.classifier);
        let paragraphs = ParagraphChunker::new(self.options.para_limit).chunk_document(&parsed);
        let (strategy, chunks) = self.assembler.assemble(document, &outline, &paragraphs);

        Ok(DocumentAnalysis {
            document: document.to_string(),
            outline,
            strategy,
            chunks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{HashingEmbedder, RankOptions};

    #[test]
    fn test_missing_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let job = JobDescriptor::new("Planner", "Plan", ["missing.pdf"]);
        let ranker = RelevanceRanker::new(HashingEmbedder::default(), RankOptions::default());
        let mut analyzer = CollectionAnalyzer::new(ranker, AnalysisOptions::default());

        let report = analyzer.analyze(&job, dir.path()).unwrap();
        assert!(report.metadata.input_documents.is_empty());
        assert_eq!(report.metadata.skipped_documents, vec!["missing.pdf"]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_invalid_job_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let job = JobDescriptor::new("", "Plan", ["a.pdf"]);
        let ranker = RelevanceRanker::new(HashingEmbedder::default(), RankOptions::default());
        let mut analyzer = CollectionAnalyzer::new(ranker, AnalysisOptions::default());

        let mut seen = Vec::new();
        let result = analyzer.analyze_with_progress(&job, dir.path(), |name| seen.push(name.to_string()));
        assert!(matches!(result, Err(Error::InvalidJob(_))));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_ranking_options_come_from_analysis_options() {
        let ranker = RelevanceRanker::new(HashingEmbedder::default(), RankOptions::default());
        let analyzer = CollectionAnalyzer::new(ranker, AnalysisOptions::new().with_top_k(9));
        assert_eq!(analyzer.into_ranker().options().top_k, 9);
    }
}
