//! Collection report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::RankedResult;

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Documents that contributed chunks, in job order
    pub input_documents: Vec<String>,
    /// Documents that could not be read
    pub skipped_documents: Vec<String>,
    /// Persona role
    pub persona: String,
    /// Job task
    pub job_to_be_done: String,
    /// When the report was produced
    pub processing_timestamp: DateTime<Utc>,
}

/// A ranked heading-anchored section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document
    pub document: String,
    /// Page number (0-indexed)
    pub page: u32,
    /// Heading text
    pub section_title: String,
    /// Body text collected under the heading
    pub refined_text: String,
    /// 1-based rank
    pub importance_rank: usize,
    /// Similarity score, rounded to 4 decimals
    pub score: f64,
}

/// A ranked paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document
    pub document: String,
    /// Page number (0-indexed)
    pub page: u32,
    /// Paragraph text
    pub refined_text: String,
    /// 1-based rank
    pub importance_rank: usize,
    /// Similarity score, rounded to 4 decimals
    pub score: f64,
}

/// Result of analyzing a document collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// Run metadata
    pub metadata: ReportMetadata,
    /// Top heading chunks
    pub extracted_sections: Vec<ExtractedSection>,
    /// Top paragraph chunks
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl CollectionReport {
    /// Assemble a report from the ranked pools.
    pub fn new(
        metadata: ReportMetadata,
        sections: Vec<RankedResult>,
        paragraphs: Vec<RankedResult>,
    ) -> Self {
        Self {
            metadata,
            extracted_sections: sections
                .into_iter()
                .map(|r| ExtractedSection {
                    document: r.document,
                    page: r.page,
                    section_title: r.section_title,
                    refined_text: r.refined_text,
                    importance_rank: r.importance_rank,
                    score: round_score(r.score),
                })
                .collect(),
            subsection_analysis: paragraphs
                .into_iter()
                .map(|r| SubsectionAnalysis {
                    document: r.document,
                    page: r.page,
                    refined_text: r.refined_text,
                    importance_rank: r.importance_rank,
                    score: round_score(r.score),
                })
                .collect(),
        }
    }

    /// Whether neither pool produced results.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty() && self.subsection_analysis.is_empty()
    }
}

/// Round to 4 decimal places.
pub(crate) fn round_score(score: f32) -> f64 {
    (score as f64 * 10_000.0).round() / 10_000.0
}
