//! Persona/job analysis of a document collection.

mod analyzer;
mod job;
mod options;
mod report;

pub use analyzer::{outline_for_file, CollectionAnalyzer, DocumentAnalysis};
pub use job::{ChallengeInfo, DocumentRef, JobDescriptor, JobToBeDone, Persona};
pub use options::AnalysisOptions;
pub use report::{CollectionReport, ExtractedSection, ReportMetadata, SubsectionAnalysis};
