//! Options for collection analysis.

use crate::chunk::DEFAULT_PARA_LIMIT;
use crate::outline::ClassifierOptions;
use crate::parser::ParseOptions;
use crate::rank::RankOptions;

/// Settings for every stage of a collection run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// PDF parsing
    pub parse: ParseOptions,
    /// Heading-level classification
    pub classifier: ClassifierOptions,
    /// Paragraph size limit in characters
    pub para_limit: usize,
    /// Ranking
    pub ranking: RankOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            classifier: ClassifierOptions::default(),
            para_limit: DEFAULT_PARA_LIMIT,
            ranking: RankOptions::default(),
        }
    }
}

impl AnalysisOptions {
    /// Create new analysis options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set classifier options.
    pub fn with_classifier(mut self, options: ClassifierOptions) -> Self {
        self.classifier = options;
        self
    }

    /// Set the requested font-size cluster count.
    pub fn with_clusters(mut self, n: usize) -> Self {
        self.classifier = self.classifier.with_clusters(n);
        self
    }

    /// Set the paragraph size limit.
    pub fn with_para_limit(mut self, limit: usize) -> Self {
        self.para_limit = limit.max(1);
        self
    }

    /// Set ranking options.
    pub fn with_ranking(mut self, options: RankOptions) -> Self {
        self.ranking = options;
        self
    }

    /// Set the number of results per pool.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.ranking = self.ranking.with_top_k(k);
        self
    }

    /// Set the embedding batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.ranking = self.ranking.with_batch_size(size);
        self
    }
}
