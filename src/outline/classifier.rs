//! Font-size clustering into heading levels.

use crate::model::{ClassifiedElement, HeadingLevel, TextElement};

use super::kmeans::kmeans_1d;

/// Maximum whitespace tokens for upper-case text to count as a heading.
const MAX_HEADING_WORDS: usize = 10;

/// Options for [`FontLevelClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Requested number of font-size clusters
    pub n_clusters: usize,

    /// Treat the smallest cluster as body text (no level) when there are at
    /// least two clusters
    pub body_cluster: bool,

    /// Promote short all-caps text one level
    pub promote_uppercase: bool,

    /// Upper bound on k-means iterations
    pub max_iterations: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            n_clusters: 4,
            body_cluster: true,
            promote_uppercase: true,
            max_iterations: 100,
        }
    }
}

impl ClassifierOptions {
    /// Create new classifier options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested cluster count (minimum 1).
    pub fn with_clusters(mut self, n: usize) -> Self {
        self.n_clusters = n.max(1);
        self
    }

    /// Enable or disable the body-text cluster.
    pub fn with_body_cluster(mut self, enabled: bool) -> Self {
        self.body_cluster = enabled;
        self
    }

    /// Enable or disable upper-case promotion.
    pub fn with_uppercase_promotion(mut self, enabled: bool) -> Self {
        self.promote_uppercase = enabled;
        self
    }

    /// Set the k-means iteration limit.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n.max(1);
        self
    }
}

/// Assigns heading levels to text elements by clustering their font sizes.
#[derive(Debug, Clone, Default)]
pub struct FontLevelClassifier {
    options: ClassifierOptions,
}

impl FontLevelClassifier {
    /// Create a classifier with the given options.
    pub fn new(options: ClassifierOptions) -> Self {
        Self { options }
    }

    /// Classifier options.
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify elements, preserving their order.
    ///
    /// Cluster centers are ranked largest first: rank 0 is `TITLE`, rank `i`
    /// is `H{i}`. With body clustering enabled and two or more clusters, the
    /// smallest cluster gets no level. Returns `None` when no element has a
    /// finite font size.
    pub fn classify(&self, elements: &[TextElement]) -> Option<Vec<ClassifiedElement>> {
        let sizes: Vec<f64> = elements.iter().map(|e| e.font_size as f64).collect();
        let clusters = kmeans_1d(&sizes, self.options.n_clusters, self.options.max_iterations)?;
        let k = clusters.k();

        if k < self.options.n_clusters {
            log::debug!(
                "requested {} clusters but only {} distinct font sizes",
                self.options.n_clusters,
                k
            );
        }
        log::debug!(
            "font-size centers {:?} after {} iterations",
            clusters.centers,
            clusters.iterations
        );

        let body_rank = (self.options.body_cluster && k >= 2).then(|| k - 1);

        let classified = elements
            .iter()
            .zip(&sizes)
            .map(|(element, &size)| {
                let rank = clusters.nearest(size);
                let mut level = match body_rank {
                    Some(body) if rank == body => None,
                    _ => Some(HeadingLevel::from_rank(rank)),
                };
                if self.options.promote_uppercase && is_heading_shaped(&element.text) {
                    level = promote(level);
                }
                ClassifiedElement::new(element.clone(), level)
            })
            .collect();

        Some(classified)
    }
}

/// Short text whose cased characters are all upper-case.
pub fn is_heading_shaped(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased && text.split_whitespace().count() <= MAX_HEADING_WORDS
}

/// Move a level one step toward the root.
///
/// `H2` becomes `H1`, `H3` becomes `H2` and body text becomes `H3`. Every
/// other level stays put, so levels below the outline depth never enter it.
pub fn promote(level: Option<HeadingLevel>) -> Option<HeadingLevel> {
    match level {
        None => Some(HeadingLevel::Heading(3)),
        Some(HeadingLevel::Heading(n @ 2..=3)) => Some(HeadingLevel::Heading(n - 1)),
        other => other,
    }
}
