//! Heading-level inference and outline extraction.
//!
//! Text lines are pulled from parsed pages, their font sizes clustered into
//! levels, and the levels reduced to a title plus H1–H3 outline.

mod builder;
mod classifier;
mod extract;
mod kmeans;

pub use builder::build_outline;
pub use classifier::{is_heading_shaped, promote, ClassifierOptions, FontLevelClassifier};
pub use extract::extract_elements;
pub use kmeans::{kmeans_1d, Kmeans1d};

use crate::model::{DocumentOutline, TextElement};
use crate::parser::ParsedDocument;

/// Classify elements and build the outline.
///
/// Returns an empty outline when there is nothing to classify.
pub fn outline_from_elements(
    elements: &[TextElement],
    options: &ClassifierOptions,
) -> DocumentOutline {
    match FontLevelClassifier::new(options.clone()).classify(elements) {
        Some(classified) => build_outline(&classified),
        None => {
            log::warn!("no text elements to classify");
            DocumentOutline::default()
        }
    }
}

/// Run the whole outline pipeline on a parsed document.
pub fn outline_from_document(doc: &ParsedDocument, options: &ClassifierOptions) -> DocumentOutline {
    outline_from_elements(&extract_elements(doc), options)
}
