//! PDF parsing module.

mod content;
mod layout;
mod options;
mod pdf_parser;

pub use content::TextSpan;
pub use layout::{
    group_lines_into_blocks, group_spans_into_lines, PageNode, ParsedDocument, ParsedPage,
    TextBlock, TextLine,
};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
