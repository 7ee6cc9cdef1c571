//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{sniff_bytes, sniff_file};
use crate::error::Result;

use super::content::ContentReader;
use super::layout::{group_lines_into_blocks, group_spans_into_lines, PageNode, ParsedDocument, ParsedPage};
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    version: String,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let header = sniff_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::with_document(doc, header.version, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let header = sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::with_document(doc, header.version, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn with_document(doc: LopdfDocument, version: String, options: ParseOptions) -> Self {
        if doc.is_encrypted() {
            log::warn!("document is encrypted; text may not be decodable");
        }
        Self {
            doc,
            version,
            options,
        }
    }

    /// Number of pages in the file.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Parse every selected page into text blocks and XObject nodes.
    pub fn parse(&self) -> Result<ParsedDocument> {
        let page_ids = self.doc.get_pages();
        let reader = ContentReader::new(&self.doc);
        let mut document = ParsedDocument {
            version: self.version.clone(),
            page_count: page_ids.len() as u32,
            pages: Vec::with_capacity(page_ids.len()),
        };

        for (&page_num, &page_id) in page_ids.iter() {
            if !self.options.includes(page_num) {
                continue;
            }

            let mut page = ParsedPage::new(page_num);
            match reader.read_page(page_id) {
                Ok(content) => {
                    let lines = group_spans_into_lines(content.spans);
                    page.nodes.extend(
                        group_lines_into_blocks(lines)
                            .into_iter()
                            .filter(|b| !b.is_empty())
                            .map(PageNode::Text),
                    );
                    page.nodes
                        .extend(content.xobjects.into_iter().map(PageNode::XObject));
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to read content of page {}: {}", page_num, e);
                }
            }
            log::debug!("page {}: {} nodes", page_num, page.nodes.len());
            document.pages.push(page);
        }

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_from_bytes_rejects_non_pdf() {
        assert!(matches!(
            PdfParser::from_bytes(b"hello world, not a pdf"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_pdf() {
        let result = PdfParser::from_bytes(b"%PDF-1.7\n1 0 obj\n<<");
        assert!(result.is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let result = PdfParser::open("/definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
