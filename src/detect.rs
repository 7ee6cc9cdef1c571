//! PDF header sniffing.
//!
//! Collection inputs are plain file names, so every document is checked for a
//! `%PDF-x.y` header before `lopdf` is asked to load it. Readers tolerate up to
//! 1 KiB of leading garbage before the header, and so do we.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header marker that opens every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Bytes of the version number following the marker, e.g. `1.7`.
const VERSION_LEN: usize = 3;
/// How far into the file the header may start.
const HEADER_WINDOW: usize = 1024;

/// Information read from a PDF file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read the header of a file on disk.
pub fn sniff_file<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut head = Vec::with_capacity(HEADER_WINDOW + PDF_MAGIC.len() + VERSION_LEN);
    File::open(path)?
        .take((HEADER_WINDOW + PDF_MAGIC.len() + VERSION_LEN) as u64)
        .read_to_end(&mut head)?;
    sniff_bytes(&head)
}

/// Read the header from the start of an in-memory document.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_WINDOW + PDF_MAGIC.len() + VERSION_LEN)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version, offset })
}

/// `1.0` through `2.x`.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == VERSION_LEN
        && matches!(bytes[0], b'1' | b'2')
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}

/// Whether the file at `path` looks like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    sniff_file(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid_header() {
        let header = sniff_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
        assert_eq!(header.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_sniff_header_after_garbage() {
        let mut data = vec![b' '; 40];
        data.extend_from_slice(b"%PDF-2.0\n");
        let header = sniff_bytes(&data).unwrap();
        assert_eq!(header.version, "2.0");
        assert_eq!(header.offset, 40);
    }

    #[test]
    fn test_sniff_rejects_other_formats() {
        assert!(matches!(
            sniff_bytes(b"<!DOCTYPE html><html></html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(sniff_bytes(b""), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_bytes(b"%PDF-1"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_rejects_bad_version() {
        assert!(matches!(
            sniff_bytes(b"%PDF-9.9\n"),
            Err(Error::UnsupportedVersion(v)) if v == "9.9"
        ));
    }

    #[test]
    fn test_is_pdf_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.pdf");
        let bad = dir.path().join("bad.pdf");
        std::fs::write(&good, b"%PDF-1.4\n%%EOF").unwrap();
        std::fs::write(&bad, b"plain text").unwrap();

        assert!(is_pdf(&good));
        assert!(!is_pdf(&bad));
        assert!(!is_pdf(dir.path().join("missing.pdf")));
    }
}
