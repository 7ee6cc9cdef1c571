//! Shared helpers: small PDFs built in memory with lopdf.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One text line: content and font size in points.
pub type Line<'a> = (&'a str, f32);

/// Build a PDF where each page shows its lines top to bottom in Helvetica.
pub fn pdf_bytes(pages: &[&[Line]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760.0_f32;
        for (text, size) in lines.iter() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Real(*size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Real(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 24.0;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content encodes"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(612), Object::Integer(792)],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("document saves");
    bytes
}

/// Write a PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&[Line]]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, pdf_bytes(pages)).expect("pdf written");
    path
}

/// A sentence of prose long enough to pass the paragraph filter.
pub fn prose(topic: &str) -> String {
    format!(
        "Visitors who enjoy {} will find plenty of options across the region, \
         with friendly guides and easy transport between the main towns.",
        topic
    )
}
