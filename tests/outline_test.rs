//! Integration tests for outline extraction from real PDF bytes.

mod common;

use pdfsense::{
    extract_outline, extract_outline_from_bytes, parse_bytes, ClassifierOptions, Error,
    HeadingLevel, Pdfsense,
};

const BODY: &str = "Revenue grew steadily across every region this year";

#[test]
fn test_title_and_body_only() {
    let mut page: Vec<common::Line> = vec![("Annual Report", 20.0)];
    page.extend([(BODY, 10.0); 5]);
    let bytes = common::pdf_bytes(&[page.as_slice()]);

    let outline = extract_outline_from_bytes(&bytes, &ClassifierOptions::default()).unwrap();
    assert_eq!(outline.title, "Annual Report");
    assert!(outline.outline.is_empty());
}

#[test]
fn test_multi_level_outline_with_zero_based_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_pdf(
        dir.path(),
        "guide.pdf",
        &[
            &[
                ("Field Guide", 24.0),
                ("Birds", 18.0),
                ("Songbirds", 14.0),
                (BODY, 10.0),
            ],
            &[("Waders", 14.0), (BODY, 10.0)],
            &[("Mammals", 18.0), (BODY, 10.0), (BODY, 10.0)],
        ],
    );

    let outline = extract_outline(&path).unwrap();
    assert_eq!(outline.title, "Field Guide");

    let entries: Vec<_> = outline
        .outline
        .iter()
        .map(|e| (e.level.to_string(), e.text.as_str(), e.page))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("H1".to_string(), "Birds", 0),
            ("H2".to_string(), "Songbirds", 0),
            ("H2".to_string(), "Waders", 1),
            ("H1".to_string(), "Mammals", 2),
        ]
    );
    assert_eq!(outline.level_counts(), [2, 2, 0]);
}

#[test]
fn test_uppercase_body_line_becomes_h3() {
    let bytes = common::pdf_bytes(&[&[
        ("Handbook", 22.0),
        ("Overview", 16.0),
        ("KEY POINTS", 10.0),
        (BODY, 10.0),
    ]]);

    let outline = extract_outline_from_bytes(&bytes, &ClassifierOptions::default()).unwrap();
    let levels: Vec<_> = outline.outline.iter().map(|e| (e.level, e.text.as_str())).collect();
    assert_eq!(
        levels,
        vec![
            (HeadingLevel::Heading(1), "Overview"),
            (HeadingLevel::Heading(3), "KEY POINTS"),
        ]
    );
}

#[test]
fn test_single_font_size_has_no_outline() {
    let bytes = common::pdf_bytes(&[&[(BODY, 11.0), (BODY, 11.0)]]);
    let outline = extract_outline_from_bytes(&bytes, &ClassifierOptions::default()).unwrap();
    assert_eq!(outline.title, BODY);
    assert!(outline.is_empty());
}

#[test]
fn test_outline_json_artifact() {
    let bytes = common::pdf_bytes(&[&[("Report", 20.0), ("Scope", 15.0), (BODY, 10.0)]]);
    let outline = extract_outline_from_bytes(&bytes, &ClassifierOptions::default()).unwrap();

    let value = serde_json::to_value(&outline).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "title": "Report",
            "outline": [{"level": "H1", "text": "Scope", "page": 0}]
        })
    );
}

#[test]
fn test_max_pages_limits_outline() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_pdf(
        dir.path(),
        "two.pdf",
        &[
            &[("Manual", 24.0), ("Install", 16.0), (BODY, 10.0)],
            &[("Upgrade", 16.0), (BODY, 10.0)],
        ],
    );

    let outline = Pdfsense::new().with_max_pages(1).outline(&path).unwrap();
    let texts: Vec<_> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["Install"]);
}

#[test]
fn test_parsed_pages_are_one_based() {
    let bytes = common::pdf_bytes(&[&[(BODY, 10.0)], &[(BODY, 10.0)]]);
    let doc = parse_bytes(&bytes).unwrap();
    assert_eq!(doc.page_count, 2);
    let numbers: Vec<u32> = doc.pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert!(doc.has_text());
}

#[test]
fn test_non_pdf_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, "just some text").unwrap();
    assert!(matches!(extract_outline(&path), Err(Error::UnknownFormat)));
}
