//! Content-stream interpretation.
//!
//! Walks the text operators of a page content stream and produces positioned
//! [`TextSpan`]s carrying the font size and style flags the heading classifier
//! needs. XObject invocations (`Do`) are reported separately so the page can
//! expose them as non-text nodes.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// A run of text drawn with a single font at a single position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated advance width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Whether the font appears to be italic
    pub is_italic: bool,
}

impl TextSpan {
    /// Create a span; style flags are derived from the font name.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let lower = font_name.to_lowercase();
        let is_bold = ["bold", "black", "heavy", "semibold"]
            .iter()
            .any(|w| lower.contains(w));
        let is_italic = lower.contains("italic") || lower.contains("oblique");
        // Half an em per character is close enough for gap detection.
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
            is_bold,
            is_italic,
        }
    }
}

/// Result of reading one page content stream.
#[derive(Debug, Default)]
pub(crate) struct PageContent {
    pub spans: Vec<TextSpan>,
    pub xobjects: Vec<String>,
}

/// Reads text spans out of page content streams.
pub(crate) struct ContentReader<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> ContentReader<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Interpret the content stream of `page_id`.
    pub fn read_page(&self, page_id: ObjectId) -> Result<PageContent> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(e.to_string()))?;
        self.interpret(&content, &fonts)
    }

    fn interpret(
        &self,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    ) -> Result<PageContent> {
        let content = Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut page = PageContent::default();
        let mut state = TextState::default();
        let mut in_text_object = false;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    in_text_object = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => in_text_object = false,
                "Tf" if operands.len() >= 2 => {
                    if let Object::Name(resource) = &operands[0] {
                        state.font_resource = resource.clone();
                        state.font_name = fonts
                            .get(resource)
                            .and_then(|f| f.get(b"BaseFont").ok())
                            .and_then(|o| o.as_name().ok())
                            .map(|n| String::from_utf8_lossy(n).to_string())
                            .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string());
                    }
                    state.font_size = number(&operands[1]).unwrap_or(12.0);
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" if operands.len() >= 2 => {
                    let tx = number(&operands[0]).unwrap_or(0.0);
                    let ty = number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.matrix.translate(tx, ty);
                }
                "Tm" if operands.len() >= 6 => {
                    let m: Vec<f32> = operands
                        .iter()
                        .take(6)
                        .map(|o| number(o).unwrap_or(0.0))
                        .collect();
                    state.matrix.set(m[0], m[1], m[2], m[3], m[4], m[5]);
                }
                "T*" => state.matrix.next_line(state.leading),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.matrix.next_line(state.leading);
                    }
                    if !in_text_object {
                        continue;
                    }
                    let encoding = fonts
                        .get(&state.font_resource)
                        .and_then(|f| f.get_font_encoding(self.doc).ok());
                    let decode = |bytes: &[u8]| match &encoding {
                        Some(enc) => LopdfDocument::decode_text(enc, bytes)
                            .unwrap_or_else(|_| decode_text_simple(bytes)),
                        None => decode_text_simple(bytes),
                    };
                    let text = match (op.operator.as_str(), operands.as_slice()) {
                        ("TJ", [Object::Array(items), ..]) => decode_array(items, &decode),
                        ("\"", [_, _, Object::String(bytes, _), ..]) => decode(bytes),
                        ("Tj" | "'", [Object::String(bytes, _), ..]) => decode(bytes),
                        _ => continue,
                    };
                    state.emit(text, &mut page.spans);
                }
                "Do" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        page.xobjects.push(String::from_utf8_lossy(name).to_string());
                    }
                }
                _ => {}
            }
        }

        Ok(page)
    }
}

/// Kerning adjustment (thousandths of an em) treated as a word gap inside `TJ`.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Text state tracked across operators.
struct TextState {
    matrix: TextMatrix,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 12.0,
        }
    }
}

/// Join the strings of a `TJ` array, turning wide kerning gaps into spaces.
fn decode_array(items: &[Object], decode: impl Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode(bytes)),
            Object::Integer(_) | Object::Real(_) => {
                // Negative adjustments advance the pen; big ones separate words.
                let advance = -number(item).unwrap_or(0.0);
                let ends_in_gap = combined.ends_with(' ') || combined.ends_with('\u{00A0}');
                if advance > TJ_SPACE_THRESHOLD && !ends_in_gap {
                    if let Some(c) = combined.chars().last() {
                        if !is_spaceless_script_char(c) {
                            combined.push(' ');
                        }
                    }
                }
            }
            _ => {}
        }
    }
    combined
}

impl TextState {
    fn emit(&self, text: String, spans: &mut Vec<TextSpan>) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        let size = self.font_size * self.matrix.scale();
        spans.push(TextSpan::new(
            text.nfc().collect(),
            x,
            y,
            size,
            self.font_name.clone(),
        ));
    }
}

/// Text matrix for tracking position in a content stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        let scale = (self.a * self.a + self.c * self.c).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Characters of scripts written without word spaces (Han, Kana, CJK punctuation).
/// Hangul is excluded: Korean uses spaces between words.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F)
}

/// Decoding fallback when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
