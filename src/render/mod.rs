//! Rendering of outlines and collection reports.

mod json;
mod text;

pub use json::{to_json, write_json, JsonFormat};
pub use text::outline_to_text;
