//! Data model shared by the outline, chunking and ranking stages.
//!
//! Elements flow from the parser through classification into outlines;
//! paragraphs and outlines are assembled into chunks; chunks are ranked
//! into results. Every type here is plain data and serializable.

mod chunk;
mod element;
mod outline;

pub use chunk::{Chunk, ChunkKind, ChunkPools, Paragraph, RankedResult};
pub use element::{ClassifiedElement, HeadingLevel, TextElement, MAX_OUTLINE_DEPTH};
pub use outline::{DocumentOutline, OutlineEntry};
