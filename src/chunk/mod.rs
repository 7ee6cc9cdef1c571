//! Paragraph splitting and chunk assembly.

mod assembler;
mod filter;
mod paragraphs;

pub use assembler::{ChunkAssembler, ChunkStrategy};
pub use filter::ParagraphFilter;
pub use paragraphs::{normalize, ParagraphChunker, DEFAULT_PARA_LIMIT};
