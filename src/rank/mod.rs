//! Semantic relevance ranking of chunks.

mod embed;
#[cfg(feature = "fastembed")]
mod fastembed;
mod hashing;
mod ranker;

pub use embed::{dot, embed_normalized, l2_normalize, Embedder};
#[cfg(feature = "fastembed")]
pub use self::fastembed::{FastEmbedder, MODEL_NAME};
pub use hashing::{HashingEmbedder, DEFAULT_DIMENSION};
pub use ranker::{build_query, RankOptions, RelevanceRanker};
