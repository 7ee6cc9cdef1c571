//! Deterministic feature-hashing embedder.

use crate::error::Result;

use super::embed::Embedder;

/// Default vector length, matching MiniLM sentence embeddings.
pub const DEFAULT_DIMENSION: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Bag-of-words embedder that hashes unigrams and bigrams into a signed
/// vector.
///
/// Needs no model files and always returns the same vector for the same
/// text. Texts sharing words score higher than unrelated ones, which is
/// enough for offline runs and tests.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    bigram_weight: f32,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl HashingEmbedder {
    /// Create an embedder producing vectors of `dimension` (minimum 1).
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            bigram_weight: 0.5,
        }
    }

    /// Embed one text.
    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; self.dimension];
        let tokens = tokenize(text);

        for token in &tokens {
            self.add(&mut vector, fnv1a(token.as_bytes()), 1.0);
        }
        for pair in tokens.windows(2) {
            let mut hash = fnv1a(pair[0].as_bytes());
            hash = fnv1a_continue(hash, b" ");
            hash = fnv1a_continue(hash, pair[1].as_bytes());
            self.add(&mut vector, hash, self.bigram_weight);
        }

        vector
    }

    fn add(&self, vector: &mut [f32], hash: u64, weight: f32) {
        let index = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// Lower-cased alphanumeric runs.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn fnv1a(bytes: &[u8]) -> u64 {
    fnv1a_continue(FNV_OFFSET, bytes)
}

fn fnv1a_continue(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::embed::{dot, l2_normalize};

    fn unit(embedder: &HashingEmbedder, text: &str) -> Vec<f32> {
        let mut v = embedder.embed_one(text);
        l2_normalize(&mut v);
        v
    }

    #[test]
    fn test_deterministic_and_sized() {
        let mut embedder = HashingEmbedder::default();
        let a = embedder.embed_batch(&["Plan a trip", "Plan a trip"]).unwrap();
        assert_eq!(a[0].len(), DEFAULT_DIMENSION);
        assert_eq!(a[0], a[1]);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let embedder = HashingEmbedder::default();
        assert_eq!(embedder.embed_one("Hello, World!"), embedder.embed_one("hello world"));
    }

    #[test]
    fn test_overlap_scores_higher() {
        let embedder = HashingEmbedder::default();
        let query = unit(&embedder, "plan a trip for college friends");
        let related = unit(&embedder, "trip ideas for groups of college friends");
        let unrelated = unit(&embedder, "quarterly revenue and tax statements");
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(8);
        assert_eq!(embedder.embed_one("  ... "), vec![0.0; 8]);
    }
}
