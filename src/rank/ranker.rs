//! Persona/job relevance ranking.

use std::cmp::Ordering;

use crate::error::Result;
use crate::model::{Chunk, RankedResult};

use super::embed::{dot, embed_normalized, Embedder};

/// Options for [`RelevanceRanker`].
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Results kept per pool
    pub top_k: usize,
    /// Texts per embedding call
    pub batch_size: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            batch_size: 16,
        }
    }
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of results kept.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the embedding batch size (minimum 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}

/// The query sentence for a persona and job.
pub fn build_query(persona: &str, job: &str) -> String {
    format!("As a {}, {}", persona.trim(), job.trim())
}

/// Scores chunks against a persona/job query with an injected embedder.
pub struct RelevanceRanker<E: Embedder> {
    embedder: E,
    options: RankOptions,
}

impl<E: Embedder> RelevanceRanker<E> {
    /// Create a ranker that owns `embedder`.
    pub fn new(embedder: E, options: RankOptions) -> Self {
        Self { embedder, options }
    }

    /// Ranking options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// The embedding backend.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Give back the embedder.
    pub fn into_embedder(self) -> E {
        self.embedder
    }

    /// Rank one pool of chunks, best first.
    ///
    /// Scores are dot products of unit vectors. Equal scores keep pool order.
    /// At most `top_k` results are returned, ranked from 1.
    pub fn rank(&mut self, pool: &[Chunk], persona: &str, job: &str) -> Result<Vec<RankedResult>> {
        if pool.is_empty() {
            log::warn!("no chunks to rank");
            return Ok(Vec::new());
        }
        if self.options.top_k == 0 {
            return Ok(Vec::new());
        }

        let query = build_query(persona, job);
        let query_vector = embed_normalized(&mut self.embedder, &[query.as_str()], 1)?
            .pop()
            .unwrap_or_default();

        let texts: Vec<&str> = pool.iter().map(Chunk::embedding_text).collect();
        let vectors = embed_normalized(&mut self.embedder, &texts, self.options.batch_size)?;

        let mut scored: Vec<(usize, f32)> = vectors
            .iter()
            .map(|v| dot(&query_vector, v))
            .enumerate()
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(self.options.top_k);

        log::debug!(
            "ranked {} chunks with {}, kept {}",
            pool.len(),
            self.embedder.name(),
            scored.len()
        );

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(rank, (index, score))| {
                let chunk = &pool[index];
                RankedResult {
                    document: chunk.source.clone(),
                    page: chunk.page,
                    section_title: chunk.display_title().to_string(),
                    refined_text: chunk.text.clone(),
                    importance_rank: rank + 1,
                    score,
                }
            })
            .collect())
    }
}
