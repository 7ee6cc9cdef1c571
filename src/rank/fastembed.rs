//! Pretrained sentence embeddings through `fastembed`.

use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{Error, Result};

use super::embed::Embedder;

/// Model identifier reported by [`FastEmbedder::name`].
pub const MODEL_NAME: &str = "paraphrase-multilingual-MiniLM-L12-v2";

const MODEL_DIMENSION: usize = 384;

/// Multilingual MiniLM sentence embedder backed by ONNX Runtime.
pub struct FastEmbedder {
    model: Option<TextEmbedding>,
}

impl FastEmbedder {
    /// Load the model, downloading it into `cache_dir` on first use.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut options = InitOptions::new(EmbeddingModel::ParaphraseMLMiniLML12V2)
            .with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| Error::Embedding(format!("failed to load {}: {}", MODEL_NAME, e)))?;
        log::info!("loaded embedding model {}", MODEL_NAME);

        Ok(Self { model: Some(model) })
    }
}

impl Embedder for FastEmbedder {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        MODEL_DIMENSION
    }

    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let model = self
            .model
            .as_mut()
            .ok_or_else(|| Error::Embedding(format!("{} has been shut down", MODEL_NAME)))?;
        model
            .embed(texts.to_vec(), Some(texts.len().max(1)))
            .map_err(|e| Error::Embedding(e.to_string()))
    }

    fn shutdown(&mut self) {
        if self.model.take().is_some() {
            log::debug!("released embedding model {}", MODEL_NAME);
        }
    }
}
