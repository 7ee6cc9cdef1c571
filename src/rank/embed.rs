//! Embedding backends.

use crate::error::{Error, Result};

/// Turns texts into dense vectors.
///
/// Implementations are constructed explicitly and handed to the ranker; call
/// [`shutdown`](Embedder::shutdown) when done to release model resources.
pub trait Embedder {
    /// Backend name for logs and reports.
    fn name(&self) -> &str;

    /// Length of every returned vector.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per text in input order.
    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Release resources held by the backend.
    fn shutdown(&mut self) {}
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}

/// Scale a vector to unit length. Zero vectors are left unchanged.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 && norm.is_finite() {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Dot product over the shorter of the two vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Embed texts in batches of `batch_size`, returning unit vectors in order.
pub fn embed_normalized<E: Embedder + ?Sized>(
    embedder: &mut E,
    texts: &[&str],
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    let mut vectors = Vec::with_capacity(texts.len());

    for batch in texts.chunks(batch_size.max(1)) {
        let embedded = embedder.embed_batch(batch)?;
        if embedded.len() != batch.len() {
            return Err(Error::Embedding(format!(
                "{} returned {} vectors for {} texts",
                embedder.name(),
                embedded.len(),
                batch.len()
            )));
        }
        vectors.extend(embedded.into_iter().map(|mut v| {
            l2_normalize(&mut v);
            v
        }));
    }

    Ok(vectors)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        calls: Vec<usize>,
        drop_last: bool,
    }

    impl Embedder for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn dimension(&self) -> usize {
            2
        }

        fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            self.calls.push(texts.len());
            let mut out: Vec<Vec<f32>> = texts.iter().map(|t| vec![t.len() as f32, 0.0]).collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_batches_preserve_order() {
        let mut embedder = Fixed {
            calls: Vec::new(),
            drop_last: false,
        };
        let texts = ["a", "bb", "ccc", "dddd", "eeeee"];
        let vectors = embed_normalized(&mut embedder, &texts, 2).unwrap();

        assert_eq!(embedder.calls, vec![2, 2, 1]);
        assert_eq!(vectors.len(), 5);
        assert!(vectors.iter().all(|v| (v[0] - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_short_batch_is_an_error() {
        let mut embedder = Fixed {
            calls: Vec::new(),
            drop_last: true,
        };
        let err = embed_normalized(&mut embedder, &["a", "b"], 16).unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
    }
}
