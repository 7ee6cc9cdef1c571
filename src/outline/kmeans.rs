//! One-dimensional k-means over font sizes.

use std::cmp::Ordering;

/// Result of a 1-D k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct Kmeans1d {
    /// Cluster centers, largest first
    pub centers: Vec<f64>,
    /// Number of Lloyd's iterations performed
    pub iterations: usize,
    /// Sum of squared distances from each value to its nearest center
    pub inertia: f64,
}

impl Kmeans1d {
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centers.len()
    }

    /// Index of the nearest center. Ties go to the larger center.
    pub fn nearest(&self, value: f64) -> usize {
        nearest_center(value, &self.centers)
    }
}

/// Run Lloyd's k-means on scalar values.
///
/// `k` is clamped to `1..=distinct values`. Initial centers sit at evenly
/// spaced positions of the sorted distinct values, so the result depends only
/// on the input. Empty clusters keep their previous center. Non-finite values
/// never move a center. Returns `None` when no value is finite.
pub fn kmeans_1d(values: &[f64], k: usize, max_iterations: usize) -> Option<Kmeans1d> {
    let distinct = distinct_sorted(values);
    if distinct.is_empty() {
        return None;
    }
    let k = k.clamp(1, distinct.len());

    let mut centers: Vec<f64> = if k == 1 {
        vec![distinct[0]]
    } else {
        (0..k)
            .map(|j| distinct[j * (distinct.len() - 1) / (k - 1)])
            .collect()
    };

    let mut assignments = vec![usize::MAX; values.len()];
    let mut iterations = 0;

    for _ in 0..max_iterations.max(1) {
        iterations += 1;

        let mut changed = false;
        for (slot, &v) in assignments.iter_mut().zip(values) {
            let nearest = nearest_center(v, &centers);
            if *slot != nearest {
                *slot = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (&cluster, &v) in assignments.iter().zip(values) {
            if !v.is_finite() {
                continue;
            }
            sums[cluster] += v;
            counts[cluster] += 1;
        }
        for (c, center) in centers.iter_mut().enumerate() {
            if counts[c] > 0 {
                *center = sums[c] / counts[c] as f64;
            }
        }
    }

    centers.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let inertia = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| {
            let d = v - centers[nearest_center(v, &centers)];
            d * d
        })
        .sum();

    Some(Kmeans1d {
        centers,
        iterations,
        inertia,
    })
}

/// Sorted distinct values, compared at 0.01 resolution to absorb float noise
/// in font sizes derived from text matrices.
pub fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted.dedup_by(|a, b| quantize(*a) == quantize(*b));
    sorted
}

fn quantize(v: f64) -> i64 {
    (v * 100.0).round() as i64
}

fn nearest_center(value: f64, centers: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in centers.iter().enumerate() {
        let dist = (value - c).abs();
        let better = dist < best_dist || (dist == best_dist && c > centers[best]);
        if better {
            best = i;
            best_dist = dist;
        }
    }
    best
}
