//! Регрессионное дерево решений

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Сколько признаков рассматривается в каждом разбиении
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxFeatures {
    Auto,
    Sqrt,
    Log2,
}

impl MaxFeatures {
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Auto => n_features,
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
        };
        k.clamp(1, n_features.max(1))
    }
}

impl std::fmt::Display for MaxFeatures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaxFeatures::Auto => write!(f, "auto"),
            MaxFeatures::Sqrt => write!(f, "sqrt"),
            MaxFeatures::Log2 => write!(f, "log2"),
        }
    }
}

enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

pub struct DecisionTreeRegressor {
    max_depth: Option<usize>,
    min_samples_split: usize,
    max_features: MaxFeatures,
    seed: u64,
    root: Option<TreeNode>,
}

impl DecisionTreeRegressor {
    pub fn new(max_depth: Option<usize>, max_features: MaxFeatures, seed: u64) -> Self {
        Self {
            max_depth,
            min_samples_split: 2,
            max_features,
            seed,
            root: None,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if X.nrows() == 0 || X.ncols() == 0 {
            return Err(AnalysisError::EmptyPartition(
                "cannot fit tree on an empty matrix".to_string(),
            ));
        }
        if y.len() != X.nrows() {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} rows but {} response values",
                X.nrows(),
                y.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices: Vec<usize> = (0..X.nrows()).collect();
        self.root = Some(self.build(X, y, indices, 0, &mut rng));
        Ok(())
    }

    fn build(
        &self,
        X: &Array2<f64>,
        y: &Array1<f64>,
        indices: Vec<usize>,
        depth: usize,
        rng: &mut StdRng,
    ) -> TreeNode {
        let mean = indices.iter().map(|&i| y[i]).sum::<f64>() / indices.len() as f64;

        let depth_reached = self.max_depth.map_or(false, |limit| depth >= limit);
        if depth_reached || indices.len() < self.min_samples_split {
            return TreeNode::Leaf { value: mean };
        }

        // Однородный узел не делим
        let min_y = indices.iter().map(|&i| y[i]).fold(f64::INFINITY, f64::min);
        let max_y = indices
            .iter()
            .map(|&i| y[i])
            .fold(f64::NEG_INFINITY, f64::max);
        if max_y - min_y < 1e-12 {
            return TreeNode::Leaf { value: mean };
        }

        // Случайная подвыборка признаков
        let mut candidates: Vec<usize> = (0..X.ncols()).collect();
        candidates.shuffle(rng);
        candidates.truncate(self.max_features.resolve(X.ncols()));

        let mut best: Option<(usize, f64, f64)> = None; // (признак, порог, SSE)
        for &feature in &candidates {
            if let Some((threshold, sse)) = best_split(X, y, &indices, feature) {
                let improves = best.map_or(true, |(_, _, best_sse)| sse < best_sse);
                if improves {
                    best = Some((feature, threshold, sse));
                }
            }
        }

        let (feature, threshold) = match best {
            Some((feature, threshold, _)) => (feature, threshold),
            None => return TreeNode::Leaf { value: mean },
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| X[[i, feature]] < threshold);
        if left_indices.is_empty() || right_indices.is_empty() {
            return TreeNode::Leaf { value: mean };
        }

        TreeNode::Split {
            feature,
            threshold,
            left: Box::new(self.build(X, y, left_indices, depth + 1, rng)),
            right: Box::new(self.build(X, y, right_indices, depth + 1, rng)),
        }
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self
            .root
            .as_ref()
            .ok_or(AnalysisError::NotFitted("decision tree"))?;
        let mut predictions = Array1::<f64>::zeros(X.nrows());
        for (i, row) in X.rows().into_iter().enumerate() {
            predictions[i] = predict_row(root, &row);
        }
        Ok(predictions)
    }
}

fn predict_row(node: &TreeNode, row: &ArrayView1<f64>) -> f64 {
    match node {
        TreeNode::Leaf { value } => *value,
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if row[*feature] < *threshold {
                predict_row(left, row)
            } else {
                predict_row(right, row)
            }
        }
    }
}

// Лучший порог по сумме квадратов ошибок двух потомков.
// Пороги - середины между соседними различными значениями признака.
fn best_split(
    X: &Array2<f64>,
    y: &Array1<f64>,
    indices: &[usize],
    feature: usize,
) -> Option<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = indices.iter().map(|&i| (X[[i, feature]], y[i])).collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let n = pairs.len();

    // Префиксные суммы отклика и его квадрата
    let mut prefix = Vec::with_capacity(n);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for &(_, target) in &pairs {
        sum += target;
        sum_sq += target * target;
        prefix.push((sum, sum_sq));
    }
    let (total_sum, total_sq) = (sum, sum_sq);

    let mut best: Option<(f64, f64)> = None;
    for i in 0..n - 1 {
        if pairs[i + 1].0 - pairs[i].0 < 1e-12 {
            continue;
        }
        let threshold = (pairs[i].0 + pairs[i + 1].0) / 2.0;
        let (left_sum, left_sq) = prefix[i];
        let n_left = (i + 1) as f64;
        let n_right = (n - i - 1) as f64;
        let right_sum = total_sum - left_sum;
        let right_sq = total_sq - left_sq;
        let sse =
            (left_sq - left_sum * left_sum / n_left) + (right_sq - right_sum * right_sum / n_right);
        let improves = best.map_or(true, |(_, best_sse)| sse < best_sse);
        if improves {
            best = Some((threshold, sse));
        }
    }
    best
}
