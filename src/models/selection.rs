//! Подбор гиперпараметров: k-fold кросс-валидация и перебор по сетке

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::forest::RandomForestRegressor;
use crate::models::metrics::r2_score;
use crate::models::tree::MaxFeatures;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub max_features: MaxFeatures,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamGrid {
    pub max_features: Vec<MaxFeatures>,
    pub max_depth: Vec<Option<usize>>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            max_features: vec![MaxFeatures::Auto, MaxFeatures::Sqrt, MaxFeatures::Log2],
            max_depth: vec![None, Some(5), Some(3), Some(1)],
        }
    }
}

impl ParamGrid {
    pub fn combinations(&self) -> Vec<ForestParams> {
        let mut combos = Vec::new();
        for &max_features in &self.max_features {
            for &max_depth in &self.max_depth {
                combos.push(ForestParams {
                    max_features,
                    max_depth,
                });
            }
        }
        combos
    }
}

/// Последовательные блоки индексов; размеры отличаются не более чем на один
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits }
    }

    /// Пары (обучающие, валидационные) индексы для каждого фолда
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(AnalysisError::EmptyPartition(
                "cross-validation needs at least 2 folds".to_string(),
            ));
        }
        if n_samples < self.n_splits {
            return Err(AnalysisError::EmptyPartition(format!(
                "{} rows cannot be divided into {} folds",
                n_samples, self.n_splits
            )));
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0usize;
        for fold in 0..self.n_splits {
            let len = base + usize::from(fold < extra);
            let validation: Vec<usize> = (start..start + len).collect();
            let training: Vec<usize> = (0..n_samples)
                .filter(|i| *i < start || *i >= start + len)
                .collect();
            folds.push((training, validation));
            start += len;
        }
        Ok(folds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvRecord {
    pub params: ForestParams,
    pub mean_score: f64,
    pub std_score: f64,
}

pub struct GridSearch {
    grid: ParamGrid,
    folds: usize,
    n_trees: usize,
    seed: u64,
}

pub struct GridSearchResult {
    pub best_params: ForestParams,
    pub best_score: f64,
    pub cv_results: Vec<CvRecord>,
    pub model: RandomForestRegressor,
}

impl GridSearch {
    pub fn new(grid: ParamGrid, folds: usize, n_trees: usize, seed: u64) -> Self {
        Self {
            grid,
            folds,
            n_trees,
            seed,
        }
    }

    /// Оценивает каждую комбинацию по среднему R2 на валидационных фолдах,
    /// затем дообучает лес с лучшими параметрами на всей обучающей выборке
    pub fn fit(&self, X: &Array2<f64>, y: &Array1<f64>) -> Result<GridSearchResult> {
        let folds = KFold::new(self.folds).split(X.nrows())?;

        let mut cv_results = Vec::new();
        for params in self.grid.combinations() {
            let mut scores = Vec::with_capacity(folds.len());
            for (train_idx, val_idx) in &folds {
                let X_train = X.select(Axis(0), train_idx);
                let y_train = y.select(Axis(0), train_idx);
                let X_val = X.select(Axis(0), val_idx);
                let y_val = y.select(Axis(0), val_idx);

                let mut forest = RandomForestRegressor::new(
                    self.n_trees,
                    params.max_depth,
                    params.max_features,
                    self.seed,
                );
                forest.fit(&X_train, &y_train)?;
                let predicted = forest.predict(&X_val)?;
                scores.push(r2_score(&y_val, &predicted));
            }

            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            let variance =
                scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;
            cv_results.push(CvRecord {
                params,
                mean_score: mean,
                std_score: variance.sqrt(),
            });
        }

        // NaN трактуется как худший результат
        let best = cv_results
            .iter()
            .max_by(|a, b| {
                rank(a.mean_score)
                    .partial_cmp(&rank(b.mean_score))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
            .ok_or_else(|| {
                AnalysisError::EmptyPartition("hyperparameter grid is empty".to_string())
            })?;

        let mut model = RandomForestRegressor::new(
            self.n_trees,
            best.params.max_depth,
            best.params.max_features,
            self.seed,
        );
        model.fit(X, y)?;

        Ok(GridSearchResult {
            best_params: best.params,
            best_score: best.mean_score,
            cv_results,
            model,
        })
    }
}

fn rank(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}
