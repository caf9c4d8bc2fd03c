//! Разбиение на обучающую и тестовую выборки

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataset::Table;
use crate::error::{AnalysisError, Result};

/// Четыре непересекающихся подмножества: признаки и отклик, train/test
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
    pub feature_names: Vec<String>,
}

/// Детерминированное разбиение: перемешивание строк с фиксированным зерном
pub fn train_test_split(
    table: &Table,
    response: &str,
    test_ratio: f64,
    seed: u64,
) -> Result<Split> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(AnalysisError::EmptyPartition(format!(
            "test ratio {test_ratio} leaves nothing to train or test on"
        )));
    }
    let response_idx = table.column_index(response)?;
    let feature_cols: Vec<usize> = (0..table.n_cols()).filter(|&j| j != response_idx).collect();
    if feature_cols.is_empty() {
        return Err(AnalysisError::EmptyPartition(
            "no feature columns besides the response".to_string(),
        ));
    }

    let n = table.n_rows();
    let n_test = ((n as f64) * test_ratio).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(AnalysisError::EmptyPartition(format!(
            "{n} rows cannot be split with test ratio {test_ratio}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let (test_idx, train_idx) = indices.split_at(n_test);

    let feature_names: Vec<String> = feature_cols
        .iter()
        .map(|&j| table.columns()[j].clone())
        .collect();
    let x = table.data().select(Axis(1), &feature_cols);
    let y = table.data().column(response_idx).to_owned();

    Ok(Split {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
        feature_names,
    })
}
