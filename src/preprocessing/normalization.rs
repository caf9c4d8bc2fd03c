//! Нормализация данных

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

use crate::error::{AnalysisError, Result};

/// Стандартизатор: статистики оцениваются один раз на обучающей выборке
pub struct DataNormalizer {
    mean: Option<Array1<f64>>,
    std: Option<Array1<f64>>,
}

impl DataNormalizer {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>) -> Result<()> {
        if X.nrows() == 0 {
            return Err(AnalysisError::EmptyPartition(
                "cannot fit normalizer on an empty matrix".to_string(),
            ));
        }

        let mean = X.mean_axis(Axis(0)).ok_or_else(|| {
            AnalysisError::EmptyPartition("cannot fit normalizer on an empty matrix".to_string())
        })?;
        let mut std = X.std_axis(Axis(0), 0.0);

        // Избегаем деления на ноль
        for value in std.iter_mut() {
            if *value < 1e-10 {
                *value = 1.0;
            }
        }

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>> {
        let mean = self
            .mean
            .as_ref()
            .ok_or(AnalysisError::NotFitted("normalizer"))?;
        let std = self
            .std
            .as_ref()
            .ok_or(AnalysisError::NotFitted("normalizer"))?;
        if X.ncols() != mean.len() {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} columns, normalizer was fitted on {}",
                X.ncols(),
                mean.len()
            )));
        }

        // (X - mean) / std по каждой колонке
        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - mean[j]) / std[j];
            }
        }

        Ok(normalized)
    }

    pub fn fit_transform(&mut self, X: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(X)?;
        self.transform(X)
    }
}

impl Default for DataNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn fitted_training_data_has_zero_mean_unit_std() {
        let X = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let mut normalizer = DataNormalizer::new();
        let scaled = normalizer.fit_transform(&X).unwrap();

        let mean = scaled.mean_axis(Axis(0)).unwrap();
        let std = scaled.std_axis(Axis(0), 0.0);
        for j in 0..2 {
            assert!(mean[j].abs() < 1e-12);
            assert!((std[j] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn transform_reuses_training_statistics() {
        let train = array![[0.0], [10.0]];
        let test = array![[5.0], [20.0]];

        let mut normalizer = DataNormalizer::new();
        normalizer.fit(&train).unwrap();
        let scaled = normalizer.transform(&test).unwrap();

        // mean = 5, std = 5
        assert!((scaled[[0, 0]] - 0.0).abs() < 1e-12);
        assert!((scaled[[1, 0]] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn transform_before_fit_fails() {
        let normalizer = DataNormalizer::new();
        let err = normalizer.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, AnalysisError::NotFitted(_)));
    }

    #[test]
    fn constant_column_is_clamped() {
        let X = array![[3.0], [3.0], [3.0]];
        let mut normalizer = DataNormalizer::new();
        let scaled = normalizer.fit_transform(&X).unwrap();
        assert!(scaled.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn column_count_mismatch_fails() {
        let mut normalizer = DataNormalizer::new();
        normalizer.fit(&array![[1.0, 2.0]]).unwrap();
        let err = normalizer.transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch(_)));
    }
}
