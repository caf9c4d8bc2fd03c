//! Случайный лес регрессионных деревьев

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AnalysisError, Result};
use crate::models::tree::{DecisionTreeRegressor, MaxFeatures};

/// Ансамбль деревьев на бутстрэп-выборках; предсказание - среднее по деревьям
pub struct RandomForestRegressor {
    n_trees: usize,
    max_depth: Option<usize>,
    max_features: MaxFeatures,
    seed: u64,
    trees: Vec<DecisionTreeRegressor>,
}

impl RandomForestRegressor {
    pub fn new(
        n_trees: usize,
        max_depth: Option<usize>,
        max_features: MaxFeatures,
        seed: u64,
    ) -> Self {
        Self {
            n_trees,
            max_depth,
            max_features,
            seed,
            trees: Vec::new(),
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        if X.nrows() == 0 || X.ncols() == 0 {
            return Err(AnalysisError::EmptyPartition(
                "cannot fit forest on an empty matrix".to_string(),
            ));
        }
        if y.len() != X.nrows() {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} rows but {} response values",
                X.nrows(),
                y.len()
            )));
        }
        if self.n_trees == 0 {
            return Err(AnalysisError::EmptyPartition(
                "forest needs at least one tree".to_string(),
            ));
        }

        self.trees.clear();
        let n = X.nrows();
        let mut rng = StdRng::seed_from_u64(self.seed);

        for _ in 0..self.n_trees {
            // Бутстрэп: выборка строк с возвращением
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let X_boot = X.select(Axis(0), &sample);
            let y_boot = y.select(Axis(0), &sample);

            let mut tree =
                DecisionTreeRegressor::new(self.max_depth, self.max_features, rng.gen::<u64>());
            tree.fit(&X_boot, &y_boot)?;
            self.trees.push(tree);
        }
        Ok(())
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(AnalysisError::NotFitted("random forest"));
        }
        let mut total = Array1::<f64>::zeros(X.nrows());
        for tree in &self.trees {
            total += &tree.predict(X)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}
