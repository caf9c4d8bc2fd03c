//! Линейная регрессия методом наименьших квадратов

#![allow(non_snake_case)]

use ndarray::{Array1, Array2, Axis};

use crate::error::{AnalysisError, Result};

/// МНК через нормальные уравнения на центрированных данных
pub struct LinearRegression {
    coefficients: Option<Array1<f64>>,
    intercept: Option<f64>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
        }
    }

    pub fn fit(&mut self, X: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        let n_samples = X.nrows();
        let n_features = X.ncols();
        if n_samples == 0 || n_features == 0 {
            return Err(AnalysisError::EmptyPartition(
                "cannot fit linear model on an empty matrix".to_string(),
            ));
        }
        if y.len() != n_samples {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} rows but {} response values",
                n_samples,
                y.len()
            )));
        }

        // Центрирование: свободный член восстанавливается из средних
        let x_mean = X.mean_axis(Axis(0)).ok_or_else(|| {
            AnalysisError::EmptyPartition("cannot fit linear model on an empty matrix".to_string())
        })?;
        let y_mean = y.mean().unwrap_or(0.0);
        let Xc = X - &x_mean;
        let yc = y - y_mean;

        // (Xc^T Xc) w = Xc^T y
        let xtx = Xc.t().dot(&Xc);
        let xty = Xc.t().dot(&yc);
        let weights = solve_linear_system(xtx, xty)?;

        self.intercept = Some(y_mean - x_mean.dot(&weights));
        self.coefficients = Some(weights);
        Ok(())
    }

    pub fn predict(&self, X: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self
            .coefficients
            .as_ref()
            .ok_or(AnalysisError::NotFitted("linear model"))?;
        let intercept = self.intercept.unwrap_or(0.0);
        if X.ncols() != weights.len() {
            return Err(AnalysisError::SchemaMismatch(format!(
                "{} feature columns, model was fitted on {}",
                X.ncols(),
                weights.len()
            )));
        }
        Ok(X.dot(weights) + intercept)
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> Option<f64> {
        self.intercept
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

// Метод Гаусса с частичным выбором ведущего элемента
fn solve_linear_system(mut A: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = A.nrows();

    for i in 0..n {
        // Поиск ведущего элемента в столбце
        let mut pivot_row = i;
        for k in (i + 1)..n {
            if A[[k, i]].abs() > A[[pivot_row, i]].abs() {
                pivot_row = k;
            }
        }
        if A[[pivot_row, i]].abs() < 1e-10 {
            return Err(AnalysisError::DegenerateColumn(
                "normal equations are singular (collinear or constant feature)".to_string(),
            ));
        }
        if pivot_row != i {
            for j in 0..n {
                A.swap([i, j], [pivot_row, j]);
            }
            b.swap(i, pivot_row);
        }

        // Исключение
        for k in (i + 1)..n {
            let factor = A[[k, i]] / A[[i, i]];
            for j in i..n {
                A[[k, j]] -= factor * A[[i, j]];
            }
            b[k] -= factor * b[i];
        }
    }

    // Обратный ход
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= A[[i, j]] * x[j];
        }
        x[i] = sum / A[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1, Array2};

    use super::*;

    #[test]
    fn recovers_exact_linear_relation() {
        // y = 1 + 2*x1 + 3*x2
        let n = 12;
        let mut cells = Vec::with_capacity(n * 2);
        let mut targets = Vec::with_capacity(n);
        for i in 0..n {
            let x1 = i as f64;
            let x2 = ((i * i) % 7) as f64;
            cells.push(x1);
            cells.push(x2);
            targets.push(1.0 + 2.0 * x1 + 3.0 * x2);
        }
        let X = Array2::from_shape_vec((n, 2), cells).unwrap();
        let y = Array1::from_vec(targets);

        let mut model = LinearRegression::new();
        model.fit(&X, &y).unwrap();

        let weights = model.coefficients().unwrap();
        assert!((weights[0] - 2.0).abs() < 1e-6);
        assert!((weights[1] - 3.0).abs() < 1e-6);
        assert!((model.intercept().unwrap() - 1.0).abs() < 1e-6);

        let predicted = model.predict(&X).unwrap();
        for (p, o) in predicted.iter().zip(y.iter()) {
            assert!((p - o).abs() < 1e-6);
        }
    }

    #[test]
    fn collinear_features_are_degenerate() {
        let X = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0], [4.0, 8.0]];
        let y = array![1.0, 2.0, 3.0, 4.0];

        let mut model = LinearRegression::new();
        let err = model.fit(&X, &y).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateColumn(_)));
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = LinearRegression::new();
        let err = model.predict(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, AnalysisError::NotFitted(_)));
    }

    #[test]
    fn empty_matrix_fails() {
        let mut model = LinearRegression::new();
        let X = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        let err = model.fit(&X, &y).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyPartition(_)));
    }
}
