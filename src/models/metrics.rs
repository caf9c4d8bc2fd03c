//! Метрики качества регрессии

use ndarray::Array1;

/// Коэффициент детерминации: 1 - SS_res / SS_tot
pub fn r2_score(observed: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    if observed.is_empty() || observed.len() != predicted.len() {
        return f64::NAN;
    }
    let mean = observed.mean().unwrap_or(0.0);
    let ss_res: f64 = observed
        .iter()
        .zip(predicted.iter())
        .map(|(o, p)| (o - p).powi(2))
        .sum();
    let ss_tot: f64 = observed.iter().map(|o| (o - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return f64::NAN;
    }
    1.0 - ss_res / ss_tot
}

pub fn mean_squared_error(observed: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    if observed.is_empty() || observed.len() != predicted.len() {
        return f64::NAN;
    }
    observed
        .iter()
        .zip(predicted.iter())
        .map(|(o, p)| (o - p).powi(2))
        .sum::<f64>()
        / observed.len() as f64
}

/// Остатки: наблюдаемое минус предсказанное
pub fn residuals(observed: &Array1<f64>, predicted: &Array1<f64>) -> Array1<f64> {
    observed - predicted
}
