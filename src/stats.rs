//! Описательная статистика и корреляции

use crate::dataset::Table;
use crate::types::{ColumnSummary, CorrelationMatrix};

/// Сводка по каждой колонке (пропуски не учитываются)
pub fn summarize(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let values: Vec<f64> = table
                .data()
                .column(j)
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            let count = values.len();
            if count == 0 {
                return ColumnSummary {
                    column: name.clone(),
                    count,
                    mean: f64::NAN,
                    std: f64::NAN,
                    min: f64::NAN,
                    max: f64::NAN,
                };
            }
            let mean = values.iter().sum::<f64>() / count as f64;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            ColumnSummary {
                column: name.clone(),
                count,
                mean,
                std: variance.sqrt(),
                min,
                max,
            }
        })
        .collect()
}

/// Матрица корреляций Пирсона по полным строкам
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let complete: Vec<usize> = (0..table.n_rows())
        .filter(|&i| table.data().row(i).iter().all(|v| v.is_finite()))
        .collect();
    let d = table.n_cols();

    // Центрированные колонки и их нормы
    let mut centered: Vec<Vec<f64>> = Vec::with_capacity(d);
    let mut norms: Vec<f64> = Vec::with_capacity(d);
    for j in 0..d {
        let values: Vec<f64> = complete
            .iter()
            .map(|&i| table.data()[[i, j]])
            .collect();
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };
        let deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
        let norm = deviations.iter().map(|v| v * v).sum::<f64>().sqrt();
        centered.push(deviations);
        norms.push(norm);
    }

    let mut values = vec![vec![f64::NAN; d]; d];
    for i in 0..d {
        values[i][i] = 1.0;
        for j in (i + 1)..d {
            let dot: f64 = centered[i]
                .iter()
                .zip(centered[j].iter())
                .map(|(a, b)| a * b)
                .sum();
            let denom = norms[i] * norms[j];
            let r = if denom > 0.0 { dot / denom } else { f64::NAN };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: table.columns().to_vec(),
        values,
    }
}
