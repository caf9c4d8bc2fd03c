//! Фильтрация выбросов по z-оценке

use ndarray::Axis;

use crate::dataset::Table;

/// Оставляет строки, у которых |z| ниже порога по каждой колонке
pub struct ZScoreFilter {
    threshold: f64,
}

impl ZScoreFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn filter(&self, table: &Table) -> Table {
        if table.n_rows() == 0 {
            return table.clone();
        }
        let data = table.data();
        let mean = match data.mean_axis(Axis(0)) {
            Some(mean) => mean,
            None => return table.clone(),
        };
        let mut std = data.std_axis(Axis(0), 0.0);
        // Константная колонка: z считается нулевым
        for value in std.iter_mut() {
            if *value < 1e-10 {
                *value = 1.0;
            }
        }

        let mask: Vec<bool> = (0..table.n_rows())
            .map(|i| {
                data.row(i)
                    .iter()
                    .enumerate()
                    .all(|(j, v)| ((v - mean[j]) / std[j]).abs() < self.threshold)
            })
            .collect();
        table.retain_rows(&mask)
    }
}

impl Default for ZScoreFilter {
    fn default() -> Self {
        Self::new(3.0)
    }
}
