//! Очистка таблицы: пропуски и коллинеарные колонки

use crate::dataset::Table;
use crate::error::{AnalysisError, Result};

/// Оставляет только строки без пропусков
pub fn drop_missing(table: &Table) -> Table {
    let mask: Vec<bool> = (0..table.n_rows())
        .map(|i| table.data().row(i).iter().all(|v| v.is_finite()))
        .collect();
    table.retain_rows(&mask)
}

/// Удаляет именованные колонки (в анализе - коллинеарные с оставшимися)
pub fn drop_columns(table: &Table, names: &[String]) -> Result<Table> {
    for name in names {
        table.column_index(name)?;
    }
    let keep: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| !names.iter().any(|n| n == *column))
        .map(|(j, _)| j)
        .collect();
    if keep.is_empty() {
        return Err(AnalysisError::SchemaMismatch(
            "dropping these columns would leave an empty table".to_string(),
        ));
    }
    Ok(table.select_columns(&keep))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn drop_missing_keeps_complete_rows() {
        let table = Table::new(
            vec!["Age".to_string(), "BPSysAve".to_string()],
            array![[30.0, 120.0], [f64::NAN, 130.0], [41.0, 118.0]],
        )
        .unwrap();

        let cleaned = drop_missing(&table);
        assert_eq!(cleaned.n_rows(), 2);
        assert_eq!(cleaned.data()[[1, 0]], 41.0);
    }

    #[test]
    fn drop_columns_removes_named_columns() {
        let table = Table::new(
            vec!["Age".to_string(), "BMI".to_string(), "BPSysAve".to_string()],
            array![[30.0, 24.0, 120.0], [41.0, 27.0, 118.0]],
        )
        .unwrap();

        let trimmed = drop_columns(&table, &["BMI".to_string()]).unwrap();
        assert_eq!(
            trimmed.columns(),
            &["Age".to_string(), "BPSysAve".to_string()]
        );
        assert_eq!(trimmed.data()[[0, 1]], 120.0);
    }

    #[test]
    fn drop_unknown_column_fails() {
        let table = Table::new(vec!["Age".to_string()], array![[30.0]]).unwrap();
        let err = drop_columns(&table, &["Pulse".to_string()]).unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound(_)));
    }

    // Сценарий из анализа: две строки с одним пропуском каждая,
    // затем удаление BMI и HHIncomeMid
    #[test]
    fn cleaning_scenario_yields_empty_table() {
        let table = Table::new(
            vec![
                "Age".to_string(),
                "BMI".to_string(),
                "HHIncomeMid".to_string(),
                "BPSysAve".to_string(),
            ],
            array![
                [34.0, f64::NAN, 40000.0, 121.0],
                [f64::NAN, 26.0, 35000.0, 117.0]
            ],
        )
        .unwrap();

        let complete = drop_missing(&table);
        let cleaned =
            drop_columns(&complete, &["BMI".to_string(), "HHIncomeMid".to_string()]).unwrap();

        assert_eq!(cleaned.n_rows(), 0);
        assert_eq!(
            cleaned.columns(),
            &["Age".to_string(), "BPSysAve".to_string()]
        );
    }
}
