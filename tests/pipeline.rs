//! Сквозной прогон конвейера на синтетическом CSV

use std::io::Write;

use nhanes_ml::{run_analysis, AnalysisConfig, Table};
use tempfile::NamedTempFile;

// Таблица в духе NHANES: 60 полных строк + 2 строки с пропусками
fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Age,Pulse,Weight,BMI,HHIncomeMid,BPSysAve").unwrap();
    for i in 0..60usize {
        let age = 20.0 + (i % 40) as f64;
        let pulse = 60.0 + ((i * 7) % 25) as f64;
        let weight = 55.0 + ((i * 13) % 40) as f64;
        let bmi = 20.0 + (i % 12) as f64;
        let income = 30000.0 + ((i * 997) % 40000) as f64;
        let bp = 90.0 + 0.8 * age + 0.2 * pulse + ((i * 3) % 5) as f64;
        writeln!(file, "{age},{pulse},{weight},{bmi},{income},{bp}").unwrap();
    }
    writeln!(file, "31,NA,70,22,35000,118").unwrap();
    writeln!(file, "NA,72,71,23,36000,119").unwrap();
    file.flush().unwrap();
    file
}

fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        cv_folds: 5,
        n_trees: 25,
        ..AnalysisConfig::default()
    }
}

#[test]
fn full_analysis_run() {
    let file = write_dataset();
    let table = Table::from_csv(file.path()).unwrap();
    assert_eq!(table.n_rows(), 62);
    assert_eq!(table.n_cols(), 6);

    let report = run_analysis(&table, &test_config()).unwrap();

    assert_eq!(report.rows_loaded, 62);
    assert_eq!(report.rows_after_cleaning, 60);
    assert_eq!(report.rows_after_outlier_filter, 60);

    // Отклик и удаленные колонки не попадают в признаки
    assert_eq!(
        report.feature_names,
        vec!["Age".to_string(), "Pulse".to_string(), "Weight".to_string()]
    );

    // Сводка и корреляции считаются после очистки
    let summary_columns: Vec<&str> = report.summary.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(summary_columns, vec!["Age", "Pulse", "Weight", "BPSysAve"]);
    assert!(report.summary.iter().all(|s| s.count == 60));
    for (j, row) in report.correlation.values.iter().enumerate() {
        assert_eq!(row[j], 1.0);
    }

    // Почти линейные данные: МНК обязан объяснить большую часть дисперсии
    assert!(report.linear.r2 > 0.8, "linear R2 = {}", report.linear.r2);
    assert!(report.linear.r2 <= 1.0 + 1e-9);
    assert_eq!(report.linear.coefficients.len(), 3);
    assert_eq!(report.linear.observed.len(), 12);
    assert_eq!(report.linear.predicted.len(), 12);
    for i in 0..12 {
        let expected = report.linear.observed[i] - report.linear.predicted[i];
        assert!((report.linear.residuals[i] - expected).abs() < 1e-9);
    }

    // Лес: полная сетка 3 x 4, осмысленное качество на тесте
    assert_eq!(report.forest.cv_results.len(), 12);
    assert!(report.forest.r2 > 0.3, "forest R2 = {}", report.forest.r2);
    assert!(report.forest.r2 <= 1.0 + 1e-9);
    assert_eq!(report.forest.observed.len(), 12);
    assert_eq!(report.forest.predicted.len(), 12);
}

#[test]
fn analysis_is_deterministic_for_a_fixed_seed() {
    let file = write_dataset();
    let table = Table::from_csv(file.path()).unwrap();
    let config = test_config();

    let a = run_analysis(&table, &config).unwrap();
    let b = run_analysis(&table, &config).unwrap();

    assert_eq!(a.linear.predicted, b.linear.predicted);
    assert_eq!(a.forest.predicted, b.forest.predicted);
    assert_eq!(a.forest.best_params, b.forest.best_params);
}

#[test]
fn different_seeds_change_the_partition() {
    let file = write_dataset();
    let table = Table::from_csv(file.path()).unwrap();

    let mut config_a = test_config();
    config_a.seed = 100;
    let mut config_b = test_config();
    config_b.seed = 123;

    let a = run_analysis(&table, &config_a).unwrap();
    let b = run_analysis(&table, &config_b).unwrap();

    // Наблюдаемые значения теста зависят только от разбиения
    assert_ne!(a.linear.observed, b.linear.observed);
}
