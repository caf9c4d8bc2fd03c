//! Конвейер анализа: очистка, разбиение, обучение, оценка

use chrono::Utc;

use crate::dataset::Table;
use crate::error::{AnalysisError, Result};
use crate::models::{mean_squared_error, r2_score, residuals, GridSearch, LinearRegression};
use crate::preprocessing::cleaning;
use crate::preprocessing::{train_test_split, DataNormalizer, ZScoreFilter};
use crate::stats;
use crate::types::{AnalysisConfig, AnalysisReport, FeatureCoefficient, ForestReport, LinearReport};

/// Полный прогон анализа над загруженной таблицей
pub fn run_analysis(table: &Table, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let rows_loaded = table.n_rows();
    tracing::info!(
        "Loaded table: {} rows, {} columns",
        rows_loaded,
        table.n_cols()
    );

    // Очистка: сначала строки с пропусками, затем коллинеарные колонки
    let complete = cleaning::drop_missing(table);
    let cleaned = cleaning::drop_columns(&complete, &config.drop_columns)?;
    let rows_after_cleaning = cleaned.n_rows();
    tracing::info!(
        "After cleaning: {} rows, {} columns",
        rows_after_cleaning,
        cleaned.n_cols()
    );

    // Инспекция: сводки и корреляции (на ход анализа не влияют)
    let summary = stats::summarize(&cleaned);
    let correlation = stats::correlation_matrix(&cleaned);

    let filter = ZScoreFilter::new(config.outlier_threshold);
    let filtered = filter.filter(&cleaned);
    let rows_after_outlier_filter = filtered.n_rows();
    tracing::info!(
        "Outlier filter removed {} rows",
        rows_after_cleaning - rows_after_outlier_filter
    );

    let split = train_test_split(&filtered, &config.response, config.test_ratio, config.seed)?;
    tracing::info!(
        "Split: {} train rows, {} test rows",
        split.x_train.nrows(),
        split.x_test.nrows()
    );

    // Стандартизатор обучается только на train
    let mut normalizer = DataNormalizer::new();
    let x_train_scaled = normalizer.fit_transform(&split.x_train)?;
    let x_test_scaled = normalizer.transform(&split.x_test)?;

    // Модель A: линейная регрессия на стандартизованных признаках
    let mut linear = LinearRegression::new();
    linear.fit(&x_train_scaled, &split.y_train)?;
    let linear_predicted = linear.predict(&x_test_scaled)?;
    let coefficients = linear
        .coefficients()
        .ok_or(AnalysisError::NotFitted("linear model"))?;
    let linear_report = LinearReport {
        r2: r2_score(&split.y_test, &linear_predicted),
        mse: mean_squared_error(&split.y_test, &linear_predicted),
        intercept: linear.intercept().unwrap_or(0.0),
        coefficients: split
            .feature_names
            .iter()
            .zip(coefficients.iter())
            .map(|(feature, coefficient)| FeatureCoefficient {
                feature: feature.clone(),
                coefficient: *coefficient,
            })
            .collect(),
        observed: split.y_test.to_vec(),
        predicted: linear_predicted.to_vec(),
        residuals: residuals(&split.y_test, &linear_predicted).to_vec(),
    };
    tracing::info!("Linear model: R2 = {:.4}", linear_report.r2);

    // Модель B: случайный лес с перебором гиперпараметров.
    // Деревья нечувствительны к масштабу, обучаем на исходных признаках
    let search = GridSearch::new(
        config.grid.clone(),
        config.cv_folds,
        config.n_trees,
        config.seed,
    );
    let search_result = search.fit(&split.x_train, &split.y_train)?;
    let forest_predicted = search_result.model.predict(&split.x_test)?;
    let forest_report = ForestReport {
        r2: r2_score(&split.y_test, &forest_predicted),
        mse: mean_squared_error(&split.y_test, &forest_predicted),
        best_params: search_result.best_params,
        best_cv_score: search_result.best_score,
        cv_results: search_result.cv_results,
        observed: split.y_test.to_vec(),
        predicted: forest_predicted.to_vec(),
        residuals: residuals(&split.y_test, &forest_predicted).to_vec(),
    };
    tracing::info!(
        "Random forest: R2 = {:.4} (max_features = {}, max_depth = {:?})",
        forest_report.r2,
        forest_report.best_params.max_features,
        forest_report.best_params.max_depth
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        config: config.clone(),
        rows_loaded,
        rows_after_cleaning,
        rows_after_outlier_filter,
        feature_names: split.feature_names.clone(),
        summary,
        correlation,
        linear: linear_report,
        forest: forest_report,
    })
}
