//! Типы конфигурации и отчета

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CvRecord, ForestParams, ParamGrid};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Колонка отклика
    #[serde(default = "default_response")]
    pub response: String,
    /// Коллинеарные колонки, удаляемые перед анализом
    #[serde(default = "default_drop_columns")]
    pub drop_columns: Vec<String>,
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_outlier_threshold")]
    pub outlier_threshold: f64,
    #[serde(default = "default_cv_folds")]
    pub cv_folds: usize,
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    #[serde(default)]
    pub grid: ParamGrid,
}

fn default_response() -> String {
    "BPSysAve".to_string()
}
fn default_drop_columns() -> Vec<String> {
    vec!["BMI".to_string(), "HHIncomeMid".to_string()]
}
fn default_test_ratio() -> f64 {
    0.2
}
fn default_seed() -> u64 {
    123
}
fn default_outlier_threshold() -> f64 {
    3.0
}
fn default_cv_folds() -> usize {
    10
}
fn default_n_trees() -> usize {
    100
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            response: default_response(),
            drop_columns: default_drop_columns(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
            outlier_threshold: default_outlier_threshold(),
            cv_folds: default_cv_folds(),
            n_trees: default_n_trees(),
            grid: ParamGrid::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCoefficient {
    pub feature: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearReport {
    pub r2: f64,
    pub mse: f64,
    pub intercept: f64,
    pub coefficients: Vec<FeatureCoefficient>,
    pub observed: Vec<f64>,
    pub predicted: Vec<f64>,
    pub residuals: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestReport {
    pub r2: f64,
    pub mse: f64,
    pub best_params: ForestParams,
    pub best_cv_score: f64,
    pub cv_results: Vec<CvRecord>,
    pub observed: Vec<f64>,
    pub predicted: Vec<f64>,
    pub residuals: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub config: AnalysisConfig,
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub rows_after_outlier_filter: usize,
    pub feature_names: Vec<String>,
    pub summary: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
    pub linear: LinearReport,
    pub forest: ForestReport,
}
