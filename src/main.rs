//! CLI для анализа артериального давления по данным NHANES

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use nhanes_ml::{run_analysis, AnalysisConfig, AnalysisReport, Table};

#[derive(Parser, Debug)]
#[command(
    name = "nhanes-ml",
    version,
    about = "NHANES blood pressure analysis pipeline"
)]
struct Args {
    /// CSV файл с данными обследования
    data: PathBuf,

    /// Колонка отклика
    #[arg(long)]
    response: Option<String>,

    /// Удаляемые коллинеарные колонки (через запятую)
    #[arg(long = "drop", value_delimiter = ',')]
    drop_columns: Option<Vec<String>>,

    /// Доля тестовой выборки
    #[arg(long)]
    test_ratio: Option<f64>,

    /// Зерно генератора случайных чисел
    #[arg(long)]
    seed: Option<u64>,

    /// Порог |z| для фильтрации выбросов
    #[arg(long)]
    outlier_threshold: Option<f64>,

    /// Число фолдов кросс-валидации
    #[arg(long)]
    cv_folds: Option<usize>,

    /// Число деревьев в лесу
    #[arg(long)]
    n_trees: Option<usize>,

    /// JSON файл конфигурации (флаги командной строки имеют приоритет)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Записать полный отчет в JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Логировать только предупреждения
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Инициализация логирования
    let filter = if args.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str::<AnalysisConfig>(&raw)
                .with_context(|| format!("failed to parse config '{}'", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(response) = args.response {
        config.response = response;
    }
    if let Some(drop_columns) = args.drop_columns {
        config.drop_columns = drop_columns;
    }
    if let Some(test_ratio) = args.test_ratio {
        config.test_ratio = test_ratio;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(outlier_threshold) = args.outlier_threshold {
        config.outlier_threshold = outlier_threshold;
    }
    if let Some(cv_folds) = args.cv_folds {
        config.cv_folds = cv_folds;
    }
    if let Some(n_trees) = args.n_trees {
        config.n_trees = n_trees;
    }

    let table = Table::from_csv(&args.data)
        .with_context(|| format!("failed to load dataset '{}'", args.data.display()))?;
    let report = run_analysis(&table, &config).context("analysis failed")?;

    print_report(&report);

    if let Some(path) = &args.json {
        let serialized = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, serialized)
            .with_context(|| format!("failed to write report '{}'", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }

    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!(
        "Rows: {} loaded / {} after cleaning / {} after outlier filter",
        report.rows_loaded, report.rows_after_cleaning, report.rows_after_outlier_filter
    );
    println!();

    println!("Column summary:");
    println!(
        "{:<14} {:>7} {:>12} {:>12} {:>12} {:>12}",
        "column", "count", "mean", "std", "min", "max"
    );
    for s in &report.summary {
        println!(
            "{:<14} {:>7} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            s.column, s.count, s.mean, s.std, s.min, s.max
        );
    }
    println!();

    println!("Correlation matrix:");
    print!("{:<14}", "");
    for column in &report.correlation.columns {
        print!(" {column:>10}");
    }
    println!();
    for (i, column) in report.correlation.columns.iter().enumerate() {
        print!("{column:<14}");
        for value in &report.correlation.values[i] {
            print!(" {value:>10.3}");
        }
        println!();
    }
    println!();

    println!("Linear regression (OLS):");
    println!(
        "  R2 = {:.4}, MSE = {:.4}, intercept = {:.4}",
        report.linear.r2, report.linear.mse, report.linear.intercept
    );
    for c in &report.linear.coefficients {
        println!("  {:<14} {:>10.4}", c.feature, c.coefficient);
    }
    println!();

    println!(
        "Random forest ({} trees, {}-fold CV grid search):",
        report.config.n_trees, report.config.cv_folds
    );
    println!(
        "  best: max_features = {}, max_depth = {}",
        report.forest.best_params.max_features,
        depth_label(report.forest.best_params.max_depth)
    );
    println!(
        "  R2 = {:.4}, MSE = {:.4} (best CV R2 = {:.4})",
        report.forest.r2, report.forest.mse, report.forest.best_cv_score
    );
    println!("  CV results:");
    for record in &report.forest.cv_results {
        println!(
            "  {:<6} {:<6} mean R2 = {:>8.4} (+/- {:.4})",
            record.params.max_features.to_string(),
            depth_label(record.params.max_depth),
            record.mean_score,
            record.std_score
        );
    }
}

fn depth_label(depth: Option<usize>) -> String {
    match depth {
        Some(depth) => depth.to_string(),
        None => "none".to_string(),
    }
}
