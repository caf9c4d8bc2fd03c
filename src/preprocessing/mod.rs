//! Модуль предобработки данных

pub mod cleaning;
pub mod normalization;
pub mod outliers;
pub mod split;

pub use normalization::DataNormalizer;
pub use outliers::ZScoreFilter;
pub use split::{train_test_split, Split};
