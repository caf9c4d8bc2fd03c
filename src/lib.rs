//! NHANES ML - Rust библиотека

pub mod dataset;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod stats;
pub mod types;

pub use dataset::Table;
pub use error::{AnalysisError, Result};
pub use models::*;
pub use pipeline::run_analysis;
pub use preprocessing::*;
pub use types::*;
