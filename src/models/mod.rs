//! Регрессионные модели и их оценка

pub mod forest;
pub mod linear;
pub mod metrics;
pub mod selection;
pub mod tree;

pub use forest::RandomForestRegressor;
pub use linear::LinearRegression;
pub use metrics::{mean_squared_error, r2_score, residuals};
pub use selection::{CvRecord, ForestParams, GridSearch, GridSearchResult, KFold, ParamGrid};
pub use tree::{DecisionTreeRegressor, MaxFeatures};
