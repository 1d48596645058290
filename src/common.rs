pub mod error;

pub use error::{AggregationError, AppError, ConfigError};
