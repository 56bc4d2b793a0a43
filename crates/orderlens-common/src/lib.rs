//! # OrderLens Common
//!
//! Shared types, the order dataset loader, error handling and logging for
//! the OrderLens workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod dataset;
pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use dataset::{parse_timestamp, Dataset, REQUIRED_COLUMNS};
pub use error::{LoadError, OrderLensError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
