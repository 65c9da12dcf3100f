//! Configuration for the mock generators.
//!
//! [`MockConfig`] carries every probability, range and placeholder the
//! generators use. Its defaults reproduce the standard behaviour; a YAML file
//! can override any subset of them.
//!
//! # Example
//!
//! ```no_run
//! use absence_mocks::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/absence_mocks.yaml").unwrap().into_config();
//! println!("Approver id: {}", config.approver_id);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{Bounds, MAX_OVERTIME_HOURS, MAX_RANGE_DAYS, MockConfig, Probabilities};
