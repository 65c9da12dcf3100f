//! Synthetic absence records for time-tracking tests and demos.
//!
//! This crate generates batches of plausible, randomly varied absences
//! (vacation, sick leave, overtime reduction and the other leave categories)
//! that always satisfy the absence model's invariants.
//!
//! # Example
//!
//! ```
//! use absence_mocks::mocks::{create_absence_mocks, AbsenceMockOptions};
//!
//! let absences = create_absence_mocks(&AbsenceMockOptions { count: 10, ..Default::default() }).unwrap();
//! assert_eq!(absences.len(), 10);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dates;
pub mod error;
pub mod mocks;
pub mod models;
pub mod random;
