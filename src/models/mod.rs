//! Core data models for the absence mock generator.

mod absence;

pub use absence::{Absence, AbsenceDetails, AbsenceStatus, AbsenceType};
