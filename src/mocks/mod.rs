//! Mock data generators.
//!
//! Currently absences only; see [`create_absence_mocks`].

mod absence;

pub use absence::{AbsenceMockOptions, create_absence_mocks, create_absence_mocks_with};
