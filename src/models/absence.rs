//! Absence model and related types.
//!
//! This module defines the [`Absence`] record together with the
//! [`AbsenceType`] and [`AbsenceStatus`] enumerations and the
//! [`AbsenceDetails`] sum type that carries the variant-specific fields.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MockError, MockResult};

/// The category of an absence.
///
/// Each variant has a stable numeric code, see [`AbsenceType::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceType {
    /// Ordinary paid vacation.
    RegularHoliday,
    /// Paid special leave (wedding, bereavement, moving house).
    SpecialLeave,
    /// Time off taken against accumulated overtime, measured in hours.
    ReductionOfOvertime,
    /// Sick day of the employee.
    SickDay,
    /// Sick day to care for a dependent child.
    SickDayOfChild,
    /// School or further education.
    SchoolFurtherEducation,
    /// Maternity protection period.
    MaternityProtection,
    /// Working from home.
    HomeOffice,
    /// Working away from the office (client site, trade fair).
    WorkOutOfOffice,
    /// Unpaid special leave.
    SpecialLeaveUnpaid,
    /// Unpaid sick day.
    SickDayUnpaid,
    /// Unpaid sick day to care for a dependent child.
    SickDayOfChildUnpaid,
    /// Quarantine.
    Quarantine,
    /// Military or civil service.
    MilitaryService,
}

impl AbsenceType {
    /// Every absence type, in code order.
    pub const ALL: [AbsenceType; 14] = [
        AbsenceType::RegularHoliday,
        AbsenceType::SpecialLeave,
        AbsenceType::ReductionOfOvertime,
        AbsenceType::SickDay,
        AbsenceType::SickDayOfChild,
        AbsenceType::SchoolFurtherEducation,
        AbsenceType::MaternityProtection,
        AbsenceType::HomeOffice,
        AbsenceType::WorkOutOfOffice,
        AbsenceType::SpecialLeaveUnpaid,
        AbsenceType::SickDayUnpaid,
        AbsenceType::SickDayOfChildUnpaid,
        AbsenceType::Quarantine,
        AbsenceType::MilitaryService,
    ];

    /// The types that are neither overtime reduction nor a (paid) sick day, in code order.
    pub const PLAIN: [AbsenceType; 11] = [
        AbsenceType::RegularHoliday,
        AbsenceType::SpecialLeave,
        AbsenceType::SchoolFurtherEducation,
        AbsenceType::MaternityProtection,
        AbsenceType::HomeOffice,
        AbsenceType::WorkOutOfOffice,
        AbsenceType::SpecialLeaveUnpaid,
        AbsenceType::SickDayUnpaid,
        AbsenceType::SickDayOfChildUnpaid,
        AbsenceType::Quarantine,
        AbsenceType::MilitaryService,
    ];

    /// Returns the numeric code of the type.
    ///
    /// # Example
    ///
    /// ```
    /// use absence_mocks::models::AbsenceType;
    ///
    /// assert_eq!(AbsenceType::RegularHoliday.code(), 1);
    /// assert_eq!(AbsenceType::ReductionOfOvertime.code(), 3);
    /// ```
    pub fn code(self) -> u8 {
        match self {
            AbsenceType::RegularHoliday => 1,
            AbsenceType::SpecialLeave => 2,
            AbsenceType::ReductionOfOvertime => 3,
            AbsenceType::SickDay => 4,
            AbsenceType::SickDayOfChild => 5,
            AbsenceType::SchoolFurtherEducation => 6,
            AbsenceType::MaternityProtection => 7,
            AbsenceType::HomeOffice => 8,
            AbsenceType::WorkOutOfOffice => 9,
            AbsenceType::SpecialLeaveUnpaid => 10,
            AbsenceType::SickDayUnpaid => 11,
            AbsenceType::SickDayOfChildUnpaid => 12,
            AbsenceType::Quarantine => 13,
            AbsenceType::MilitaryService => 14,
        }
    }

    /// Returns true for the types that carry a sick note.
    pub fn is_sick(self) -> bool {
        matches!(self, AbsenceType::SickDay | AbsenceType::SickDayOfChild)
    }

    /// Returns true for the types listed in [`AbsenceType::PLAIN`].
    pub fn is_plain(self) -> bool {
        !self.is_sick() && self != AbsenceType::ReductionOfOvertime
    }
}

impl std::fmt::Display for AbsenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AbsenceType::RegularHoliday => "Regular holiday",
            AbsenceType::SpecialLeave => "Special leave",
            AbsenceType::ReductionOfOvertime => "Reduction of overtime",
            AbsenceType::SickDay => "Sick day",
            AbsenceType::SickDayOfChild => "Sick day of child",
            AbsenceType::SchoolFurtherEducation => "School / further education",
            AbsenceType::MaternityProtection => "Maternity protection",
            AbsenceType::HomeOffice => "Home office",
            AbsenceType::WorkOutOfOffice => "Work out of office",
            AbsenceType::SpecialLeaveUnpaid => "Special leave (unpaid)",
            AbsenceType::SickDayUnpaid => "Sick day (unpaid)",
            AbsenceType::SickDayOfChildUnpaid => "Sick day of child (unpaid)",
            AbsenceType::Quarantine => "Quarantine",
            AbsenceType::MilitaryService => "Military service",
        };
        write!(f, "{}", name)
    }
}

/// The approval state of an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceStatus {
    /// Requested, awaiting a decision.
    Requested,
    /// Approved by a manager.
    Approved,
    /// Declined by a manager.
    Declined,
    /// Approved first, then withdrawn by a manager.
    ApprovalCancelled,
    /// Withdrawn by the requesting user.
    RequestCancelled,
}

impl AbsenceStatus {
    /// Every status, in code order.
    pub const ALL: [AbsenceStatus; 5] = [
        AbsenceStatus::Requested,
        AbsenceStatus::Approved,
        AbsenceStatus::Declined,
        AbsenceStatus::ApprovalCancelled,
        AbsenceStatus::RequestCancelled,
    ];

    /// Returns the numeric code of the status.
    pub fn code(self) -> u8 {
        match self {
            AbsenceStatus::Requested => 0,
            AbsenceStatus::Approved => 1,
            AbsenceStatus::Declined => 2,
            AbsenceStatus::ApprovalCancelled => 3,
            AbsenceStatus::RequestCancelled => 4,
        }
    }
}

impl std::fmt::Display for AbsenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsenceStatus::Requested => write!(f, "Requested"),
            AbsenceStatus::Approved => write!(f, "Approved"),
            AbsenceStatus::Declined => write!(f, "Declined"),
            AbsenceStatus::ApprovalCancelled => write!(f, "Approval cancelled"),
            AbsenceStatus::RequestCancelled => write!(f, "Request cancelled"),
        }
    }
}

/// The variant-specific part of an absence.
///
/// Overtime reductions are counted in hours, every other variant in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AbsenceDetails {
    /// Time off against accumulated overtime.
    ReductionOfOvertime {
        /// Hours taken off.
        count_hours: Decimal,
    },
    /// A sick day of the employee or of a dependent child.
    Sick {
        /// Either [`AbsenceType::SickDay`] or [`AbsenceType::SickDayOfChild`].
        #[serde(rename = "type")]
        absence_type: AbsenceType,
        /// Days absent (0.5 for a half day).
        count_days: Decimal,
        /// Whether a medical certificate was supplied.
        sick_note: bool,
    },
    /// Any other absence type.
    Plain {
        /// One of [`AbsenceType::PLAIN`].
        #[serde(rename = "type")]
        absence_type: AbsenceType,
        /// Days absent (0.5 for a half day).
        count_days: Decimal,
    },
}

/// A user's time away from work.
///
/// Dates are ISO calendar dates (`YYYY-MM-DD`).
///
/// # Example
///
/// ```
/// use absence_mocks::models::{Absence, AbsenceDetails, AbsenceStatus, AbsenceType};
/// use rust_decimal::Decimal;
///
/// let absence = Absence {
///     id: 0,
///     users_id: 0,
///     date_since: "2020-07-06".to_string(),
///     date_until: "2020-07-10".to_string(),
///     status: AbsenceStatus::Requested,
///     note: None,
///     date_enquired: None,
///     date_approved: None,
///     approved_by: None,
///     details: AbsenceDetails::Plain {
///         absence_type: AbsenceType::RegularHoliday,
///         count_days: Decimal::new(5, 0),
///     },
/// };
/// assert_eq!(absence.count_days(), Some(Decimal::new(5, 0)));
/// assert_eq!(absence.count_hours(), None);
/// assert!(absence.check_invariants().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// Position of the record within its batch.
    pub id: u64,
    /// The owning user.
    pub users_id: u64,
    /// First day of the absence (inclusive).
    pub date_since: String,
    /// Last day of the absence (inclusive).
    pub date_until: String,
    /// Approval state.
    pub status: AbsenceStatus,
    /// Optional free-text note.
    pub note: Option<String>,
    /// When the absence was requested.
    pub date_enquired: Option<String>,
    /// When the absence was approved; set only for approved absences.
    pub date_approved: Option<String>,
    /// Who approved the absence; set only for approved absences.
    pub approved_by: Option<u64>,
    /// Variant-specific fields.
    #[serde(flatten)]
    pub details: AbsenceDetails,
}

impl Absence {
    /// Returns the absence type.
    pub fn absence_type(&self) -> AbsenceType {
        match &self.details {
            AbsenceDetails::ReductionOfOvertime { .. } => AbsenceType::ReductionOfOvertime,
            AbsenceDetails::Sick { absence_type, .. } => *absence_type,
            AbsenceDetails::Plain { absence_type, .. } => *absence_type,
        }
    }

    /// Returns the day count, `None` for overtime reductions.
    pub fn count_days(&self) -> Option<Decimal> {
        match &self.details {
            AbsenceDetails::ReductionOfOvertime { .. } => None,
            AbsenceDetails::Sick { count_days, .. } | AbsenceDetails::Plain { count_days, .. } => {
                Some(*count_days)
            }
        }
    }

    /// Returns the hour count, `Some` only for overtime reductions.
    pub fn count_hours(&self) -> Option<Decimal> {
        match &self.details {
            AbsenceDetails::ReductionOfOvertime { count_hours } => Some(*count_hours),
            _ => None,
        }
    }

    /// Returns whether a medical certificate was supplied, `Some` only for sick absences.
    pub fn sick_note(&self) -> Option<bool> {
        match &self.details {
            AbsenceDetails::Sick { sick_note, .. } => Some(*sick_note),
            _ => None,
        }
    }

    /// Returns true if the absence has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }

    /// Checks the record against the model invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::InvariantViolation`] describing the first broken invariant:
    /// - dates that are not ISO calendar dates
    /// - `date_since` after `date_until`, or the two in different years
    /// - approval fields set without approval, or missing with it
    /// - a type that does not belong to its variant
    /// - a day count that is neither 0.5 nor at least 1, or a non-positive hour count
    pub fn check_invariants(&self) -> MockResult<()> {
        let since = self.parse_date("date_since", &self.date_since)?;
        let until = self.parse_date("date_until", &self.date_until)?;

        if since > until {
            return Err(self.violation(format!(
                "date_since {} is after date_until {}",
                since, until
            )));
        }
        if since.year() != until.year() {
            return Err(self.violation(format!(
                "date_since {} and date_until {} are in different years",
                since, until
            )));
        }

        if let Some(enquired) = &self.date_enquired {
            self.parse_date("date_enquired", enquired)?;
        }
        if let Some(approved) = &self.date_approved {
            self.parse_date("date_approved", approved)?;
        }

        let has_approval = self.date_approved.is_some() && self.approved_by.is_some();
        let has_any_approval = self.date_approved.is_some() || self.approved_by.is_some();
        if self.is_approved() && !has_approval {
            return Err(self.violation("approved absence lacks approval fields".to_string()));
        }
        if !self.is_approved() && has_any_approval {
            return Err(self.violation(format!(
                "{} absence carries approval fields",
                self.status
            )));
        }

        match &self.details {
            AbsenceDetails::ReductionOfOvertime { count_hours } => {
                if *count_hours <= Decimal::ZERO {
                    return Err(self.violation(format!(
                        "count_hours {} is not positive",
                        count_hours
                    )));
                }
            }
            AbsenceDetails::Sick {
                absence_type,
                count_days,
                ..
            } => {
                if !absence_type.is_sick() {
                    return Err(self.violation(format!("{} is not a sick type", absence_type)));
                }
                self.check_count_days(*count_days)?;
            }
            AbsenceDetails::Plain {
                absence_type,
                count_days,
            } => {
                if !absence_type.is_plain() {
                    return Err(self.violation(format!("{} is not a plain type", absence_type)));
                }
                self.check_count_days(*count_days)?;
            }
        }

        Ok(())
    }

    fn check_count_days(&self, count_days: Decimal) -> MockResult<()> {
        if count_days == Decimal::new(5, 1) || count_days >= Decimal::ONE {
            Ok(())
        } else {
            Err(self.violation(format!("count_days {} is neither 0.5 nor >= 1", count_days)))
        }
    }

    fn parse_date(&self, field: &str, value: &str) -> MockResult<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| self.violation(format!("{} '{}' is not an ISO date", field, value)))
    }

    fn violation(&self, message: String) -> MockError {
        MockError::InvariantViolation {
            id: self.id,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_absence(details: AbsenceDetails) -> Absence {
        Absence {
            id: 3,
            users_id: 0,
            date_since: "2020-03-02".to_string(),
            date_until: "2020-03-06".to_string(),
            status: AbsenceStatus::Requested,
            note: None,
            date_enquired: Some("2020-01-15".to_string()),
            date_approved: None,
            approved_by: None,
            details,
        }
    }

    fn plain(count_days: Decimal) -> AbsenceDetails {
        AbsenceDetails::Plain {
            absence_type: AbsenceType::RegularHoliday,
            count_days,
        }
    }

    #[test]
    fn test_plain_and_sick_partition_the_rest() {
        for absence_type in AbsenceType::ALL {
            let in_plain = AbsenceType::PLAIN.contains(&absence_type);
            assert_eq!(in_plain, absence_type.is_plain(), "{:?}", absence_type);
        }
        assert_eq!(
            AbsenceType::ALL.iter().filter(|t| t.is_sick()).count(),
            2
        );
    }

    #[test]
    fn test_codes_follow_declaration_order() {
        for (i, absence_type) in AbsenceType::ALL.iter().enumerate() {
            assert_eq!(absence_type.code() as usize, i + 1);
        }
        for (i, status) in AbsenceStatus::ALL.iter().enumerate() {
            assert_eq!(status.code() as usize, i);
        }
    }

    #[test]
    fn test_overtime_accessors() {
        let absence = make_absence(AbsenceDetails::ReductionOfOvertime {
            count_hours: Decimal::new(375, 2),
        });
        assert_eq!(absence.absence_type(), AbsenceType::ReductionOfOvertime);
        assert_eq!(absence.count_hours(), Some(Decimal::new(375, 2)));
        assert_eq!(absence.count_days(), None);
        assert_eq!(absence.sick_note(), None);
    }

    #[test]
    fn test_sick_accessors() {
        let absence = make_absence(AbsenceDetails::Sick {
            absence_type: AbsenceType::SickDayOfChild,
            count_days: Decimal::new(2, 0),
            sick_note: true,
        });
        assert_eq!(absence.absence_type(), AbsenceType::SickDayOfChild);
        assert_eq!(absence.count_days(), Some(Decimal::new(2, 0)));
        assert_eq!(absence.count_hours(), None);
        assert_eq!(absence.sick_note(), Some(true));
        assert!(absence.check_invariants().is_ok());
    }

    #[test]
    fn test_half_day_is_valid() {
        let mut absence = make_absence(plain(Decimal::new(5, 1)));
        absence.date_until = absence.date_since.clone();
        assert!(absence.check_invariants().is_ok());
    }

    #[test]
    fn test_reversed_dates_violate() {
        let mut absence = make_absence(plain(Decimal::ONE));
        absence.date_since = "2020-03-07".to_string();
        let err = absence.check_invariants().unwrap_err();
        assert!(err.to_string().contains("is after date_until"));
    }

    #[test]
    fn test_year_boundary_violates() {
        let mut absence = make_absence(plain(Decimal::ONE));
        absence.date_since = "2020-12-30".to_string();
        absence.date_until = "2021-01-02".to_string();
        let err = absence.check_invariants().unwrap_err();
        assert!(err.to_string().contains("different years"));
    }

    #[test]
    fn test_approved_without_approver_violates() {
        let mut absence = make_absence(plain(Decimal::ONE));
        absence.status = AbsenceStatus::Approved;
        absence.date_approved = Some("2020-01-17".to_string());
        assert!(absence.check_invariants().is_err());

        absence.approved_by = Some(1);
        assert!(absence.check_invariants().is_ok());
    }

    #[test]
    fn test_declined_with_approval_date_violates() {
        let mut absence = make_absence(plain(Decimal::ONE));
        absence.status = AbsenceStatus::Declined;
        absence.date_approved = Some("2020-01-17".to_string());
        match absence.check_invariants() {
            Err(MockError::InvariantViolation { id, message }) => {
                assert_eq!(id, 3);
                assert_eq!(message, "Declined absence carries approval fields");
            }
            other => panic!("Expected InvariantViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_for_variant_violates() {
        let absence = make_absence(AbsenceDetails::Plain {
            absence_type: AbsenceType::SickDay,
            count_days: Decimal::ONE,
        });
        assert!(absence.check_invariants().is_err());

        let absence = make_absence(AbsenceDetails::Sick {
            absence_type: AbsenceType::HomeOffice,
            count_days: Decimal::ONE,
            sick_note: false,
        });
        assert!(absence.check_invariants().is_err());
    }

    #[test]
    fn test_count_bounds() {
        assert!(make_absence(plain(Decimal::new(75, 2))).check_invariants().is_err());
        assert!(
            make_absence(AbsenceDetails::ReductionOfOvertime {
                count_hours: Decimal::ZERO,
            })
            .check_invariants()
            .is_err()
        );
    }

    #[test]
    fn test_malformed_date_violates() {
        let mut absence = make_absence(plain(Decimal::ONE));
        absence.date_enquired = Some("15.01.2020".to_string());
        let err = absence.check_invariants().unwrap_err();
        assert!(err.to_string().contains("date_enquired"));
    }

    #[test]
    fn test_absence_serialization_is_flat() {
        let absence = make_absence(AbsenceDetails::Sick {
            absence_type: AbsenceType::SickDay,
            count_days: Decimal::new(3, 0),
            sick_note: false,
        });

        let json = serde_json::to_string(&absence).unwrap();
        assert!(json.contains("\"variant\":\"sick\""));
        assert!(json.contains("\"type\":\"sick_day\""));
        assert!(json.contains("\"count_days\":\"3\""));
        assert!(json.contains("\"date_since\":\"2020-03-02\""));

        let deserialized: Absence = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, absence);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AbsenceType::HomeOffice), "Home office");
        assert_eq!(format!("{}", AbsenceStatus::Approved), "Approved");
    }
}
