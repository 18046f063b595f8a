//! Passenger records and input validation
//!
//! A [`PassengerRecord`] is one row of the manifest after ingestion. Every
//! field except `age` is required; `age` is legitimately missing for part of
//! the manifest and is the only field the analysis tolerates being absent.
//!
//! Ingestion layers that read loosely-typed data (CSV cells, JSON objects
//! with optional keys) produce a [`PassengerRow`] first and convert it with
//! [`PassengerRow::into_record`], which reports exactly which required field
//! is missing instead of coercing it to a default.
//!
//! # Class Labels
//!
//! Manifests store passenger class as a numeric code. [`class_name_from_code`]
//! maps the three known codes to their labels. Labels are otherwise opaque:
//! the analysis groups by whatever label it is given.
//!
//! # Examples
//!
//! ```
//! use lifeboat_analysis::passenger::{PassengerRecord, PassengerRow, ValidationError};
//!
//! let record = PassengerRecord::new(1, "Third", "male", Some(22.0), 0).unwrap();
//! assert!(!record.has_survived());
//!
//! let row = PassengerRow {
//!     passenger_id: Some(2),
//!     class_name: Some("First".to_owned()),
//!     sex: None,
//!     age: Some(38.0),
//!     survived: Some(1),
//! };
//! assert!(matches!(
//!     row.into_record(1),
//!     Err(ValidationError::MissingField { row: 1, field: "sex" })
//! ));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::age_group::AgeGroup;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ValidationError {
    #[display("row {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[display("passenger {passenger_id}: required field '{field}' is empty")]
    EmptyField {
        passenger_id: u32,
        field: &'static str,
    },
    #[display("passenger {passenger_id}: survived must be 0 or 1, got {value}")]
    InvalidSurvived { passenger_id: u32, value: i64 },
    #[display("passenger {passenger_id}: age must be a non-negative finite number, got {age}")]
    InvalidAge { passenger_id: u32, age: f64 },
    #[display("passenger id {passenger_id} appears more than once")]
    DuplicatePassengerId { passenger_id: u32 },
}

/// Maps a numeric passenger class code to its label.
///
/// Codes outside 1-3 are kept as their own label (`"Class <code>"`) rather
/// than rejected.
///
/// # Examples
///
/// ```
/// use lifeboat_analysis::passenger::class_name_from_code;
///
/// assert_eq!(class_name_from_code(1), "First");
/// assert_eq!(class_name_from_code(3), "Third");
/// assert_eq!(class_name_from_code(4), "Class 4");
/// ```
#[must_use]
pub fn class_name_from_code(code: i64) -> String {
    match code {
        1 => "First".to_owned(),
        2 => "Second".to_owned(),
        3 => "Third".to_owned(),
        _ => format!("Class {code}"),
    }
}

/// A validated manifest row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Unique passenger identifier
    pub passenger_id: u32,
    /// Class label (`"First"`, `"Second"`, `"Third"`, or any other label)
    pub class_name: String,
    /// Sex label (`"male"`, `"female"`, or any other label)
    pub sex: String,
    /// Age in years, if recorded
    pub age: Option<f64>,
    /// 1 if the passenger survived, 0 otherwise
    pub survived: u8,
}

impl PassengerRecord {
    /// Creates a record, validating every field.
    pub fn new(
        passenger_id: u32,
        class_name: impl Into<String>,
        sex: impl Into<String>,
        age: Option<f64>,
        survived: u8,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            passenger_id,
            class_name: class_name.into(),
            sex: sex.into(),
            age,
            survived,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks the field-level invariants of a single record.
    ///
    /// Uniqueness of `passenger_id` is a property of a whole manifest and is
    /// checked by [`validate_manifest`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let passenger_id = self.passenger_id;
        if self.class_name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                passenger_id,
                field: "class_name",
            });
        }
        if self.sex.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                passenger_id,
                field: "sex",
            });
        }
        if self.survived > 1 {
            return Err(ValidationError::InvalidSurvived {
                passenger_id,
                value: i64::from(self.survived),
            });
        }
        if let Some(age) = self.age.filter(|age| !(age.is_finite() && *age >= 0.0)) {
            return Err(ValidationError::InvalidAge { passenger_id, age });
        }
        Ok(())
    }

    #[must_use]
    pub fn has_survived(&self) -> bool {
        self.survived == 1
    }

    /// Age group of this passenger ([`AgeGroup::Unknown`] if age is missing).
    #[must_use]
    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_optional_age(self.age)
    }
}

/// Validates every record and the uniqueness of passenger ids.
///
/// Stops at the first violation.
pub fn validate_manifest(passengers: &[PassengerRecord]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for passenger in passengers {
        passenger.validate()?;
        if !seen.insert(passenger.passenger_id) {
            return Err(ValidationError::DuplicatePassengerId {
                passenger_id: passenger.passenger_id,
            });
        }
    }
    Ok(())
}

/// A manifest row whose fields may be missing.
///
/// Produced by ingestion code before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassengerRow {
    pub passenger_id: Option<u32>,
    pub class_name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<f64>,
    pub survived: Option<i64>,
}

impl PassengerRow {
    /// Converts into a validated record.
    ///
    /// `row` is the position of this row in its source (used only in error
    /// messages). Missing or blank required fields are reported as
    /// [`ValidationError::MissingField`]; a missing age is accepted.
    pub fn into_record(self, row: usize) -> Result<PassengerRecord, ValidationError> {
        let missing = |field: &'static str| ValidationError::MissingField { row, field };
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let passenger_id = self.passenger_id.ok_or_else(|| missing("passenger_id"))?;
        let class_name = non_blank(self.class_name).ok_or_else(|| missing("class_name"))?;
        let sex = non_blank(self.sex).ok_or_else(|| missing("sex"))?;
        let survived = self.survived.ok_or_else(|| missing("survived"))?;
        let survived = match survived {
            0 | 1 => u8::from(survived == 1),
            value => {
                return Err(ValidationError::InvalidSurvived {
                    passenger_id,
                    value,
                });
            }
        };

        PassengerRecord::new(passenger_id, class_name, sex, self.age, survived)
    }
}
