//! Student field validation.
//!
//! [`StudentPayload`] is the loosely-typed request body shared by create and
//! update. [`StudentPayload::validate`] turns it into [`StudentFields`], the
//! only input the store accepts, so nothing reaches persistence without
//! passing the presence and range checks below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grading::{grade_for_marks, Grade};

/// Returned when any of the five user fields is absent or blank.
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";

/// Returned when marks fall outside `[MIN_MARKS, MAX_MARKS]`.
pub const MSG_MARKS_RANGE: &str = "Marks must be between 0 and 100";

/// Returned when marks are supplied as text that is not a finite number.
pub const MSG_MARKS_NOT_NUMERIC: &str = "Marks must be a number";

/// Returned when the roll number is negative, fractional or not a number.
pub const MSG_ROLL_NO_INVALID: &str = "Roll number must be a positive whole number";

pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Kind of person the record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentRole {
    #[default]
    Student,
    User,
}

impl StudentRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StudentRole::Student => "student",
            StudentRole::User => "user",
        }
    }
}

impl fmt::Display for StudentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(StudentRole::Student),
            "user" => Ok(StudentRole::User),
            other => Err(CoreError::Validation(format!(
                "Role must be 'student' or 'user', got '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for StudentRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Request payload
// ---------------------------------------------------------------------------

/// A number as sent by a client: either a JSON number or the raw text of a
/// form input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Body of a create or update request.
///
/// Every field is optional here so a missing field surfaces as a validation
/// error instead of a body-parse error. A client-supplied `grade` is not
/// part of the payload and is dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: Option<String>,
    pub roll_no: Option<NumericInput>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub marks: Option<NumericInput>,
    pub role: Option<String>,
}

/// Validated user-editable fields of a student record.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFields {
    pub name: String,
    pub roll_no: i64,
    pub department: String,
    pub subject: String,
    pub marks: f64,
    pub role: StudentRole,
}

impl StudentFields {
    /// The grade these fields must be persisted with.
    pub fn grade(&self) -> Grade {
        grade_for_marks(self.marks)
    }
}

impl StudentPayload {
    /// Check presence first, then types, then the marks range.
    ///
    /// Zero marks are valid. A zero roll number counts as absent.
    pub fn validate(&self) -> Result<StudentFields, CoreError> {
        let name = non_blank(self.name.as_deref());
        let department = non_blank(self.department.as_deref());
        let subject = non_blank(self.subject.as_deref());
        let roll_no = self.roll_no.as_ref().filter(|v| !is_blank_or_zero(v));
        let marks = self.marks.as_ref().filter(|v| !is_blank(v));

        let (Some(name), Some(roll_no), Some(department), Some(subject), Some(marks)) =
            (name, roll_no, department, subject, marks)
        else {
            return Err(CoreError::Validation(MSG_FIELDS_REQUIRED.into()));
        };

        let roll_no = parse_roll_no(roll_no)?;
        let marks = parse_marks(marks)?;
        validate_marks_range(marks)?;

        let role = match non_blank(self.role.as_deref()) {
            Some(role) => role.parse()?,
            None => StudentRole::default(),
        };

        Ok(StudentFields {
            name: name.to_string(),
            roll_no,
            department: department.to_string(),
            subject: subject.to_string(),
            marks,
            role,
        })
    }
}

/// Reject marks outside `[0, 100]`. Never clamps.
pub fn validate_marks_range(marks: f64) -> Result<(), CoreError> {
    if !(MIN_MARKS..=MAX_MARKS).contains(&marks) {
        return Err(CoreError::Validation(MSG_MARKS_RANGE.into()));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn is_blank(value: &NumericInput) -> bool {
    matches!(value, NumericInput::Text(s) if s.trim().is_empty())
}

fn is_blank_or_zero(value: &NumericInput) -> bool {
    match value {
        NumericInput::Number(n) => *n == 0.0,
        NumericInput::Text(s) => {
            let s = s.trim();
            s.is_empty() || s.parse::<f64>().is_ok_and(|n| n == 0.0)
        }
    }
}

fn parse_roll_no(value: &NumericInput) -> Result<i64, CoreError> {
    let invalid = || CoreError::Validation(MSG_ROLL_NO_INVALID.into());
    let number = match value {
        NumericInput::Number(n) => *n,
        NumericInput::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
    };
    // f64 holds every integer up to 2^53 exactly.
    if !number.is_finite() || number < 1.0 || number.fract() != 0.0 || number > 9.0e15 {
        return Err(invalid());
    }
    Ok(number as i64)
}

fn parse_marks(value: &NumericInput) -> Result<f64, CoreError> {
    let marks = match value {
        NumericInput::Number(n) => *n,
        NumericInput::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::Validation(MSG_MARKS_NOT_NUMERIC.into()))?,
    };
    if !marks.is_finite() {
        return Err(CoreError::Validation(MSG_MARKS_NOT_NUMERIC.into()));
    }
    Ok(marks)
}
