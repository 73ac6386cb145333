//! Marks-to-letter-grade rule.
//!
//! [`grade_for_marks`] is the single source of truth for grading. The store
//! stamps every record with it and the form preview in [`crate::roster`]
//! calls the same function, so the two can never drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Letter grade derived from a student's marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Grade; 8] = [
        Grade::S,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    /// The label stored in the database and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Inclusive lower bound of the tier. `F` covers everything below `D`.
    pub fn min_marks(self) -> f64 {
        match self {
            Grade::S => 95.0,
            Grade::APlus => 90.0,
            Grade::A => 80.0,
            Grade::BPlus => 70.0,
            Grade::B => 60.0,
            Grade::C => 50.0,
            Grade::D => 40.0,
            Grade::F => 0.0,
        }
    }

    /// Position in best-first order (`S` = 0, `F` = 7).
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown grade '{s}'")))
    }
}

impl TryFrom<String> for Grade {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Map a score to its letter grade.
///
/// Total over all inputs: callers validate `[0, 100]` beforehand, but a
/// score below 40 (negative or NaN included) still yields `F` and a score
/// above 100 yields `S`.
///
/// ```
/// use gradebook_core::grading::{grade_for_marks, Grade};
///
/// assert_eq!(grade_for_marks(92.0), Grade::APlus);
/// assert_eq!(grade_for_marks(45.0), Grade::D);
/// assert_eq!(grade_for_marks(-3.0), Grade::F);
/// ```
pub fn grade_for_marks(marks: f64) -> Grade {
    Grade::ALL
        .into_iter()
        .find(|grade| marks >= grade.min_marks())
        .unwrap_or(Grade::F)
}
