//! Student record model.

use gradebook_core::grading::Grade;
use gradebook_core::roster::RosterEntry;
use gradebook_core::student::{StudentFields, StudentRole};
use gradebook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `students` table.
///
/// `grade` is always `grade_for_marks(marks)`; both stores stamp it from
/// [`StudentFields::grade`] on every write.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub roll_no: i64,
    pub department: String,
    pub subject: String,
    pub marks: f64,
    #[sqlx(try_from = "String")]
    pub grade: Grade,
    #[sqlx(try_from = "String")]
    pub role: StudentRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Student {
    /// Build a fresh record from validated fields.
    pub fn new(id: DbId, fields: StudentFields, now: Timestamp) -> Self {
        let grade = fields.grade();
        Self {
            id,
            name: fields.name,
            roll_no: fields.roll_no,
            department: fields.department,
            subject: fields.subject,
            marks: fields.marks,
            grade,
            role: fields.role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the user fields and re-derive the grade. `id` and
    /// `created_at` are left alone.
    pub fn apply(&mut self, fields: StudentFields, now: Timestamp) {
        self.grade = fields.grade();
        self.name = fields.name;
        self.roll_no = fields.roll_no;
        self.department = fields.department;
        self.subject = fields.subject;
        self.marks = fields.marks;
        self.role = fields.role;
        self.updated_at = now;
    }
}

impl RosterEntry for Student {
    fn name(&self) -> &str {
        &self.name
    }

    fn roll_no(&self) -> i64 {
        self.roll_no
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn subject(&self) -> &str {
        &self.subject
    }

    fn marks(&self) -> f64 {
        self.marks
    }

    fn grade(&self) -> Grade {
        self.grade
    }
}
