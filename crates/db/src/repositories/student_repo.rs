//! Repository for the `students` table.

use gradebook_core::student::StudentFields;
use gradebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::Student;

/// Column list for `students` queries.
const STUDENT_COLUMNS: &str = "\
    id, name, roll_no, department, subject, marks, grade, role, \
    created_at, updated_at";

/// Name of the unique constraint guarding roll numbers.
pub const ROLL_NO_CONSTRAINT: &str = "uq_students_roll_no";

/// Provides CRUD operations for student records.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, stamping the grade derived from `fields.marks`.
    ///
    /// A duplicate roll number fails with a unique violation on
    /// [`ROLL_NO_CONSTRAINT`] and inserts nothing.
    pub async fn create(pool: &PgPool, fields: &StudentFields) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, roll_no, department, subject, marks, grade, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&fields.name)
            .bind(fields.roll_no)
            .bind(&fields.department)
            .bind(&fields.subject)
            .bind(fields.marks)
            .bind(fields.grade().as_str())
            .bind(fields.role.as_str())
            .fetch_one(pool)
            .await
    }

    /// List every student in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id");
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// Find a student by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace all user fields and re-derive the grade.
    ///
    /// Returns `None` if no row has the given id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &StudentFields,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET \
                name = $2, roll_no = $3, department = $4, subject = $5, \
                marks = $6, grade = $7, role = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(fields.roll_no)
            .bind(&fields.department)
            .bind(&fields.subject)
            .bind(fields.marks)
            .bind(fields.grade().as_str())
            .bind(fields.role.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a student. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
