use async_trait::async_trait;
use gradebook_core::student::StudentFields;
use gradebook_core::types::DbId;

use super::{StoreError, StudentStore};
use crate::models::student::Student;
use crate::repositories::student_repo::ROLL_NO_CONSTRAINT;
use crate::repositories::StudentRepo;
use crate::DbPool;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// [`StudentStore`] backed by the `students` table.
///
/// Roll-number uniqueness is left to the `uq_students_roll_no` constraint,
/// which makes check-and-insert a single atomic statement.
#[derive(Clone)]
pub struct PgStudentStore {
    pool: DbPool,
}

impl PgStudentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn create(&self, fields: StudentFields) -> Result<Student, StoreError> {
        StudentRepo::create(&self.pool, &fields)
            .await
            .map_err(|err| classify_write_error(err, fields.roll_no))
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(StudentRepo::list(&self.pool).await?)
    }

    async fn update_by_id(&self, id: DbId, fields: StudentFields) -> Result<Student, StoreError> {
        StudentRepo::update(&self.pool, id, &fields)
            .await
            .map_err(|err| classify_write_error(err, fields.roll_no))?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(StudentRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Turn a roll-number unique violation into [`StoreError::DuplicateRollNo`].
fn classify_write_error(err: sqlx::Error, roll_no: i64) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(ROLL_NO_CONSTRAINT)
        {
            return StoreError::DuplicateRollNo(roll_no);
        }
    }
    StoreError::Database(err)
}
