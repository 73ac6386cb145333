//! The record store seam between the service layer and persistence.
//!
//! - [`postgres::PgStudentStore`] -- production store over a PostgreSQL pool.
//! - [`memory::MemoryStudentStore`] -- process-local store for tests and
//!   database-less runs.

use async_trait::async_trait;
use gradebook_core::student::StudentFields;
use gradebook_core::types::DbId;

use crate::models::student::Student;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PgStudentStore;

/// Errors a store can report. Each kind maps to a distinct client response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Roll number {0} already exists")]
    DuplicateRollNo(i64),

    #[error("Student with id {0} not found")]
    NotFound(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable collection of student records.
///
/// Implementations stamp every written record with `fields.grade()` and
/// enforce roll-number uniqueness atomically: a violating create or update
/// fails with [`StoreError::DuplicateRollNo`] and changes nothing.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Persist a new record and return it with its assigned id and timestamps.
    async fn create(&self, fields: StudentFields) -> Result<Student, StoreError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Replace the user fields of an existing record.
    async fn update_by_id(&self, id: DbId, fields: StudentFields) -> Result<Student, StoreError>;

    /// Remove a record. Returns whether one existed; a missing id is not an error.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
