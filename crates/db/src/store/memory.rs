use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use gradebook_core::student::StudentFields;
use gradebook_core::types::DbId;
use tokio::sync::RwLock;

use super::{StoreError, StudentStore};
use crate::models::student::Student;

/// In-process [`StudentStore`].
///
/// Every mutation runs under a single write guard, so the roll-number check
/// and the insert or update it protects cannot interleave with another
/// writer. Ids come from a monotonic counter and are never reused.
#[derive(Default)]
pub struct MemoryStudentStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: DbId,
    rows: BTreeMap<DbId, Student>,
}

impl MemoryState {
    fn roll_no_taken(&self, roll_no: i64, except: Option<DbId>) -> bool {
        self.rows
            .values()
            .any(|s| s.roll_no == roll_no && Some(s.id) != except)
    }
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn create(&self, fields: StudentFields) -> Result<Student, StoreError> {
        let mut state = self.state.write().await;
        if state.roll_no_taken(fields.roll_no, None) {
            return Err(StoreError::DuplicateRollNo(fields.roll_no));
        }

        state.last_id += 1;
        let student = Student::new(state.last_id, fields, Utc::now());
        state.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn update_by_id(&self, id: DbId, fields: StudentFields) -> Result<Student, StoreError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if state.roll_no_taken(fields.roll_no, Some(id)) {
            return Err(StoreError::DuplicateRollNo(fields.roll_no));
        }

        let student = state.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        student.apply(fields, Utc::now());
        Ok(student.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
