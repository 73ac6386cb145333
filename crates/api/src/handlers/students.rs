//! Handlers for student records.
//!
//! Create and update share one validation path ([`StudentPayload::validate`])
//! that runs before the store is touched. The store stamps the grade.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use gradebook_core::student::StudentPayload;
use gradebook_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/students
///
/// Validate the payload and create a record. Returns the stored record
/// including its id and grade.
pub async fn create_student(
    State(state): State<AppState>,
    AppJson(input): AppJson<StudentPayload>,
) -> AppResult<impl IntoResponse> {
    let fields = input.validate()?;
    let student = state.store.create(fields).await?;

    tracing::info!(
        student_id = student.id,
        roll_no = student.roll_no,
        grade = %student.grade,
        "Student created",
    );

    Ok(Json(student))
}

/// GET /api/students
///
/// List every record in insertion order.
pub async fn list_students(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let students = state.store.list().await?;

    Ok(Json(students))
}

/// PUT /api/students/{id}
///
/// Replace all user fields of a record and re-derive its grade.
pub async fn update_student(
    State(state): State<AppState>,
    AppPath(student_id): AppPath<DbId>,
    AppJson(input): AppJson<StudentPayload>,
) -> AppResult<impl IntoResponse> {
    let fields = input.validate()?;
    let student = state.store.update_by_id(student_id, fields).await?;

    tracing::info!(student_id, grade = %student.grade, "Student updated");

    Ok(Json(student))
}

/// DELETE /api/students/{id}
///
/// Always confirms, whether or not the record existed.
pub async fn delete_student(
    State(state): State<AppState>,
    AppPath(student_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existed = state.store.delete_by_id(student_id).await?;

    if existed {
        tracing::info!(student_id, "Student deleted");
    } else {
        tracing::debug!(student_id, "Delete of unknown student ignored");
    }

    Ok(Json(MessageResponse {
        message: "Deleted successfully",
    }))
}
